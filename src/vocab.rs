//! Vocabulary IRIs read from resource datasets and response headers.

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

// LDP
pub const LDP_BASIC_CONTAINER: &str = "http://www.w3.org/ns/ldp#BasicContainer";
pub const LDP_CONTAINER: &str = "http://www.w3.org/ns/ldp#Container";
pub const LDP_DIRECT_CONTAINER: &str = "http://www.w3.org/ns/ldp#DirectContainer";
pub const LDP_INDIRECT_CONTAINER: &str = "http://www.w3.org/ns/ldp#IndirectContainer";
pub const LDP_RESOURCE: &str = "http://www.w3.org/ns/ldp#Resource";
pub const LDP_RDF_SOURCE: &str = "http://www.w3.org/ns/ldp#RDFSource";
pub const LDP_NON_RDF_SOURCE: &str = "http://www.w3.org/ns/ldp#NonRDFSource";
pub const LDP_CONTAINS: &str = "http://www.w3.org/ns/ldp#contains";

// Resource metadata
pub const DCT_MODIFIED: &str = "http://purl.org/dc/terms/modified";
pub const POSIX_SIZE: &str = "http://www.w3.org/ns/posix/stat#size";
pub const POSIX_MTIME: &str = "http://www.w3.org/ns/posix/stat#mtime";

// Literal datatypes
pub const XSD_DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const XSD_DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

// Access control
pub const ACL_READ: &str = "http://www.w3.org/ns/auth/acl#Read";
pub const ACL_WRITE: &str = "http://www.w3.org/ns/auth/acl#Write";
pub const ACL_APPEND: &str = "http://www.w3.org/ns/auth/acl#Append";
pub const ACL_CONTROL: &str = "http://www.w3.org/ns/auth/acl#Control";
pub const ACP_ACCESS_CONTROL: &str = "http://www.w3.org/ns/solid/acp#accessControl";
pub const ACP_ACCESS_CONTROL_RESOURCE: &str =
    "http://www.w3.org/ns/solid/acp#AccessControlResource";

// Consent
pub const GC_CONSENT_STATUS_GIVEN: &str =
    "https://w3id.org/GConsent#ConsentStatusExplicitlyGiven";
pub const GC_CONSENT_STATUS_DENIED: &str = "https://w3id.org/GConsent#ConsentStatusDenied";
pub const GC_CONSENT_STATUS_REQUESTED: &str = "https://w3id.org/GConsent#ConsentStatusRequested";

/// Short display names for known LDP types.
pub const LDP_SHORT_NAMES: [(&str, &str); 7] = [
    (LDP_BASIC_CONTAINER, "BasicContainer"),
    (LDP_CONTAINER, "Container"),
    (LDP_DIRECT_CONTAINER, "DirectContainer"),
    (LDP_INDIRECT_CONTAINER, "IndirectContainer"),
    (LDP_RESOURCE, "Resource"),
    (LDP_RDF_SOURCE, "RDFSource"),
    (LDP_NON_RDF_SOURCE, "NonRDFSource"),
];
