//! Access grants: consent credentials issued by an external service.
//!
//! A grant is a verifiable credential saying the resource owner consented to
//! give another agent some access modes on some resources, for a limited
//! time. The credential is consumed as JSON; signature verification belongs
//! to the issuing service.

use serde::{Deserialize, Serialize};

use crate::permission::AccessMode;
use crate::vocab;

/// Validity of a grant at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrantStatus {
    Active,
    /// Requested but not yet given, or not valid until a later issuance date.
    Pending,
    Expired,
    Denied,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessGrant {
    pub id: String,
    #[serde(default)]
    pub issuer: Option<String>,
    pub issuance_date: jiff::Timestamp,
    #[serde(default)]
    pub expiration_date: Option<jiff::Timestamp>,
    pub credential_subject: CredentialSubject,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialSubject {
    /// WebID of the resource owner.
    pub id: String,
    #[serde(alias = "hasConsent")]
    pub provided_consent: Consent,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consent {
    #[serde(default)]
    pub mode: Vec<String>,
    pub has_status: String,
    #[serde(default)]
    pub for_personal_data: Vec<String>,
    /// WebID of the agent receiving access.
    #[serde(default)]
    pub is_provided_to: Option<String>,
}

impl AccessGrant {
    /// Parse a credential from its JSON form.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn consent(&self) -> &Consent {
        &self.credential_subject.provided_consent
    }

    /// Status of the grant at `now`.
    pub fn status(&self, now: jiff::Timestamp) -> GrantStatus {
        let consent_status = expand_consent_status(&self.consent().has_status);
        if consent_status == vocab::GC_CONSENT_STATUS_DENIED {
            GrantStatus::Denied
        } else if consent_status != vocab::GC_CONSENT_STATUS_GIVEN || self.issuance_date > now {
            GrantStatus::Pending
        } else if self.expiration_date.is_some_and(|exp| exp <= now) {
            GrantStatus::Expired
        } else {
            GrantStatus::Active
        }
    }

    /// Whether the grant is usable at `now`.
    pub fn is_active(&self, now: jiff::Timestamp) -> bool {
        self.status(now) == GrantStatus::Active
    }

    /// Access modes granted. Unrecognized mode names are ignored.
    pub fn access_mode(&self) -> AccessMode {
        let mut mode = AccessMode::NONE;
        for name in &self.consent().mode {
            match expand_mode(name) {
                vocab::ACL_READ => mode.read = true,
                vocab::ACL_WRITE => mode.write = true,
                vocab::ACL_APPEND => mode.append = true,
                vocab::ACL_CONTROL => mode.control = true,
                _ => {}
            }
        }
        mode
    }

    /// Whether the grant applies to `resource_iri`, directly or through a
    /// granted container.
    pub fn covers(&self, resource_iri: &str) -> bool {
        self.consent().for_personal_data.iter().any(|granted| {
            granted == resource_iri
                || (granted.ends_with('/') && resource_iri.starts_with(granted.as_str()))
        })
    }

    /// WebID of the agent receiving access.
    pub fn grantee(&self) -> Option<&str> {
        self.consent().is_provided_to.as_deref()
    }
}

fn expand_mode(name: &str) -> &str {
    match name.trim_start_matches("acl:") {
        "Read" => vocab::ACL_READ,
        "Write" => vocab::ACL_WRITE,
        "Append" => vocab::ACL_APPEND,
        "Control" => vocab::ACL_CONTROL,
        _ => name,
    }
}

fn expand_consent_status(status: &str) -> &str {
    match status.trim_start_matches("gc:") {
        "ConsentStatusExplicitlyGiven" => vocab::GC_CONSENT_STATUS_GIVEN,
        "ConsentStatusDenied" => vocab::GC_CONSENT_STATUS_DENIED,
        "ConsentStatusRequested" => vocab::GC_CONSENT_STATUS_REQUESTED,
        _ => status,
    }
}
