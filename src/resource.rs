//! Resource and type classification.
//!
//! Maps raw RDF type IRIs to short display names, decides which details view
//! a resource belongs to, and flattens a fetched dataset into a
//! [`NormalizedResource`].

use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, Term};
use crate::permission::AgentAccess;
use crate::vocab;

/// Type sentinel for non-RDF resources detected upstream (binary files).
pub const UNKNOWN_TYPE: &str = "Unknown";

/// Which details view a resource routes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Container,
    Resource,
    Unknown,
}

/// Flattened, display-ready view of one fetched resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResource {
    pub iri: String,
    pub types: Vec<String>,
    pub modified: Option<jiff::Timestamp>,
    pub size: Option<i64>,
    /// Child IRIs; empty unless the resource is a container.
    pub contains: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<AgentAccess>,
}

impl NormalizedResource {
    /// Attach the per-agent access map.
    pub fn with_access(mut self, access: AgentAccess) -> Self {
        self.access = Some(access);
        self
    }

    pub fn kind(&self) -> ResourceKind {
        classify_resource_kind(&self.types)
    }

    /// Display name derived from the IRI.
    pub fn name(&self) -> &str {
        resource_name(&self.iri)
    }
}

/// Short display name for a type IRI.
///
/// Empty or absent input gives `""`; IRIs outside the LDP table come back
/// unchanged.
pub fn short_type_name(iri: Option<&str>) -> String {
    let Some(iri) = iri.filter(|iri| !iri.is_empty()) else {
        return String::new();
    };
    vocab::LDP_SHORT_NAMES
        .iter()
        .find(|(full, _)| *full == iri)
        .map(|(_, short)| short.to_string())
        .unwrap_or_else(|| iri.to_string())
}

fn is_container_type(name: &str) -> bool {
    matches!(
        name,
        "BasicContainer" | "Container" | vocab::LDP_BASIC_CONTAINER | vocab::LDP_CONTAINER
    )
}

/// Classify a type list. `Unknown` wins over everything, including a
/// container type in the same list.
pub fn classify_resource_kind<S: AsRef<str>>(types: &[S]) -> ResourceKind {
    if types.iter().any(|t| t.as_ref() == UNKNOWN_TYPE) {
        ResourceKind::Unknown
    } else if types.iter().any(|t| is_container_type(t.as_ref())) {
        ResourceKind::Container
    } else {
        ResourceKind::Resource
    }
}

/// Flatten the statements about `iri` into a [`NormalizedResource`].
///
/// Missing or undecodable metadata becomes `None`; this never fails.
pub fn normalize_dataset(dataset: &Dataset, iri: &str) -> NormalizedResource {
    let types: Vec<String> = dataset
        .objects(iri, vocab::RDF_TYPE)
        .filter_map(Term::as_iri)
        .map(|t| short_type_name(Some(t)))
        .collect();

    let modified = dataset
        .objects(iri, vocab::DCT_MODIFIED)
        .find_map(Term::as_datetime)
        .or_else(|| {
            // posix:mtime carries whole seconds since the epoch.
            dataset
                .objects(iri, vocab::POSIX_MTIME)
                .find_map(Term::as_integer)
                .and_then(|secs| jiff::Timestamp::from_second(secs).ok())
        });

    let size = dataset
        .objects(iri, vocab::POSIX_SIZE)
        .find_map(Term::as_integer);

    let contains = if classify_resource_kind(&types) == ResourceKind::Container {
        dataset
            .objects(iri, vocab::LDP_CONTAINS)
            .filter_map(Term::as_iri)
            .map(str::to_string)
            .collect()
    } else {
        Vec::new()
    };

    NormalizedResource {
        iri: iri.to_string(),
        types,
        modified,
        size,
        contains,
        access: None,
    }
}

/// Container IRIs end with a slash.
pub fn is_container_iri(iri: &str) -> bool {
    iri.ends_with('/')
}

/// Last non-empty path segment, without the container slash.
///
/// A pod root has no path segment and gets an empty name.
pub fn resource_name(iri: &str) -> &str {
    if url::Url::parse(iri).is_ok_and(|url| url.path() == "/") {
        return "";
    }
    iri.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}

/// The container holding `iri`, or `None` at the root of a pod.
pub fn parent_container(iri: &str) -> Option<&str> {
    let url = url::Url::parse(iri).ok()?;
    if url.path() == "/" {
        return None;
    }
    let trimmed = iri.trim_end_matches('/');
    trimmed.rfind('/').map(|idx| &iri[..=idx])
}
