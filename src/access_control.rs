//! Access-control model detection: ACP or WAC, per resource.
//!
//! Detection runs as a small state machine for each resource:
//!
//! ```text
//! Unknown ──probe──> Probing ──> Acp | Wac | Unsupported
//!    ^                  │
//!    └─failed/dropped───┘
//! ```
//!
//! ACP is checked first and wins over WAC: a server moving between models
//! may still advertise a stale ACL link. A failed probe is logged and
//! reported as `None`; it is never cached, so a later user action can try
//! again. The same holds when the caller drops a detection mid-probe.
//! Nothing here retries on its own.
//!
//! # Example
//!
//! ```
//! use podbrowser::access_control::{classify_probe, ProbeStatus};
//! use podbrowser::link::ResourceInfo;
//! use hyper::http::HeaderMap;
//!
//! let mut headers = HeaderMap::new();
//! headers.insert("link", r#"<doc.acl>; rel="acl""#.parse().unwrap());
//! let info = ResourceInfo::from_headers("https://pod.example/doc", &headers).unwrap();
//!
//! // The ACL document answered without advertising ACP: legacy WAC.
//! let acr = ResourceInfo::from_headers("https://pod.example/doc.acl", &HeaderMap::new()).unwrap();
//! assert_eq!(classify_probe(&info, Some(&acr)), ProbeStatus::Wac);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::fetch::Probe;
use crate::link::{self, ResourceInfo};
use crate::vocab;

/// The authorization model governing a resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessControlType {
    Acp,
    Wac,
}

impl fmt::Display for AccessControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AccessControlType::Acp => "acp",
            AccessControlType::Wac => "wac",
        })
    }
}

/// Detection state of one resource.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProbeStatus {
    #[default]
    Unknown,
    Probing,
    Acp,
    Wac,
    Unsupported,
}

impl ProbeStatus {
    /// Whether probing has finished for good.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ProbeStatus::Acp | ProbeStatus::Wac | ProbeStatus::Unsupported
        )
    }

    /// The detected model; `None` for every non-model state.
    pub fn access_control_type(self) -> Option<AccessControlType> {
        match self {
            ProbeStatus::Acp => Some(AccessControlType::Acp),
            ProbeStatus::Wac => Some(AccessControlType::Wac),
            ProbeStatus::Unknown | ProbeStatus::Probing | ProbeStatus::Unsupported => None,
        }
    }
}

/// Decide the model from the resource's headers and, when it could be read,
/// the headers of its access-control document.
pub fn classify_probe(info: &ResourceInfo, acr: Option<&ResourceInfo>) -> ProbeStatus {
    let advertises_acp = !info.links(vocab::ACP_ACCESS_CONTROL).is_empty()
        || acr.is_some_and(|acr| acr.has_type(vocab::ACP_ACCESS_CONTROL_RESOURCE));

    if advertises_acp {
        ProbeStatus::Acp
    } else if acr.is_some() && link::has_accessible_acl(info) {
        ProbeStatus::Wac
    } else {
        ProbeStatus::Unsupported
    }
}

/// Run the capability probe for one resource.
///
/// Returns a terminal status, or the transport error when the probe itself
/// could not complete.
pub async fn probe_status<P: Probe + ?Sized>(
    info: &ResourceInfo,
    probe: &P,
) -> crate::Result<ProbeStatus> {
    if !info.links(vocab::ACP_ACCESS_CONTROL).is_empty() {
        return Ok(ProbeStatus::Acp);
    }
    let Some(acl_iri) = info.acl_iri() else {
        return Ok(ProbeStatus::Unsupported);
    };

    let response = probe.head(acl_iri).await?;
    if !response.status.is_success() {
        debug!(iri = %info.iri, status = %response.status, "access control document not readable");
        return Ok(classify_probe(info, None));
    }
    let acr = ResourceInfo::from_headers(acl_iri, &response.headers)?;
    Ok(classify_probe(info, Some(&acr)))
}

/// Detect the model governing a fetched resource.
///
/// No resource info means nothing has been fetched yet: `None`, and the
/// probe is not touched. Probe failures are logged and also give `None`.
pub async fn detect_access_control_type<P: Probe + ?Sized>(
    resource_info: Option<&ResourceInfo>,
    probe: &P,
) -> Option<AccessControlType> {
    let info = resource_info?;
    match probe_status(info, probe).await {
        Ok(status) => status.access_control_type(),
        Err(e) => {
            warn!(iri = %info.iri, error = %e, "access control probe failed");
            None
        }
    }
}

/// Per-session memo of detection results, keyed by resource IRI.
///
/// Only terminal states are kept. Each `Detector` owns its cache; dropping
/// it forgets everything.
pub struct Detector<P> {
    probe: P,
    statuses: Mutex<HashMap<String, ProbeStatus>>,
}

impl<P: Probe> Detector<P> {
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            statuses: Mutex::new(HashMap::new()),
        }
    }

    /// Current state for `iri`.
    pub fn status(&self, iri: &str) -> ProbeStatus {
        self.statuses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(iri)
            .copied()
            .unwrap_or_default()
    }

    /// Detect the model for `resource_info`, probing at most once per IRI.
    ///
    /// While a probe for the same IRI is in flight, other callers get `None`
    /// rather than starting a second probe.
    pub async fn detect(&self, resource_info: Option<&ResourceInfo>) -> Option<AccessControlType> {
        let info = resource_info?;
        {
            let mut statuses = self.statuses.lock().unwrap_or_else(PoisonError::into_inner);
            match statuses.get(&info.iri).copied().unwrap_or_default() {
                ProbeStatus::Unknown => {
                    statuses.insert(info.iri.clone(), ProbeStatus::Probing);
                }
                ProbeStatus::Probing => return None,
                done => return done.access_control_type(),
            }
        }

        let mut in_flight = InFlight {
            statuses: &self.statuses,
            iri: &info.iri,
            settled: false,
        };

        debug!(iri = %info.iri, "probing access control");
        match probe_status(info, &self.probe).await {
            Ok(status) => {
                debug!(iri = %info.iri, ?status, "access control detected");
                self.statuses
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(info.iri.clone(), status);
                in_flight.settled = true;
                status.access_control_type()
            }
            Err(e) => {
                warn!(iri = %info.iri, error = %e, "access control probe failed");
                None
            }
        }
    }

    /// Forget the result for `iri` so the next `detect` probes again.
    pub fn invalidate(&self, iri: &str) {
        self.statuses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(iri);
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }
}

/// A `Probing` entry owned by one `detect` call.
///
/// Unless the call settles it with a terminal status, dropping the guard
/// puts the resource back to `Unknown`. This covers both a failed probe and
/// a caller that abandons the future mid-probe.
struct InFlight<'a> {
    statuses: &'a Mutex<HashMap<String, ProbeStatus>>,
    iri: &'a str,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.statuses
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(self.iri);
        }
    }
}
