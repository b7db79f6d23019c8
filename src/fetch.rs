//! Transport for capability probes and resource fetches.
//!
//! Provides the [`Probe`] trait and an HTTP implementation:
//!
//! - [`HttpProbe`]: `reqwest`-backed transport configured from [`ProbeConfig`]
//!
//! Anything else that can answer HEAD and GET for an IRI (an authenticated
//! session, a test double) plugs in by implementing [`Probe`].

use async_trait::async_trait;
use bytes::Bytes;
use hyper::StatusCode;
use hyper::http::HeaderMap;
use tracing::debug;

use crate::config::ProbeConfig;
use crate::dataset::Dataset;
use crate::link::ResourceInfo;
use crate::resource::{self, NormalizedResource};
use crate::{Error, Result};

/// Media type requested when fetching resource descriptions.
pub const ACCEPT_NTRIPLES: &str = "application/n-triples";

/// A response as seen by the classifiers: status, headers and body.
#[derive(Clone, Debug, Default)]
pub struct ProbeResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ProbeResponse {
    /// Turn a non-success status into [`Error::Fetch`].
    pub fn error_for_status(self, iri: &str) -> Result<Self> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(Error::Fetch {
                iri: iri.to_string(),
                status: self.status.as_u16(),
            })
        }
    }
}

/// Something that can issue requests against a pod on the user's behalf.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Issue a HEAD request for `iri`.
    async fn head(&self, iri: &str) -> Result<ProbeResponse>;

    /// Issue a GET request for `iri` with the given `Accept` header.
    async fn get(&self, iri: &str, accept: &str) -> Result<ProbeResponse>;
}

/// HTTP transport over `reqwest`.
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    /// Build a client with the configured timeout and user agent.
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    /// Wrap a pre-configured client, e.g. one carrying session credentials.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<ProbeResponse> {
        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        Ok(ProbeResponse {
            status,
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for HttpProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProbe").finish()
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn head(&self, iri: &str) -> Result<ProbeResponse> {
        debug!(%iri, "HEAD");
        self.send(self.client.head(iri)).await
    }

    async fn get(&self, iri: &str, accept: &str) -> Result<ProbeResponse> {
        debug!(%iri, accept, "GET");
        self.send(self.client.get(iri).header("accept", accept)).await
    }
}

/// Fetch `iri` and return its header metadata plus the normalized dataset.
///
/// Non-RDF resources (anything not served as N-Triples) come back with the
/// `Unknown` type so they route to the binary-file view.
pub async fn fetch_resource<P: Probe + ?Sized>(
    probe: &P,
    iri: &str,
) -> Result<(ResourceInfo, NormalizedResource)> {
    let response = probe.get(iri, ACCEPT_NTRIPLES).await?.error_for_status(iri)?;
    let info = ResourceInfo::from_headers(iri, &response.headers)?;

    if info.content_type.as_deref() != Some(ACCEPT_NTRIPLES) {
        let normalized = NormalizedResource {
            iri: iri.to_string(),
            types: vec![resource::UNKNOWN_TYPE.to_string()],
            modified: None,
            size: Some(response.body.len() as i64),
            contains: Vec::new(),
            access: None,
        };
        return Ok((info, normalized));
    }

    let text = std::str::from_utf8(&response.body)
        .map_err(|e| Error::Parse {
            line: 0,
            message: format!("body is not UTF-8: {e}"),
        })?;
    let dataset = Dataset::from_ntriples(text)?;
    Ok((info, resource::normalize_dataset(&dataset, iri)))
}
