//! Scripted transport standing in for a Solid server.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use hyper::StatusCode;
use hyper::header::HeaderValue;
use hyper::http::HeaderMap;
use podbrowser::fetch::{Probe, ProbeResponse};
use podbrowser::{Error, Result};

/// Canned replies keyed by IRI. IRIs without a reply fail like a dropped
/// connection.
#[derive(Default)]
pub struct ScriptedProbe {
    replies: Mutex<HashMap<String, ProbeResponse>>,
    calls: AtomicUsize,
    stalls: AtomicUsize,
    yields: bool,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, iri: &str, status: StatusCode, headers: &[(&str, &str)], body: &str) -> Self {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            map.append(
                hyper::header::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        self.replies.lock().unwrap().insert(
            iri.to_string(),
            ProbeResponse {
                status,
                headers: map,
                body: Bytes::from(body.to_string()),
            },
        );
        self
    }

    /// The next `count` requests never get an answer.
    pub fn stall_next(self, count: usize) -> Self {
        self.stalls.store(count, Ordering::SeqCst);
        self
    }

    /// Hand control back to the scheduler once before each answer, like a
    /// real round trip.
    pub fn yielding(mut self) -> Self {
        self.yields = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn answer(&self, iri: &str) -> Result<ProbeResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let stalled = self
            .stalls
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if stalled {
            std::future::pending::<()>().await;
        }
        if self.yields {
            tokio::task::yield_now().await;
        }
        self.replies
            .lock()
            .unwrap()
            .get(iri)
            .cloned()
            .ok_or_else(|| Error::Internal(format!("connection reset fetching {iri}")))
    }
}

#[async_trait]
impl Probe for ScriptedProbe {
    async fn head(&self, iri: &str) -> Result<ProbeResponse> {
        self.answer(iri).await.map(|mut response| {
            response.body = Bytes::new();
            response
        })
    }

    async fn get(&self, iri: &str, _accept: &str) -> Result<ProbeResponse> {
        self.answer(iri).await
    }
}

pub const DOC: &str = "https://pod.example/docs/notes.ttl";
pub const DOC_ACL: &str = "https://pod.example/docs/notes.ttl.acl";
pub const ACL_LINK: &str = r#"<notes.ttl.acl>; rel="acl""#;
pub const ACP_TYPE_LINK: &str =
    r#"<http://www.w3.org/ns/solid/acp#AccessControlResource>; rel="type""#;
