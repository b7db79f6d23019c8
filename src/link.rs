//! Resource metadata from HTTP response headers.
//!
//! Solid servers advertise a resource's access-control document, its types
//! and the requesting agent's effective permissions in `Link` and
//! `WAC-Allow` headers. [`ResourceInfo`] collects them.

use std::collections::BTreeMap;

use hyper::http::HeaderMap;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::permission::AccessMode;
use crate::{Error, Result};

/// Link relation of a resource's access-control document.
pub const REL_ACL: &str = "acl";
/// Link relation carrying a type IRI.
pub const REL_TYPE: &str = "type";

/// One `Link` header entry with its target resolved to an absolute IRI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub rel: String,
    pub target: String,
}

/// Parse a `Link` header value.
///
/// Targets are resolved against `base`; entries with an unresolvable target
/// or no `rel` parameter are skipped. A `rel` listing several relations
/// yields one [`Link`] per relation.
pub fn parse_link_header(value: &str, base: &Url) -> Vec<Link> {
    let mut links = Vec::new();
    for entry in split_outside_quotes(value, ',') {
        let entry = entry.trim();
        let Some(rest) = entry.strip_prefix('<') else {
            continue;
        };
        let Some(end) = rest.find('>') else {
            continue;
        };
        let Ok(target) = base.join(&rest[..end]) else {
            continue;
        };
        for param in split_outside_quotes(&rest[end + 1..], ';') {
            let Some((name, value)) = param.split_once('=') else {
                continue;
            };
            if !name.trim().eq_ignore_ascii_case("rel") {
                continue;
            }
            let value = value.trim().trim_matches('"');
            for rel in value.split_whitespace() {
                links.push(Link {
                    rel: rel.to_string(),
                    target: target.to_string(),
                });
            }
        }
    }
    links
}

fn split_outside_quotes(value: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut in_angle = false;
    for (i, c) in value.char_indices() {
        match c {
            '"' if !in_angle => in_quotes = !in_quotes,
            '<' if !in_quotes => in_angle = true,
            '>' if !in_quotes => in_angle = false,
            c if c == delimiter && !in_quotes && !in_angle => {
                parts.push(&value[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&value[start..]);
    parts
}

/// Effective permissions from a `WAC-Allow` header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectivePermissions {
    /// What the requesting agent may do.
    pub user: AccessMode,
    /// What anyone may do.
    pub public: AccessMode,
}

/// Parse `user="read write",public="read"`. Unknown groups and modes are
/// ignored, so a malformed header degrades to no access.
pub fn parse_wac_allow(value: &str) -> EffectivePermissions {
    let mut permissions = EffectivePermissions::default();
    for group in split_outside_quotes(value, ',') {
        let Some((name, modes)) = group.split_once('=') else {
            continue;
        };
        let target = match name.trim().to_ascii_lowercase().as_str() {
            "user" => &mut permissions.user,
            "public" => &mut permissions.public,
            _ => continue,
        };
        for mode in modes.trim().trim_matches('"').split_whitespace() {
            match mode.to_ascii_lowercase().as_str() {
                "read" => target.read = true,
                "write" => target.write = true,
                "append" => target.append = true,
                "control" => target.control = true,
                _ => {}
            }
        }
    }
    permissions
}

/// Header-derived metadata of a fetched resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceInfo {
    pub iri: String,
    /// Link relation to targets, in header order.
    pub linked: BTreeMap<String, Vec<String>>,
    pub content_type: Option<String>,
    pub permissions: Option<EffectivePermissions>,
}

impl ResourceInfo {
    /// Build from the headers of a response for `iri`.
    pub fn from_headers(iri: &str, headers: &HeaderMap) -> Result<Self> {
        let base = Url::parse(iri).map_err(|e| Error::InvalidIri(format!("{iri}: {e}")))?;

        let mut linked: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for value in headers.get_all("link") {
            let Ok(value) = value.to_str() else {
                continue;
            };
            for link in parse_link_header(value, &base) {
                let targets = linked.entry(link.rel).or_default();
                if !targets.contains(&link.target) {
                    targets.push(link.target);
                }
            }
        }

        let content_type = headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string());

        let permissions = headers
            .get("wac-allow")
            .and_then(|v| v.to_str().ok())
            .map(parse_wac_allow);

        Ok(Self {
            iri: iri.to_string(),
            linked,
            content_type,
            permissions,
        })
    }

    /// Targets linked with `rel`.
    pub fn links(&self, rel: &str) -> &[String] {
        self.linked.get(rel).map(Vec::as_slice).unwrap_or_default()
    }

    /// The advertised access-control document, if any.
    pub fn acl_iri(&self) -> Option<&str> {
        self.links(REL_ACL).first().map(String::as_str)
    }

    /// Whether the resource carries a `rel="type"` link to `type_iri`.
    pub fn has_type(&self, type_iri: &str) -> bool {
        self.links(REL_TYPE).iter().any(|t| t == type_iri)
    }
}

/// Whether the resource links an access-control document we could read.
pub fn has_accessible_acl(info: &ResourceInfo) -> bool {
    info.acl_iri().is_some()
}
