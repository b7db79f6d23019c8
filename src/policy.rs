//! Named sharing policies used by the sharing editor.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::permission::level::{Edit, View};
use crate::permission::{AccessMode, AgentAccess, Level, NormalizedPermission};

/// A named group of agents sharing the same access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    Editors,
    Viewers,
    Blocked,
    Custom,
}

impl Policy {
    /// Display order in the sharing editor.
    pub const ORDER: [Policy; 4] = [
        Policy::Editors,
        Policy::Viewers,
        Policy::Blocked,
        Policy::Custom,
    ];

    /// Canonical mode for a named policy. `Custom` has none.
    pub fn mode(self) -> Option<AccessMode> {
        match self {
            Policy::Editors => Some(Edit::MODE),
            Policy::Viewers => Some(View::MODE),
            Policy::Blocked => Some(AccessMode::NONE),
            Policy::Custom => None,
        }
    }

    /// The named policy whose mode matches exactly, else `Custom`.
    pub fn from_mode(mode: &AccessMode) -> Policy {
        Policy::ORDER
            .into_iter()
            .find(|policy| policy.mode().as_ref() == Some(mode))
            .unwrap_or(Policy::Custom)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Policy::Editors => "editors",
            Policy::Viewers => "viewers",
            Policy::Blocked => "blocked",
            Policy::Custom => "custom",
        })
    }
}

/// Group a permission map into policy buckets.
///
/// Buckets come out in [`Policy::ORDER`]; agents keep their insertion order
/// inside a bucket and empty buckets are omitted.
pub fn group_by_policy(permissions: &AgentAccess) -> Vec<(Policy, Vec<NormalizedPermission>)> {
    Policy::ORDER
        .into_iter()
        .filter_map(|policy| {
            let members: Vec<NormalizedPermission> = permissions
                .iter()
                .filter(|(_, mode)| Policy::from_mode(mode) == policy)
                .map(|(web_id, mode)| NormalizedPermission::new(web_id, *mode))
                .collect();
            (!members.is_empty()).then_some((policy, members))
        })
        .collect()
}
