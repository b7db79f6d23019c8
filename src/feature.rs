//! Feature flags gated by configured WebID allow-lists.
//!
//! # Example
//!
//! ```
//! use podbrowser::feature::FeaturePolicy;
//!
//! let policy = FeaturePolicy::from_iter([
//!     ("sharing-v2", vec!["https://alice.example/profile#me"]),
//!     ("grants", vec!["*"]),
//! ]);
//!
//! assert!(policy.is_enabled("sharing-v2", "https://alice.example/profile#me"));
//! assert!(!policy.is_enabled("sharing-v2", "https://bob.example/profile#me"));
//! assert!(policy.is_enabled("grants", "https://bob.example/profile#me"));
//! ```

use std::collections::{BTreeMap, BTreeSet};

use crate::config::Config;

/// Allow-list entry that enables a flag for every agent.
pub const EVERYONE: &str = "*";

/// The single lookup deciding whether an agent sees a feature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeaturePolicy {
    flags: BTreeMap<String, BTreeSet<String>>,
}

impl FeaturePolicy {
    /// Build from the `[features]` table of a loaded config.
    pub fn from_config(config: &Config) -> Self {
        Self::from_iter(config.features.iter().map(|(flag, ids)| (flag.as_str(), ids.iter())))
    }

    /// Whether `flag` is enabled for `web_id`. Unknown flags are disabled.
    pub fn is_enabled(&self, flag: &str, web_id: &str) -> bool {
        self.flags
            .get(flag)
            .is_some_and(|ids| ids.contains(EVERYONE) || ids.contains(web_id))
    }

    /// Every flag enabled for `web_id`, in name order.
    pub fn enabled_for<'a>(&'a self, web_id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.flags
            .keys()
            .map(String::as_str)
            .filter(move |flag| self.is_enabled(flag, web_id))
    }
}

impl<F, I, S> FromIterator<(F, I)> for FeaturePolicy
where
    F: Into<String>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fn from_iter<T: IntoIterator<Item = (F, I)>>(iter: T) -> Self {
        let mut flags: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (flag, ids) in iter {
            flags
                .entry(flag.into())
                .or_default()
                .extend(ids.into_iter().map(|id| id.as_ref().trim().to_string()));
        }
        Self { flags }
    }
}
