//! Permission normalization: access modes to ranked display labels.
//!
//! An [`AccessMode`] is the raw four-bit grant an agent holds on a resource.
//! [`classify_access`] reduces it to one of four [`Descriptor`] labels, and
//! [`split_own_and_third_party`] reshapes a whole [`AgentAccess`] map into the
//! current user's entry plus everyone else's.
//!
//! # Example
//!
//! ```
//! use podbrowser::permission::{self, AccessMode, AgentAccess, Descriptor};
//!
//! let mut access = AgentAccess::new();
//! access.insert("https://alice.example/profile#me", AccessMode::FULL);
//! access.insert("https://bob.example/profile#me", AccessMode::READ);
//!
//! let split = permission::split_own_and_third_party(&access, "https://alice.example/profile#me");
//! assert_eq!(split.own.unwrap().descriptor, Descriptor::FullControl);
//! assert_eq!(split.third_party[0].descriptor, Descriptor::CanView);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Capability grants on a resource for one agent.
///
/// The four flags are independent; every combination is legal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessMode {
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub write: bool,
    #[serde(default)]
    pub append: bool,
    #[serde(default)]
    pub control: bool,
}

impl AccessMode {
    pub const NONE: AccessMode = AccessMode::new(false, false, false, false);
    pub const READ: AccessMode = AccessMode::new(true, false, false, false);
    pub const FULL: AccessMode = AccessMode::new(true, true, true, true);

    pub const fn new(read: bool, write: bool, append: bool, control: bool) -> Self {
        Self {
            read,
            write,
            append,
            control,
        }
    }

    /// The canonical mode granted at level `L`.
    pub fn for_level<L: Level>() -> Self {
        L::MODE
    }

    /// True when no flag is set.
    pub fn is_empty(&self) -> bool {
        !(self.read || self.write || self.append || self.control)
    }

    /// True when every flag is set.
    pub fn is_full(&self) -> bool {
        self.read && self.write && self.append && self.control
    }
}

/// Display label for an access mode, ranked from least to most permissive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Descriptor {
    #[serde(rename = "No Access")]
    NoAccess,
    #[serde(rename = "Can View")]
    CanView,
    #[serde(rename = "Can Edit")]
    CanEdit,
    #[serde(rename = "Full Control")]
    FullControl,
}

impl Descriptor {
    /// Every label, lowest rank first.
    pub const ALL: [Descriptor; 4] = [
        Descriptor::NoAccess,
        Descriptor::CanView,
        Descriptor::CanEdit,
        Descriptor::FullControl,
    ];

    /// Ordinal rank; higher is more permissive.
    pub fn ordinal(self) -> u8 {
        match self {
            Descriptor::NoAccess => 0,
            Descriptor::CanView => 1,
            Descriptor::CanEdit => 2,
            Descriptor::FullControl => 3,
        }
    }

    /// Whether this label ranks at or above level `L`.
    pub fn satisfies<L: Level>(self) -> bool {
        self.ordinal() >= L::ORDINAL
    }

    pub fn label(self) -> &'static str {
        match self {
            Descriptor::NoAccess => "No Access",
            Descriptor::CanView => "Can View",
            Descriptor::CanEdit => "Can Edit",
            Descriptor::FullControl => "Full Control",
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Marker trait for permission levels.
///
/// Implementors define an ordinal for runtime comparison against a
/// [`Descriptor`] and the canonical mode an agent receives at that level.
/// Standard levels: View (1) < Edit (2) < Control (3)
pub trait Level: Clone + Copy + PartialEq + Eq + PartialOrd + Ord + fmt::Debug {
    /// Ordinal value, comparable with [`Descriptor::ordinal`].
    const ORDINAL: u8;

    /// Mode granted when sharing at this level.
    const MODE: AccessMode;
}

/// Standard permission levels (View < Edit < Control).
pub mod level {
    use super::{AccessMode, Level};

    /// Read-only access level.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
    pub struct View;

    impl Level for View {
        const ORDINAL: u8 = 1;
        const MODE: AccessMode = AccessMode::READ;
    }

    /// Content editing access level.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
    pub struct Edit;

    impl Level for Edit {
        const ORDINAL: u8 = 2;
        const MODE: AccessMode = AccessMode::new(true, true, true, false);
    }

    /// Full control, including changing who else has access.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
    pub struct Control;

    impl Level for Control {
        const ORDINAL: u8 = 3;
        const MODE: AccessMode = AccessMode::FULL;
    }
}

/// Reduce an access mode to its display label.
///
/// Rules, first match wins:
/// 1. all four flags set: Full Control
/// 2. no flag set: No Access
/// 3. `write` set: Can Edit
/// 4. anything else: Can View
///
/// Rule 4 also catches lone `append` or lone `control`.
pub fn classify_access(mode: &AccessMode) -> Descriptor {
    if mode.is_full() {
        Descriptor::FullControl
    } else if mode.is_empty() {
        Descriptor::NoAccess
    } else if mode.write {
        Descriptor::CanEdit
    } else {
        Descriptor::CanView
    }
}

/// Agent WebID to access mode, in insertion order.
///
/// Keys are unique; inserting an existing WebID replaces its mode in place.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentAccess {
    entries: Vec<(String, AccessMode)>,
}

impl AgentAccess {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the mode for `web_id`. Returns the previous mode.
    pub fn insert(&mut self, web_id: impl Into<String>, mode: AccessMode) -> Option<AccessMode> {
        let web_id = web_id.into();
        match self.entries.iter_mut().find(|(id, _)| *id == web_id) {
            Some((_, existing)) => Some(std::mem::replace(existing, mode)),
            None => {
                self.entries.push((web_id, mode));
                None
            }
        }
    }

    pub fn get(&self, web_id: &str) -> Option<&AccessMode> {
        self.entries
            .iter()
            .find(|(id, _)| id == web_id)
            .map(|(_, mode)| mode)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AccessMode)> {
        self.entries.iter().map(|(id, mode)| (id.as_str(), mode))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, AccessMode)> for AgentAccess {
    fn from_iter<I: IntoIterator<Item = (S, AccessMode)>>(iter: I) -> Self {
        let mut access = AgentAccess::new();
        for (web_id, mode) in iter {
            access.insert(web_id, mode);
        }
        access
    }
}

/// An agent paired with its display label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPermission {
    pub web_id: String,
    pub descriptor: Descriptor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<AccessMode>,
}

impl NormalizedPermission {
    /// Classify `mode` and keep the raw flags alongside the label.
    pub fn new(web_id: impl Into<String>, mode: AccessMode) -> Self {
        Self {
            web_id: web_id.into(),
            descriptor: classify_access(&mode),
            mode: Some(mode),
        }
    }
}

/// Result of [`split_own_and_third_party`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    /// The current user's entry. `None` means unknown, not "No Access".
    pub own: Option<NormalizedPermission>,
    pub third_party: Vec<NormalizedPermission>,
}

/// Separate the current user's own access from everyone else's.
pub fn split_own_and_third_party(permissions: &AgentAccess, current_web_id: &str) -> Split {
    let mut split = Split::default();
    for (web_id, mode) in permissions.iter() {
        let normalized = NormalizedPermission::new(web_id, *mode);
        if web_id == current_web_id {
            split.own = Some(normalized);
        } else {
            split.third_party.push(normalized);
        }
    }
    split
}
