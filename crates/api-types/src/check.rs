use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A configured monitor against a target, as returned by `checks/` endpoints.
///
/// Only the fields the tools act on are modeled; the service returns many
/// more, which are ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Check {
    /// Primary key of the check.
    pub pk: u64,
    /// Display name.
    pub name: String,
    /// Protocol type (e.g. `HTTP`, `ICMP`).
    #[serde(default)]
    pub check_type: Option<String>,
    /// Whether the check is paused.
    #[serde(default)]
    pub is_paused: bool,
    /// Current up/down state.
    #[serde(default)]
    pub state_is_up: bool,
    /// When the check last changed state, if it ever has.
    #[serde(default)]
    pub state_changed_at: Option<DateTime<Utc>>,
    /// Assigned contact groups.
    #[serde(default)]
    pub contact_groups: Vec<String>,
    /// Assigned probe locations.
    #[serde(default)]
    pub locations: Vec<String>,
    /// Assigned tags.
    #[serde(default)]
    pub tags: Vec<String>,
}
