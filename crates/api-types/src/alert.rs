use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A recorded state-transition-to-down event for a check.
///
/// Outages are created server-side; the only client-side mutation is the
/// "ignore" action reached through [`Outage::ignore_alert_url`].
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Outage {
    /// Primary key of the outage.
    pub pk: u64,
    /// Primary key of the owning check.
    #[serde(default)]
    pub check_pk: Option<u64>,
    /// Name of the owning check at the time of the outage.
    pub check_name: String,
    /// When the outage was recorded.
    pub created_at: DateTime<Utc>,
    /// Whether alerting for this outage has been suppressed.
    #[serde(default)]
    pub ignored: bool,
    /// Absolute URL of the action that marks this outage ignored.
    pub ignore_alert_url: String,
    /// Up/down state at the time of the alert.
    #[serde(default)]
    pub state_is_up: bool,
}

/// A notification record describing a check's state change.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Alert {
    /// Primary key of the alert.
    pub pk: u64,
    /// Primary key of the check that changed state.
    pub check_pk: u64,
    /// The state the check transitioned to.
    pub state_is_up: bool,
    /// When the state change happened.
    pub created_at: DateTime<Utc>,
}
