use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use api_types::{Alert, Check};

/// Cached snapshot of one check's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckStatus {
    /// Display name.
    pub name: String,
    /// Whether the check is paused.
    pub is_paused: bool,
    /// Last known up/down state.
    pub state_is_up: bool,
    /// When that state was entered.
    pub state_changed_at: Option<DateTime<Utc>>,
}

/// In-memory mapping from check pk to its last known state.
///
/// Rebuilt from a full listing on reload cycles; between reloads it is only
/// updated by applying alert deltas oldest-first, so the newest alert for a
/// check always wins. Nothing is persisted; a restart starts from a fresh
/// full load.
#[derive(Debug, Default)]
pub struct StatusCache {
    checks: HashMap<u64, CheckStatus>,
}

impl StatusCache {
    /// Build a fresh cache from a full check listing.
    pub fn from_checks(checks: Vec<Check>) -> Self {
        let checks = checks
            .into_iter()
            .map(|c| {
                (
                    c.pk,
                    CheckStatus {
                        name: c.name,
                        is_paused: c.is_paused,
                        state_is_up: c.state_is_up,
                        state_changed_at: c.state_changed_at,
                    },
                )
            })
            .collect();
        Self { checks }
    }

    /// Number of cached checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether the cache holds no checks.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Look up a check's cached state.
    pub fn get(&self, pk: u64) -> Option<&CheckStatus> {
        self.checks.get(&pk)
    }

    /// Merge alert deltas into the cache. Alerts arrive newest-first (the
    /// API is queried with `ordering=-pk`); they are applied oldest-first so
    /// the newest alert per check overwrites the rest.
    pub fn apply_alerts(&mut self, mut alerts: Vec<Alert>) {
        alerts.reverse();
        for alert in alerts {
            self.apply(&alert);
        }
    }

    fn apply(&mut self, alert: &Alert) {
        match self.checks.get_mut(&alert.check_pk) {
            Some(check) => {
                check.state_is_up = alert.state_is_up;
                check.state_changed_at = Some(alert.created_at);
                info!(
                    check = %check.name,
                    state = if alert.state_is_up { "UP" } else { "DOWN" },
                    at = %alert.created_at,
                    "new alert"
                );
            }
            None => {
                // A check created since the last full reload; it shows up at
                // the next reload cycle.
                debug!(check_pk = alert.check_pk, "alert for unknown check, skipping");
            }
        }
    }

    /// All checks currently down, sorted by name.
    pub fn down_checks(&self) -> Vec<&CheckStatus> {
        let mut down: Vec<_> = self.checks.values().filter(|c| !c.state_is_up).collect();
        down.sort_by(|a, b| a.name.cmp(&b.name));
        down
    }

    /// Render the status report printed once per cycle.
    pub fn report(&self) -> String {
        let mut out = String::new();
        out.push_str("\n------------\nCHECK STATUS\n------------\n");
        out.push_str(&format!("{} total checks.\n", self.len()));

        let down = self.down_checks();
        if down.is_empty() {
            out.push_str("No checks are currently down.\n");
            return out;
        }
        for check in down {
            let since = check
                .state_changed_at
                .map_or_else(|| "unknown".to_owned(), |at| at.to_rfc3339());
            out.push_str(&format!("{:40} - DOWN since {}\n", check.name, since));
        }
        out
    }
}
