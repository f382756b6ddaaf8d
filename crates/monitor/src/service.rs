use std::time::Duration;

use chrono::Utc;
use eyre::Result;
use tracing::info;

use crate::status::StatusCache;
use client::UptimeClient;

/// One polling cycle per minute, the minimum interval at which new alerts
/// can be received.
pub const TICK: Duration = Duration::from_secs(60);

/// Every 15th cycle replaces the whole cache with a fresh full load; this is
/// the only path that discovers newly created or deleted checks.
pub const RELOAD_EVERY: u64 = 15;

/// Whether a cycle does a full reload instead of a delta merge.
pub const fn is_reload_cycle(cycle: u64) -> bool {
    cycle % RELOAD_EVERY == 0
}

/// Polls the account once a minute and prints which checks are down.
///
/// Cycle 0 (and every [`RELOAD_EVERY`]th cycle after it) reloads the full
/// check listing; every other cycle fetches the alerts raised since the
/// previous cycle started and merges them into the cache. The loop has no
/// terminal state; any API failure aborts the run, and Ctrl+C is the
/// expected way out.
#[derive(Debug)]
pub struct MonitorService {
    client: UptimeClient,
    cache: StatusCache,
}

impl MonitorService {
    /// Create a monitor over the given API client.
    pub fn new(client: UptimeClient) -> Self {
        Self { client, cache: StatusCache::default() }
    }

    async fn cycle(&mut self, cycle: u64, from: chrono::DateTime<Utc>) -> Result<()> {
        if is_reload_cycle(cycle) {
            info!(cycle, "loading all checks");
            self.cache = StatusCache::from_checks(self.client.list_checks().await?);
        } else {
            let alerts = self.client.list_alerts_since(from).await?;
            info!(cycle, alerts = alerts.len(), since = %from, "merging alert deltas");
            self.cache.apply_alerts(alerts);
        }
        Ok(())
    }

    /// Run the monitor loop until interrupted.
    pub async fn run(mut self) -> Result<()> {
        let mut interval = tokio::time::interval(TICK);
        let mut cycle: u64 = 0;
        let mut last_load = Utc::now();
        loop {
            interval.tick().await;
            let from = last_load;
            last_load = Utc::now();

            self.cycle(cycle, from).await?;
            println!("{}", self.cache.report());

            info!("waiting 1 minute, Ctrl+C to exit");
            cycle += 1;
        }
    }
}
