//! Bulk-ignore alerts for checks matching a name prefix.

use std::time::Duration;

use chrono::NaiveDate;
use eyre::Result;
use tracing::info;

use api_types::Outage;
use client::UptimeClient;

/// Fixed pause between ignore actions, to stay within the API fair use
/// limit.
pub const IGNORE_DELAY: Duration = Duration::from_millis(2200);

/// Whether an outage's alert should be ignored: not already ignored, and the
/// check name starts with the given prefix (byte-exact, case-sensitive).
pub fn should_ignore(outage: &Outage, prefix: &str) -> bool {
    !outage.ignored && outage.check_name.starts_with(prefix)
}

/// Walk the outages between two dates and ignore every matching alert,
/// pausing `delay` between actions. The first failed ignore aborts the whole
/// run; records are never skipped past an error.
pub async fn run(
    client: &UptimeClient,
    from: NaiveDate,
    to: NaiveDate,
    prefix: &str,
    delay: Duration,
) -> Result<usize> {
    let mut page = 1;
    let mut ignored = 0;
    loop {
        let outages = client.outages_page(from, to, page).await?;
        if outages.is_empty() {
            break;
        }
        for outage in &outages {
            if should_ignore(outage, prefix) {
                info!(check = %outage.check_name, at = %outage.created_at, "ignoring alert");
                client.ignore_alert(&outage.ignore_alert_url).await?;
                ignored += 1;
                tokio::time::sleep(delay).await;
            }
        }
        page += 1;
    }
    Ok(ignored)
}
