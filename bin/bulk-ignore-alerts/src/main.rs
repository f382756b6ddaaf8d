//! Bulk-ignore outage alerts by check name prefix and date range.

use clap::Parser;
use client::UptimeClient;
use config::BulkIgnoreOpts;
use dotenvy::dotenv;
use tasks::bulk_ignore::{self, IGNORE_DELAY};
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    if let Ok(custom_env_file) = std::env::var("ENV_FILE") {
        dotenvy::from_filename(custom_env_file)?;
    } else {
        dotenv().ok();
    }

    let opts = BulkIgnoreOpts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let client = UptimeClient::new(opts.api.token, opts.api.api, opts.api.subaccount);
    let ignored =
        bulk_ignore::run(&client, opts.from_date, opts.to_date, &opts.prefix, IGNORE_DELAY)
            .await?;
    info!(ignored, "done");
    Ok(())
}
