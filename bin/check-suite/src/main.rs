//! Create one check of every type and verify the resulting states.

use clap::Parser;
use client::UptimeClient;
use config::SuiteOpts;
use dotenvy::dotenv;
use tasks::suite::{self, CREATE_DELAY, SETTLE_MINUTES, SuiteParams};
use tracing::warn;
use tracing_subscriber::filter::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    if let Ok(custom_env_file) = std::env::var("ENV_FILE") {
        dotenvy::from_filename(custom_env_file)?;
    } else {
        dotenv().ok();
    }

    let opts = SuiteOpts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let params = SuiteParams {
        contact_groups: opts.contact_groups(),
        locations: opts.location_list(),
        tags: opts.tag_list(),
    };
    let client = UptimeClient::new(opts.api.token, opts.api.api, opts.api.subaccount);

    let mismatches = suite::run(&client, &params, CREATE_DELAY, SETTLE_MINUTES).await?;
    if mismatches > 0 {
        warn!(mismatches, "some checks did not settle into the expected state");
    }
    Ok(())
}
