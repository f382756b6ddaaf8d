//! Delete every check left behind by the sample walkthrough.

use clap::Parser;
use client::UptimeClient;
use config::ApiOpts;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    if let Ok(custom_env_file) = std::env::var("ENV_FILE") {
        dotenvy::from_filename(custom_env_file)?;
    } else {
        dotenv().ok();
    }

    let opts = ApiOpts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let client = UptimeClient::new(opts.token, opts.api, opts.subaccount);
    let deleted = tasks::samples::delete_samples(&client).await?;
    info!(deleted, "done");
    Ok(())
}
