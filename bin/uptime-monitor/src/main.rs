//! Real-time check and alert monitor.

use clap::Parser;
use client::UptimeClient;
use config::MonitorOpts;
use dotenvy::dotenv;
use monitor::MonitorService;
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    if let Ok(custom_env_file) = std::env::var("ENV_FILE") {
        dotenvy::from_filename(custom_env_file)?;
    } else {
        dotenv().ok();
    }

    let opts = MonitorOpts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(api = %opts.api.api, "monitor starting");

    let client = UptimeClient::new(opts.api.token, opts.api.api, opts.api.subaccount);
    MonitorService::new(client).run().await
}
