//! Download daily statistics for every check and print them as JSON.

use clap::Parser;
use client::UptimeClient;
use config::StatsOpts;
use dotenvy::dotenv;
use tracing_subscriber::filter::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    if let Ok(custom_env_file) = std::env::var("ENV_FILE") {
        dotenvy::from_filename(custom_env_file)?;
    } else {
        dotenv().ok();
    }

    let opts = StatsOpts::parse();

    // Progress goes to stderr so the JSON on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = UptimeClient::new(opts.api.token, opts.api.api, opts.api.subaccount);
    tasks::stats::run(&client, opts.date).await
}
