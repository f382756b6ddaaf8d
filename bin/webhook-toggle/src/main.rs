//! Interactively flip webhook-driven checks up or down.

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use config::WebhookOpts;
use dotenvy::dotenv;
use tasks::webhook::Toggler;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::filter::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    if let Ok(custom_env_file) = std::env::var("ENV_FILE") {
        dotenvy::from_filename(custom_env_file)?;
    } else {
        dotenv().ok();
    }

    let opts = WebhookOpts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let http = reqwest::Client::new();
    let mut toggler = Toggler::new(opts.webhooks);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{}", toggler.prompt());
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => line,
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        };

        if let Some(submission) = toggler.feed(&line) {
            client::post_webhook(&http, &submission.url, submission.state_is_up).await?;
            let state = if submission.state_is_up { "UP" } else { "DOWN" };
            println!("\nSet {} to {state}", submission.name);
            // Give the service a moment to process the state change.
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
    }

    println!("\nbye!");
    Ok(())
}
