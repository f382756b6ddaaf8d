//! Command-line configuration for the uptimectl tools.
//!
//! Each binary parses its own option struct; the [`ApiOpts`] block shared by
//! every tool is flattened in. Values fall back to environment variables so
//! tokens can live in a `.env` file instead of shell history.

use chrono::NaiveDate;
use clap::Parser;
use url::Url;

/// The production API base URL.
pub const DEFAULT_API_BASE: &str = "https://uptime.com/api/v1/";

/// API connection options shared by every tool.
#[derive(Debug, Clone, Parser)]
pub struct ApiOpts {
    /// Your Uptime.com API token
    #[clap(long, env = "UPTIME_TOKEN")]
    pub token: String,
    /// The API endpoint to use
    #[clap(long, env = "UPTIME_API", default_value = DEFAULT_API_BASE)]
    pub api: Url,
    /// A subaccount to process instead of the main account
    #[clap(long, env = "UPTIME_SUBACCOUNT")]
    pub subaccount: Option<u64>,
}

/// Options for the real-time check/alert monitor.
#[derive(Debug, Clone, Parser)]
#[clap(about = "Monitor checks & alerts in real-time without exceeding API fair use limits")]
pub struct MonitorOpts {
    /// API connection options
    #[clap(flatten)]
    pub api: ApiOpts,
}

/// Options for the bulk alert-ignore tool.
#[derive(Debug, Clone, Parser)]
#[clap(about = "Ignore alerts between date ranges for one or more checks")]
pub struct BulkIgnoreOpts {
    /// API connection options
    #[clap(flatten)]
    pub api: ApiOpts,
    /// The earliest date to ignore alerts from, in YYYY-MM-DD format
    #[clap(long = "from")]
    pub from_date: NaiveDate,
    /// The latest date to ignore alerts from, in YYYY-MM-DD format
    #[clap(long = "to")]
    pub to_date: NaiveDate,
    /// The check name or check name prefix to ignore alerts for
    #[clap(long)]
    pub prefix: String,
}

/// Options for the bulk statistics downloader.
#[derive(Debug, Clone, Parser)]
#[clap(about = "Download stats in bulk for all checks")]
pub struct StatsOpts {
    /// API connection options
    #[clap(flatten)]
    pub api: ApiOpts,
    /// Date to start saving statistics from, YYYY-MM-DD
    #[clap(short, long)]
    pub date: NaiveDate,
}

/// Options for the create-and-verify check suite.
#[derive(Debug, Clone, Parser)]
#[clap(about = "Create and test all kinds of checks")]
pub struct SuiteOpts {
    /// API connection options
    #[clap(flatten)]
    pub api: ApiOpts,
    /// Comma separated list of existing contact groups to assign to checks
    #[clap(long)]
    pub contacts: String,
    /// Comma separated list of available locations to assign to checks
    #[clap(long, default_value = "US-East,US-West")]
    pub locations: String,
    /// Comma separated list of existing tags to assign to checks
    #[clap(long)]
    pub tags: Option<String>,
}

fn split_csv(value: &str) -> Vec<String> {
    value.split(',').filter(|s| !s.is_empty()).map(|s| s.to_owned()).collect()
}

impl SuiteOpts {
    /// Contact groups as a list.
    pub fn contact_groups(&self) -> Vec<String> {
        split_csv(&self.contacts)
    }

    /// Locations as a list.
    pub fn location_list(&self) -> Vec<String> {
        split_csv(&self.locations)
    }

    /// Tags as a list; empty when none were given.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags.as_deref().map(split_csv).unwrap_or_default()
    }
}

/// A named webhook endpoint for the interactive toggler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookTarget {
    /// Display name of the check behind the webhook.
    pub name: String,
    /// Webhook URL to POST state changes to.
    pub url: String,
}

fn parse_webhook(value: &str) -> Result<WebhookTarget, String> {
    match value.split_once('=') {
        Some((name, url)) if !name.is_empty() && !url.is_empty() => {
            Ok(WebhookTarget { name: name.to_owned(), url: url.to_owned() })
        }
        _ => Err(format!("expected NAME=URL, got {value:?}")),
    }
}

/// Options for the interactive webhook check toggler.
#[derive(Debug, Clone, Parser)]
#[clap(about = "Toggle webhook-driven checks up or down interactively")]
pub struct WebhookOpts {
    /// Webhook check as NAME=URL; repeat for each check
    #[clap(long = "webhook", value_parser = parse_webhook, required = true)]
    pub webhooks: Vec<WebhookTarget>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn test_verify_cli() {
        MonitorOpts::command().debug_assert();
        BulkIgnoreOpts::command().debug_assert();
        StatsOpts::command().debug_assert();
        SuiteOpts::command().debug_assert();
        WebhookOpts::command().debug_assert();
    }

    #[test]
    fn bulk_ignore_parses_dates_and_prefix() {
        let opts = BulkIgnoreOpts::parse_from([
            "bulk-ignore-alerts",
            "--token",
            "tok",
            "--from",
            "2025-01-01",
            "--to",
            "2025-01-31",
            "--prefix",
            "LOADTEST",
        ]);
        assert_eq!(opts.from_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(opts.to_date, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
        assert_eq!(opts.prefix, "LOADTEST");
        assert_eq!(opts.api.api.as_str(), DEFAULT_API_BASE);
        assert!(opts.api.subaccount.is_none());
    }

    #[test]
    fn suite_opts_split_lists() {
        let opts = SuiteOpts::parse_from([
            "check-suite",
            "--token",
            "tok",
            "--contacts",
            "Default,Ops",
            "--tags",
            "smoke",
        ]);
        assert_eq!(opts.contact_groups(), ["Default", "Ops"]);
        assert_eq!(opts.location_list(), ["US-East", "US-West"]);
        assert_eq!(opts.tag_list(), ["smoke"]);
    }

    #[test]
    fn webhook_pairs_parse_and_reject_garbage() {
        let opts =
            WebhookOpts::parse_from(["webhook-toggle", "--webhook", "Check One=https://x/hook"]);
        assert_eq!(opts.webhooks[0].name, "Check One");
        assert_eq!(opts.webhooks[0].url, "https://x/hook");

        assert!(parse_webhook("no-separator").is_err());
        assert!(parse_webhook("=https://x/hook").is_err());
    }
}
