//! Create-and-verify suite covering every check archetype.
//!
//! Creates one or two checks of each type against known-good and known-bad
//! targets, waits for the probes to settle, then compares the observed
//! state against the expected outcome. Creation failures are logged and
//! skipped so the remaining archetypes still get exercised; this is the one
//! flow that is deliberately not fail-fast.

use std::time::Duration;

use eyre::Result;
use rand::Rng;
use tracing::{info, warn};

use api_types::{Check, CheckCommon, NewCheck};
use client::UptimeClient;

/// Fixed pause between creations, to stay within the API fair use limit.
pub const CREATE_DELAY: Duration = Duration::from_secs(10);

/// How long the probes get to settle before verification.
pub const SETTLE_MINUTES: u64 = 10;

/// Expected verification outcome for an archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// The target is reachable; the check should be up.
    Up,
    /// The target is broken; the check should be down.
    Down,
    /// The check type needs hours to produce a state; only the website can
    /// verify it.
    Unverifiable,
}

/// Assignments applied to every created check.
#[derive(Debug, Clone)]
pub struct SuiteParams {
    /// Contact groups to notify.
    pub contact_groups: Vec<String>,
    /// Probe locations.
    pub locations: Vec<String>,
    /// Tags to assign.
    pub tags: Vec<String>,
}

fn gen_name(label: &str) -> String {
    const HEX: &[u8] = b"0123456789abcdef";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..5).map(|_| HEX[rng.gen_range(0..HEX.len())] as char).collect();
    format!("API_TEST_{label}_{suffix}")
}

impl SuiteParams {
    fn common(&self, label: &str) -> CheckCommon {
        CheckCommon::new(
            gen_name(label),
            self.contact_groups.clone(),
            self.locations.clone(),
            self.tags.clone(),
        )
    }
}

/// The full archetype table: every check type with a working and a broken
/// target where the type supports quick verification.
pub fn archetypes(params: &SuiteParams) -> Vec<(NewCheck, Expected)> {
    let c = |label: &str| params.common(label);
    let udp_probe = format!("c{}", " ".repeat(47));
    vec![
        (NewCheck::api(c("API"), "https://uptime.com", "200"), Expected::Up),
        (NewCheck::api(c("API"), "https://uptime.com", "404"), Expected::Down),
        (NewCheck::http(c("HTTP"), "http://uptime.com"), Expected::Up),
        (NewCheck::http(c("HTTP"), "http://fakeserver123.com"), Expected::Down),
        (NewCheck::icmp(c("ICMP"), "1.1.1.1"), Expected::Up),
        (NewCheck::icmp(c("ICMP"), "1.2.3.4"), Expected::Down),
        (NewCheck::ntp(c("NTP"), "0.north-america.pool.ntp.org"), Expected::Up),
        (NewCheck::ntp(c("NTP"), "ntp.fakeserver123.com"), Expected::Down),
        (NewCheck::tcp(c("TCP"), "uptime.com", 80, "", ""), Expected::Up),
        (NewCheck::tcp(c("TCP"), "fakeserver123.com", 80, "test", "test"), Expected::Down),
        (NewCheck::transaction(c("TRANSACTION"), "http://uptime.com", "200"), Expected::Up),
        (NewCheck::transaction(c("TRANSACTION"), "http://uptime.com", "404"), Expected::Down),
        (NewCheck::pop(c("POP"), "pop.yandex.com", 995, true), Expected::Up),
        (NewCheck::pop(c("POP"), "pop.fakeserver123.com", 995, true), Expected::Down),
        (NewCheck::imap(c("IMAP"), "imap.yandex.com", 993, true), Expected::Up),
        (NewCheck::imap(c("IMAP"), "imap.fakeserver123.com", 993, true), Expected::Down),
        (NewCheck::smtp(c("SMTP"), "aspmx.l.google.com", 25, true), Expected::Up),
        (NewCheck::smtp(c("SMTP"), "smtp.fakeserver123.com", 465, true), Expected::Down),
        (NewCheck::udp(c("UDP"), "1.2.3.4", 53, "uptime.com", "test"), Expected::Down),
        (
            NewCheck::udp(c("UDP"), "0.north-america.pool.ntp.org", 123, &udp_probe, "$"),
            Expected::Up,
        ),
        (NewCheck::ssh(c("SSH"), "ssh.fakeserver123.com", 22), Expected::Down),
        (NewCheck::ssh(c("SSH"), "sdf.org", 22), Expected::Up),
        (NewCheck::dns(c("DNS"), "uptime.com", "1.2.3.4"), Expected::Down),
        (NewCheck::dns(c("DNS"), "ssh.blinkenshell.org", "194.14.45.10"), Expected::Up),
        // These check types need several hours to produce a state.
        (NewCheck::rum(c("RUM"), "uptime.com"), Expected::Unverifiable),
        (NewCheck::blacklist(c("BLACKLIST"), "uptime.com"), Expected::Unverifiable),
        (NewCheck::malware(c("MALWARE"), "uptime.com"), Expected::Unverifiable),
        (NewCheck::ssl_cert(c("SSL"), "uptime.com", 443, "http"), Expected::Unverifiable),
        (NewCheck::ssl_cert(c("SSL"), "expired.badssl.com", 443, "http"), Expected::Unverifiable),
        (
            NewCheck::whois(c("WHOIS"), "uptime.com", 30, Some("uniregistrar corp"), None),
            Expected::Unverifiable,
        ),
        (
            NewCheck::whois(c("WHOIS"), "uptime.com", 30, None, Some(&["false-server.com"])),
            Expected::Unverifiable,
        ),
    ]
}

async fn create_all(
    client: &UptimeClient,
    params: &SuiteParams,
    create_delay: Duration,
) -> Vec<(Check, Expected)> {
    let mut created = Vec::new();
    for (check, expected) in archetypes(params) {
        match client.create_check(&check).await {
            Ok(record) => {
                info!(
                    check_type = record.check_type.as_deref().unwrap_or("?"),
                    name = %record.name,
                    pk = record.pk,
                    "created check"
                );
                created.push((record, expected));
            }
            Err(e) => {
                warn!(endpoint = check.endpoint(), error = %e, "failed to create check");
            }
        }
        tokio::time::sleep(create_delay).await;
    }
    created
}

async fn verify_all(client: &UptimeClient, created: &[(Check, Expected)]) -> Result<usize> {
    let mut mismatches = 0;
    for (record, expected) in created {
        let expected_up = match expected {
            Expected::Up => true,
            Expected::Down => false,
            Expected::Unverifiable => {
                info!(pk = record.pk, "status can only be checked using the website");
                continue;
            }
        };
        let current = client.get_check(record.pk).await?;
        if current.state_is_up != expected_up {
            warn!(
                pk = record.pk,
                name = %current.name,
                observed = if current.state_is_up { "UP" } else { "DOWN" },
                expected = if expected_up { "UP" } else { "DOWN" },
                "check status is not as expected"
            );
            mismatches += 1;
        }
    }
    Ok(mismatches)
}

/// Run the whole suite: create every archetype (pausing `create_delay`
/// between creations), wait `settle_minutes`, then verify. Returns the
/// number of state mismatches.
pub async fn run(
    client: &UptimeClient,
    params: &SuiteParams,
    create_delay: Duration,
    settle_minutes: u64,
) -> Result<usize> {
    info!("creating checks");
    let created = create_all(client, params, create_delay).await;
    info!(created = created.len(), "all creations attempted");

    for remaining in (1..=settle_minutes).rev() {
        info!(minutes = remaining, "waiting for checks to settle");
        tokio::time::sleep(Duration::from_secs(60)).await;
    }

    info!("checking statuses");
    let mismatches = verify_all(client, &created).await?;
    info!(mismatches, "verification finished");
    Ok(mismatches)
}

#[cfg(test)]
mod tests {
    use super::*;

    use mockito::Matcher;
    use serde_json::json;
    use url::Url;

    fn params() -> SuiteParams {
        SuiteParams {
            contact_groups: vec!["Default".to_owned()],
            locations: vec!["US-East".to_owned(), "US-West".to_owned()],
            tags: vec![],
        }
    }

    #[test]
    fn table_covers_every_archetype() {
        let table = archetypes(&params());
        assert_eq!(table.len(), 31);

        let mut endpoints: Vec<_> = table.iter().map(|(c, _)| c.endpoint()).collect();
        endpoints.sort_unstable();
        endpoints.dedup();
        assert_eq!(endpoints.len(), 17, "all 17 creation endpoints exercised");

        let up = table.iter().filter(|(_, e)| *e == Expected::Up).count();
        let down = table.iter().filter(|(_, e)| *e == Expected::Down).count();
        let unverifiable =
            table.iter().filter(|(_, e)| *e == Expected::Unverifiable).count();
        assert_eq!((up, down, unverifiable), (12, 12, 7));
    }

    #[test]
    fn generated_names_have_type_label_and_random_suffix() {
        let name = gen_name("HTTP");
        assert!(name.starts_with("API_TEST_HTTP_"));
        let suffix = name.rsplit('_').next().unwrap();
        assert_eq!(suffix.len(), 5);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
        // Vanishingly unlikely to collide.
        assert_ne!(gen_name("HTTP"), name);
    }

    #[tokio::test]
    async fn creation_failures_are_skipped_not_fatal() {
        let mut server = mockito::Server::new_async().await;
        // Every archetype endpoint rejects the payload...
        let _reject_all = server
            .mock("POST", Matcher::Regex(r"^/api/v1/checks/add-.*/$".to_owned()))
            .with_status(200)
            .with_body(
                json!({
                    "messages": {
                        "errors": true,
                        "error_code": "VALIDATION_ERROR",
                        "error_message": "Validation error."
                    }
                })
                .to_string(),
            )
            .expect(31)
            .create_async()
            .await;

        let base = Url::parse(&format!("{}/api/v1/", server.url())).unwrap();
        let client = UptimeClient::new("tok".to_owned(), base, None);
        // ...and the suite still finishes with nothing to verify.
        let mismatches = run(&client, &params(), Duration::ZERO, 0).await.unwrap();
        assert_eq!(mismatches, 0);
    }

    #[tokio::test]
    async fn verification_reports_state_mismatches() {
        let mut server = mockito::Server::new_async().await;
        let created = [
            (
                Check {
                    pk: 1,
                    name: "API_TEST_HTTP_00001".to_owned(),
                    check_type: Some("HTTP".to_owned()),
                    is_paused: false,
                    state_is_up: false,
                    state_changed_at: None,
                    contact_groups: vec![],
                    locations: vec![],
                    tags: vec![],
                },
                Expected::Up,
            ),
            (
                Check {
                    pk: 2,
                    name: "API_TEST_RUM_00002".to_owned(),
                    check_type: Some("RUM".to_owned()),
                    is_paused: false,
                    state_is_up: false,
                    state_changed_at: None,
                    contact_groups: vec![],
                    locations: vec![],
                    tags: vec![],
                },
                Expected::Unverifiable,
            ),
        ];
        // Check 1 settled DOWN although UP was expected; check 2 is never
        // fetched.
        let fetched = server
            .mock("GET", "/api/v1/checks/1/")
            .with_body(
                json!({ "pk": 1, "name": "API_TEST_HTTP_00001", "state_is_up": false })
                    .to_string(),
            )
            .expect(1)
            .create_async()
            .await;
        let skipped = server.mock("GET", "/api/v1/checks/2/").expect(0).create_async().await;

        let base = Url::parse(&format!("{}/api/v1/", server.url())).unwrap();
        let client = UptimeClient::new("tok".to_owned(), base, None);
        let mismatches = verify_all(&client, &created).await.unwrap();

        assert_eq!(mismatches, 1);
        fetched.assert_async().await;
        skipped.assert_async().await;
    }
}
