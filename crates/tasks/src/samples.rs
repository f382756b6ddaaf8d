//! Sample-check lifecycle: a numbered create/update walkthrough, and the
//! cleanup tool that deletes everything the walkthrough created.

use eyre::Result;
use serde_json::json;
use tracing::{info, warn};

use api_types::{CheckCommon, NewCheck, NewTag};
use client::UptimeClient;

/// Name prefix shared by all sample checks, used by the cleanup tool.
pub const SAMPLE_PREFIX: &str = "API Sample:";

fn print_step<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => warn!(error = %e, "unprintable response"),
    }
}

/// Exercise the check CRUD surface end to end: create a sample HTTP check,
/// patch its interval, replace its contacts/locations/tags, pause and
/// resume it. Every step prints the response; the first failure aborts,
/// except tag creation, which may legitimately report the tag already
/// exists.
pub async fn run_walkthrough(client: &UptimeClient) -> Result<()> {
    println!("\n1. Creating HTTP check...");
    let common = CheckCommon::new(
        format!("{SAMPLE_PREFIX} HTTP Create & Update"),
        vec!["Default".to_owned()],
        vec!["US-East".to_owned(), "US-West".to_owned(), "GBR".to_owned()],
        vec![],
    );
    // Only the target and a 5-minute interval are sent; the rest of the
    // check's configuration is left to service defaults.
    let new_check = NewCheck::http_basic(common, "http://google.com", 5);
    let check = client.create_check(&new_check).await?;
    print_step(&check);

    println!("\n2. Updating interval...");
    print_step(&client.update_check(check.pk, &json!({ "msp_interval": 3 })).await?);

    println!("\n3. Updating contacts...");
    print_step(&client.replace_contact_groups(check.pk, &["Default".to_owned()]).await?);

    println!("\n4. Updating locations...");
    print_step(
        &client
            .replace_locations(check.pk, &["US-East".to_owned(), "GBR".to_owned()])
            .await?,
    );

    println!("\n5. Creating tag...");
    let tag = NewTag { tag: "API Sample Tag".to_owned(), color_hex: "#51e898".to_owned() };
    match client.create_tag(&tag).await {
        Ok(response) => print_step(&response),
        // The tag survives previous runs; reuse it.
        Err(e) => warn!(error = %e, "tag not created"),
    }

    println!("\n6. Assigning tag to check...");
    print_step(&client.replace_tags(check.pk, &["API Sample Tag".to_owned()]).await?);

    println!("\n7. Pause check...");
    print_step(&client.pause_check(check.pk).await?);

    println!("\n8. Resume check...");
    print_step(&client.resume_check(check.pk).await?);

    Ok(())
}

/// Delete every check whose name starts with [`SAMPLE_PREFIX`]. The search
/// endpoint matches loosely, so the prefix is re-checked client-side before
/// anything is deleted.
pub async fn delete_samples(client: &UptimeClient) -> Result<usize> {
    info!(search = SAMPLE_PREFIX, "searching for sample checks");
    let checks = client.search_checks(SAMPLE_PREFIX).await?;

    let mut deleted = 0;
    for check in checks {
        if check.name.starts_with(SAMPLE_PREFIX) {
            info!(check = %check.name, pk = check.pk, "deleting sample check");
            client.delete_check(check.pk).await?;
            deleted += 1;
        }
    }
    info!(deleted, "sample cleanup finished");
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    use mockito::Matcher;
    use serde_json::json;
    use url::Url;

    fn client_for(server: &mockito::Server) -> UptimeClient {
        let base = Url::parse(&format!("{}/api/v1/", server.url())).unwrap();
        UptimeClient::new("tok".to_owned(), base, None)
    }

    #[tokio::test]
    async fn delete_samples_rechecks_the_prefix() {
        let mut server = mockito::Server::new_async().await;
        let _search = server
            .mock("GET", "/api/v1/checks/")
            .match_query(Matcher::UrlEncoded("search".into(), SAMPLE_PREFIX.into()))
            .with_body(
                json!({
                    "results": [
                        { "pk": 1, "name": "API Sample: HTTP Create & Update" },
                        { "pk": 2, "name": "Mentions API Sample: in the middle" }
                    ],
                    "next": null
                })
                .to_string(),
            )
            .create_async()
            .await;
        let deleted = server
            .mock("DELETE", "/api/v1/checks/1/")
            .with_status(204)
            .expect(1)
            .create_async()
            .await;
        let kept = server
            .mock("DELETE", "/api/v1/checks/2/")
            .expect(0)
            .create_async()
            .await;

        let count = delete_samples(&client_for(&server)).await.unwrap();
        assert_eq!(count, 1);
        deleted.assert_async().await;
        kept.assert_async().await;
    }

    #[tokio::test]
    async fn walkthrough_drives_the_full_crud_surface() {
        let mut server = mockito::Server::new_async().await;
        // Exact body match: nothing beyond the target, interval and
        // assignments may be posted.
        let created = server
            .mock("POST", "/api/v1/checks/add-http/")
            .match_body(Matcher::Json(json!({
                "name": "API Sample: HTTP Create & Update",
                "contact_groups": ["Default"],
                "locations": ["US-East", "US-West", "GBR"],
                "tags": [],
                "msp_interval": 5,
                "msp_address": "http://google.com"
            })))
            .with_body(
                json!({ "results": { "pk": 7, "name": "API Sample: HTTP Create & Update" } })
                    .to_string(),
            )
            .expect(1)
            .create_async()
            .await;
        let patched = server
            .mock("PATCH", "/api/v1/checks/7/")
            .match_body(Matcher::Json(json!({ "msp_interval": 3 })))
            .with_body("{}")
            .expect(1)
            .create_async()
            .await;
        let contacts = server
            .mock("PATCH", "/api/v1/checks/7/replace-contact-groups/")
            .with_body("{}")
            .expect(1)
            .create_async()
            .await;
        let locations = server
            .mock("PATCH", "/api/v1/checks/7/replace-locations/")
            .match_body(Matcher::Json(json!({ "locations": ["US-East", "GBR"] })))
            .with_body("{}")
            .expect(1)
            .create_async()
            .await;
        // Tag creation failing must not abort the walkthrough.
        let tag = server
            .mock("POST", "/api/v1/check-tags/")
            .with_status(400)
            .expect(1)
            .create_async()
            .await;
        let tags = server
            .mock("PATCH", "/api/v1/checks/7/replace-tags/")
            .with_body("{}")
            .expect(1)
            .create_async()
            .await;
        let paused = server
            .mock("POST", "/api/v1/checks/7/pause/")
            .with_body("{}")
            .expect(1)
            .create_async()
            .await;
        let resumed = server
            .mock("POST", "/api/v1/checks/7/resume/")
            .with_body("{}")
            .expect(1)
            .create_async()
            .await;

        run_walkthrough(&client_for(&server)).await.unwrap();
        for mock in [created, patched, contacts, locations, tag, tags, paused, resumed] {
            mock.assert_async().await;
        }
    }
}
