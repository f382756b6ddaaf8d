//! Bulk statistics download for every check in the account.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use eyre::Result;
use serde_json::{Map, Value};
use tracing::info;

use api_types::Page;
use client::UptimeClient;

fn merge_stat(record: &mut Map<String, Value>, stat: Value) {
    if let Value::Object(stat) = stat {
        for (key, value) in stat {
            record.insert(key, value);
        }
    }
}

/// Load info and stats for all checks, page by page: each page of `checks/`
/// is followed by one `checks/bulk/stats/` call for that page's pks, and the
/// stat fields are merged into the check records. Returns the merged records
/// ordered by pk.
pub async fn collect(client: &UptimeClient, from: NaiveDate) -> Result<Vec<Value>> {
    let mut page = 1;
    let mut by_pk: BTreeMap<u64, Map<String, Value>> = BTreeMap::new();
    loop {
        let result: Page<Value> = client.checks_page(page, None).await?;
        let next = result.next;

        let mut pks = Vec::with_capacity(result.results.len());
        for record in result.results {
            if let Value::Object(map) = record {
                if let Some(pk) = map.get("pk").and_then(Value::as_u64) {
                    pks.push(pk);
                    by_pk.insert(pk, map);
                }
            }
        }

        info!(page, checks = pks.len(), "reading check stats");
        for stat in client.bulk_stats(&pks, from).await? {
            if let Some(pk) = stat.get("pk").and_then(Value::as_u64) {
                if let Some(record) = by_pk.get_mut(&pk) {
                    merge_stat(record, stat);
                }
            }
        }

        if next.is_none() {
            break;
        }
        page += 1;
    }
    Ok(by_pk.into_values().map(Value::Object).collect())
}

/// Download all stats from `from` onwards and print them as pretty JSON.
pub async fn run(client: &UptimeClient, from: NaiveDate) -> Result<()> {
    let stats = collect(client, from).await?;
    println!("{}", serde_json::to_string_pretty(&Value::Array(stats))?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use mockito::Matcher;
    use serde_json::json;
    use url::Url;

    #[test]
    fn stat_fields_overwrite_check_fields() {
        let mut record = json!({ "pk": 1, "name": "a", "uptime": 0.5 })
            .as_object()
            .cloned()
            .unwrap();
        merge_stat(&mut record, json!({ "uptime": 0.99, "outages": 2 }));
        assert_eq!(record["uptime"], json!(0.99));
        assert_eq!(record["outages"], json!(2));
        assert_eq!(record["name"], json!("a"));
    }

    #[tokio::test]
    async fn collect_merges_stats_per_page_and_sorts_by_pk() {
        let mut server = mockito::Server::new_async().await;
        let _checks = server
            .mock("GET", "/api/v1/checks/")
            .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
            .with_body(
                json!({
                    "results": [
                        { "pk": 9, "name": "late" },
                        { "pk": 3, "name": "early" }
                    ],
                    "next": null
                })
                .to_string(),
            )
            .create_async()
            .await;
        let stats = server
            .mock("GET", "/api/v1/checks/bulk/stats/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("pk".into(), "9,3".into()),
                Matcher::UrlEncoded("include_alerts".into(), "1".into()),
            ]))
            .with_body(
                json!({
                    "checks": [
                        { "pk": 9, "uptime": 0.9 },
                        { "pk": 3, "uptime": 1.0 }
                    ]
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let base = Url::parse(&format!("{}/api/v1/", server.url())).unwrap();
        let client = UptimeClient::new("tok".to_owned(), base, None);
        let from = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let records = collect(&client, from).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["pk"], json!(3), "records ordered by pk");
        assert_eq!(records[0]["uptime"], json!(1.0));
        assert_eq!(records[1]["name"], json!("late"));
        stats.assert_async().await;
    }
}
