//! The endpoint surface and pagination walkers.
//!
//! Each listing endpoint keeps the termination signal the service actually
//! exhibits: `checks/` carries a `next` cursor, `alerts/` ends on a page
//! shorter than the requested size, and `outages/` ends on an empty page.
//! The walkers are not unified on purpose; none has an internal page cap.

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::{PAGE_SIZE, UptimeClient};
use crate::error::Error;
use api_types::{Alert, Check, NewCheck, NewTag, Outage, Page};

#[derive(Debug, Deserialize)]
struct BulkStats {
    checks: Vec<Value>,
}

impl UptimeClient {
    /// One page of `checks/`, optionally filtered by a search term. Generic
    /// so the stats downloader can keep the full raw records while other
    /// callers take typed [`Check`]s.
    pub async fn checks_page<T: DeserializeOwned>(
        &self,
        page: u32,
        search: Option<&str>,
    ) -> Result<Page<T>, Error> {
        let mut query = vec![
            ("page", page.to_string()),
            ("page_size", PAGE_SIZE.to_string()),
        ];
        if let Some(search) = search {
            query.push(("search", search.to_owned()));
        }
        self.request(Method::GET, "checks/", &query, None).await
    }

    /// All checks in the account, following the `next` cursor across pages.
    pub async fn list_checks(&self) -> Result<Vec<Check>, Error> {
        let mut page = 1;
        let mut all = Vec::new();
        loop {
            let result: Page<Check> = self.checks_page(page, None).await?;
            all.extend(result.results);
            if result.next.is_none() {
                break;
            }
            page += 1;
        }
        Ok(all)
    }

    /// The first page of checks matching a search term.
    pub async fn search_checks(&self, search: &str) -> Result<Vec<Check>, Error> {
        Ok(self.checks_page(1, Some(search)).await?.results)
    }

    /// One page of `alerts/` raised after `start`, newest first.
    pub async fn alerts_page(
        &self,
        start: DateTime<Utc>,
        page: u32,
    ) -> Result<Vec<Alert>, Error> {
        let query = [
            ("ordering", "-pk".to_owned()),
            ("start_date", start.to_rfc3339()),
            ("page_size", PAGE_SIZE.to_string()),
            ("page", page.to_string()),
        ];
        let result: Page<Alert> = self.request(Method::GET, "alerts/", &query, None).await?;
        Ok(result.results)
    }

    /// All alerts raised after `start`, newest first. This endpoint signals
    /// the end of the listing with a short page rather than a cursor.
    pub async fn list_alerts_since(&self, start: DateTime<Utc>) -> Result<Vec<Alert>, Error> {
        let mut page = 1;
        let mut all = Vec::new();
        loop {
            let results = self.alerts_page(start, page).await?;
            let short = results.len() < PAGE_SIZE as usize;
            all.extend(results);
            if short {
                break;
            }
            page += 1;
        }
        Ok(all)
    }

    /// One page of `outages/` between two dates.
    pub async fn outages_page(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        page: u32,
    ) -> Result<Vec<Outage>, Error> {
        let query = [
            ("start_date", from.to_string()),
            ("end_date", to.to_string()),
            ("page_size", PAGE_SIZE.to_string()),
            ("page", page.to_string()),
        ];
        let result: Page<Outage> = self.request(Method::GET, "outages/", &query, None).await?;
        Ok(result.results)
    }

    /// All outages between two dates. This endpoint terminates on an empty
    /// page.
    pub async fn list_outages(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Outage>, Error> {
        let mut page = 1;
        let mut all = Vec::new();
        loop {
            let results = self.outages_page(from, to, page).await?;
            if results.is_empty() {
                break;
            }
            all.extend(results);
            page += 1;
        }
        Ok(all)
    }

    /// Create a check via its type-specific endpoint, returning the created
    /// record. A rejection in the response envelope surfaces as
    /// [`Error::Api`] with the per-field details.
    pub async fn create_check(&self, check: &NewCheck) -> Result<Check, Error> {
        let body = serde_json::to_value(check)
            .map_err(|e| Error::from(crate::error::TransportError::decode(&e)))?;
        self.fetch(Method::POST, check.endpoint(), &[], Some(&body)).await
    }

    /// Fetch a single check.
    pub async fn get_check(&self, pk: u64) -> Result<Check, Error> {
        self.fetch(Method::GET, &format!("checks/{pk}/"), &[], None).await
    }

    /// Partially update a check.
    pub async fn update_check(&self, pk: u64, patch: &Value) -> Result<Value, Error> {
        self.fetch(Method::PATCH, &format!("checks/{pk}/"), &[], Some(patch)).await
    }

    /// Delete a check. The service answers with an empty body, so nothing
    /// is decoded.
    pub async fn delete_check(&self, pk: u64) -> Result<(), Error> {
        let url = self.endpoint(&format!("checks/{pk}/"))?;
        self.request_discard(Method::DELETE, url, None).await
    }

    /// Pause a check.
    pub async fn pause_check(&self, pk: u64) -> Result<Value, Error> {
        self.fetch(Method::POST, &format!("checks/{pk}/pause/"), &[], None).await
    }

    /// Resume a paused check.
    pub async fn resume_check(&self, pk: u64) -> Result<Value, Error> {
        self.fetch(Method::POST, &format!("checks/{pk}/resume/"), &[], None).await
    }

    /// Replace a check's contact group assignments.
    pub async fn replace_contact_groups(
        &self,
        pk: u64,
        contact_groups: &[String],
    ) -> Result<Value, Error> {
        let body = serde_json::json!({ "contact_groups": contact_groups });
        self.fetch(Method::PATCH, &format!("checks/{pk}/replace-contact-groups/"), &[], Some(&body))
            .await
    }

    /// Replace a check's probe locations.
    pub async fn replace_locations(&self, pk: u64, locations: &[String]) -> Result<Value, Error> {
        let body = serde_json::json!({ "locations": locations });
        self.fetch(Method::PATCH, &format!("checks/{pk}/replace-locations/"), &[], Some(&body))
            .await
    }

    /// Replace a check's tags.
    pub async fn replace_tags(&self, pk: u64, tags: &[String]) -> Result<Value, Error> {
        let body = serde_json::json!({ "tags": tags });
        self.fetch(Method::PATCH, &format!("checks/{pk}/replace-tags/"), &[], Some(&body)).await
    }

    /// Create a check tag.
    pub async fn create_tag(&self, tag: &NewTag) -> Result<Value, Error> {
        let body = serde_json::to_value(tag)
            .map_err(|e| Error::from(crate::error::TransportError::decode(&e)))?;
        self.fetch(Method::POST, "check-tags/", &[], Some(&body)).await
    }

    /// Mark an outage's alert ignored via its action URL.
    pub async fn ignore_alert(&self, ignore_alert_url: &str) -> Result<(), Error> {
        self.post_action_url(ignore_alert_url).await
    }

    /// Bulk statistics for a set of checks from `start` onwards, including
    /// alert details. Returns the raw per-check stat records.
    pub async fn bulk_stats(&self, pks: &[u64], start: NaiveDate) -> Result<Vec<Value>, Error> {
        let pk_list =
            pks.iter().map(|pk| pk.to_string()).collect::<Vec<_>>().join(",");
        let query = [
            ("pk", pk_list),
            ("start_date", start.to_string()),
            ("include_alerts", "1".to_owned()),
        ];
        let stats: BulkStats =
            self.request(Method::GET, "checks/bulk/stats/", &query, None).await?;
        Ok(stats.checks)
    }
}
