use reqwest::{Client as HttpClient, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{ApiError, Error, TransportError};
use api_types::Messages;

/// Records requested per page on paginated listings.
pub const PAGE_SIZE: u32 = 250;

/// Client for the Uptime.com REST API.
///
/// Holds the token, base URL and optional subaccount scope; every request
/// goes through [`request`](Self::request), which injects the auth headers,
/// logs one diagnostic line and maps non-2xx responses to
/// [`TransportError`]. Retries are deliberately absent.
#[derive(Debug, Clone)]
pub struct UptimeClient {
    http: HttpClient,
    base: Url,
    token: String,
    subaccount: Option<u64>,
}

impl UptimeClient {
    /// Create a new API client against the given base URL (which must end
    /// with a slash, e.g. `https://uptime.com/api/v1/`).
    pub fn new(token: String, base: Url, subaccount: Option<u64>) -> Self {
        Self { http: HttpClient::new(), base, token, subaccount }
    }

    /// Authenticate the request.
    fn auth(&self, rb: RequestBuilder) -> RequestBuilder {
        let rb = rb.header("Authorization", format!("token {}", self.token));
        match self.subaccount {
            Some(id) => rb.header("X-Subaccount", id.to_string()),
            None => rb,
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        self.base.join(path).map_err(|e| TransportError::decode(&e).into())
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<reqwest::Response, Error> {
        debug!(method = %method, url = %url, query = ?query, "api request");

        let mut rb = self.http.request(method, url);
        if !query.is_empty() {
            rb = rb.query(query);
        }
        if let Some(body) = body {
            rb = rb.json(body);
        }
        let resp = self.auth(rb).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError { status: Some(status), body }.into());
        }
        Ok(resp)
    }

    /// Issue a request against a path relative to the API base and decode
    /// the 2xx response body.
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<T, Error> {
        let url = self.endpoint(path)?;
        let resp = self.send(method, url, query, body).await?;
        resp.json::<T>().await.map_err(|e| TransportError::decode(&e).into())
    }

    /// Issue a request and discard the response body. Some endpoints
    /// (deletes, ignore actions) return empty or non-JSON bodies on success.
    pub(crate) async fn request_discard(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<(), Error> {
        self.send(method, url, &[], body).await?;
        Ok(())
    }

    /// Issue a request and unwrap the `results`/`messages` envelope: a
    /// `messages` block with `errors == true` becomes an [`ApiError`], and
    /// the `results` member (when present) is decoded as the caller's type.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<T, Error> {
        let value: Value = self.request(method, path, query, body).await?;
        let inner = unwrap_envelope(value)?;
        serde_json::from_value(inner).map_err(|e| TransportError::decode(&e).into())
    }

    pub(crate) fn absolute(url: &str) -> Result<Url, Error> {
        Url::parse(url).map_err(|e| TransportError::decode(&e).into())
    }

    /// Authenticated POST to an absolute action URL (e.g. an outage's
    /// `ignore_alert_url`), discarding the response body.
    pub async fn post_action_url(&self, url: &str) -> Result<(), Error> {
        let url = Self::absolute(url)?;
        self.request_discard(Method::POST, url, None).await
    }
}

fn unwrap_envelope(value: Value) -> Result<Value, Error> {
    if let Some(messages) = value.get("messages") {
        let messages: Messages = serde_json::from_value(messages.clone())
            .map_err(|e| Error::from(TransportError::decode(&e)))?;
        if messages.errors {
            return Err(ApiError::from(messages).into());
        }
    }
    Ok(match value {
        Value::Object(mut map) if map.contains_key("results") => {
            map.remove("results").unwrap_or(Value::Null)
        }
        other => other,
    })
}

/// POST a state change to a metrics webhook URL. Webhooks authenticate via
/// the URL itself, so no API client is involved.
pub async fn post_webhook(http: &HttpClient, url: &str, state_is_up: bool) -> Result<(), Error> {
    debug!(url, state_is_up, "webhook request");
    let resp = http.post(url).json(&serde_json::json!({ "state_is_up": state_is_up })).send().await?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(TransportError { status: Some(status), body }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn envelope_passes_plain_bodies_through() {
        let body = json!({ "pk": 1, "name": "check" });
        assert_eq!(unwrap_envelope(body.clone()).unwrap(), body);
    }

    #[test]
    fn envelope_unwraps_results() {
        let body = json!({ "messages": { "errors": false }, "results": { "pk": 7 } });
        assert_eq!(unwrap_envelope(body).unwrap(), json!({ "pk": 7 }));
    }

    #[test]
    fn envelope_rejects_application_errors() {
        let body = json!({
            "messages": {
                "errors": true,
                "error_code": "VALIDATION_ERROR",
                "error_message": "Validation error.",
                "error_fields": { "msp_address": ["Enter a valid URL."] }
            }
        });
        match unwrap_envelope(body) {
            Err(Error::Api(err)) => {
                assert_eq!(err.code, "VALIDATION_ERROR");
                assert!(err.fields.contains_key("msp_address"));
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn auth_headers_are_injected() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/checks/1/")
            .match_header("authorization", "token secret")
            .match_header("x-subaccount", "42")
            .with_body(r#"{"pk": 1, "name": "c"}"#)
            .create_async()
            .await;

        let base = Url::parse(&format!("{}/api/v1/", server.url())).unwrap();
        let client = UptimeClient::new("secret".to_owned(), base, Some(42));
        let _check: Value =
            client.request(Method::GET, "checks/1/", &[], None).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_2xx_becomes_transport_error_with_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/checks/")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let base = Url::parse(&format!("{}/api/v1/", server.url())).unwrap();
        let client = UptimeClient::new("secret".to_owned(), base, None);
        let err = client.request::<Value>(Method::GET, "checks/", &[], None).await.unwrap_err();
        match err {
            Error::Transport(err) => {
                assert_eq!(err.status, Some(reqwest::StatusCode::TOO_MANY_REQUESTS));
                assert_eq!(err.body, "rate limited");
            }
            Error::Api(_) => panic!("expected transport error"),
        }
    }

    #[tokio::test]
    async fn webhook_posts_state_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/metrics/webhook/abc")
            .match_body(mockito::Matcher::Json(json!({ "state_is_up": false })))
            .create_async()
            .await;

        let http = HttpClient::new();
        post_webhook(&http, &format!("{}/metrics/webhook/abc", server.url()), false)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn failed_webhook_surfaces_transport_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/metrics/webhook/abc")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let http = HttpClient::new();
        let err = post_webhook(&http, &format!("{}/metrics/webhook/abc", server.url()), true)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
    }
}
