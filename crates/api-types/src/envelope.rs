use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// One page of a paginated listing.
///
/// Not every endpoint populates `next`: `checks/` does, `alerts/` terminates
/// on a short page and `outages/` on an empty page. The walkers in the client
/// crate preserve the per-endpoint discipline.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// Records on this page, in server order.
    pub results: Vec<T>,
    /// URL of the next page, when the endpoint provides a cursor.
    #[serde(default)]
    pub next: Option<String>,
}

/// Application-level status block embedded in otherwise-2xx responses.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Messages {
    /// Whether the request was rejected.
    #[serde(default)]
    pub errors: bool,
    /// Machine-readable error code.
    #[serde(default)]
    pub error_code: Option<String>,
    /// Human-readable error message.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Per-field validation errors, when the rejection names fields.
    #[serde(default)]
    pub error_fields: Option<BTreeMap<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn page_without_cursor() {
        let body = json!({ "results": [1, 2, 3] });
        let page: Page<u64> = serde_json::from_value(body).unwrap();
        assert_eq!(page.results, vec![1, 2, 3]);
        assert!(page.next.is_none());
    }

    #[test]
    fn messages_with_field_errors() {
        let body = json!({
            "errors": true,
            "error_code": "VALIDATION_ERROR",
            "error_message": "Validation error.",
            "error_fields": { "msp_address": ["Enter a valid URL."] }
        });
        let messages: Messages = serde_json::from_value(body).unwrap();
        assert!(messages.errors);
        assert_eq!(messages.error_code.as_deref(), Some("VALIDATION_ERROR"));
        let fields = messages.error_fields.unwrap();
        assert!(fields.contains_key("msp_address"));
    }

    #[test]
    fn messages_without_errors() {
        let body = json!({ "errors": false });
        let messages: Messages = serde_json::from_value(body).unwrap();
        assert!(!messages.errors);
        assert!(messages.error_code.is_none());
    }
}
