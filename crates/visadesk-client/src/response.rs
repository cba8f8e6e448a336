//! API replies and the backend's response envelope.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// A raw reply from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase, e.g. `Not Found`.
    pub status_text: String,
    /// Response body.
    pub body: Vec<u8>,
}

impl ApiReply {
    /// Creates a reply with the given status and an empty body.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            status_text: String::new(),
            body: Vec::new(),
        }
    }

    /// Creates a 200 reply carrying a JSON document.
    pub fn json(body: &Value) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            body: body.to_string().into_bytes(),
        }
    }

    /// Sets the status code.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Returns whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses the body as JSON; an empty body reads as `null`.
    ///
    /// # Errors
    ///
    /// Fails when the body is not valid JSON.
    pub fn value(&self) -> Result<Value> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// The envelope every backend reply is wrapped in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Payload.
    pub data: T,
    /// Server message.
    #[serde(default)]
    pub message: Option<String>,
    /// Whether the server reports success.
    #[serde(default)]
    pub success: bool,
    /// Server timestamp.
    #[serde(default)]
    pub time: Option<String>,
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Decodes an envelope from a JSON value.
    ///
    /// # Errors
    ///
    /// Fails when `data` does not match `T`.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Returns the notice text for a successful mutation reply.
///
/// Prefers `data.message`, then `message`; a bare "success" is replaced by
/// `fallback`.
pub fn success_message(value: &Value, fallback: &str) -> String {
    value
        .pointer("/data/message")
        .and_then(Value::as_str)
        .or_else(|| value.get("message").and_then(Value::as_str))
        .filter(|m| !m.is_empty() && !m.eq_ignore_ascii_case("success"))
        .unwrap_or(fallback)
        .to_string()
}

/// Pagination metadata returned with list payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page (1-indexed).
    #[serde(default)]
    pub page: u32,
    /// Page size.
    #[serde(default)]
    pub limit: u32,
    /// Total number of items.
    #[serde(default)]
    pub total: u64,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items of this page.
    pub items: Vec<T>,
    /// Pagination metadata, when the server sends it.
    pub meta: Option<PaginationMeta>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            meta: None,
        }
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Extracts a page from a list reply.
    ///
    /// Accepts `{data: [..], meta}` and `{data: {data: [..], meta}}`;
    /// any other shape yields an empty page.
    ///
    /// # Errors
    ///
    /// Fails when an item does not match `T`.
    pub fn from_envelope(value: Value) -> Result<Self> {
        let Value::Object(mut outer) = value else {
            return Ok(Self::default());
        };
        let outer_meta = outer.remove("meta");
        let (items, meta) = match outer.remove("data") {
            Some(Value::Array(items)) => (items, outer_meta),
            Some(Value::Object(mut inner)) => match inner.remove("data") {
                Some(Value::Array(items)) => (items, inner.remove("meta").or(outer_meta)),
                _ => (Vec::new(), None),
            },
            _ => (Vec::new(), None),
        };

        let items = items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<T>, _>>()?;
        let meta = meta.and_then(|m| serde_json::from_value(m).ok());
        Ok(Self { items, meta })
    }
}

impl<T> Page<T> {
    /// Total number of pages, at least 1.
    pub fn total_pages(&self) -> u32 {
        self.meta.map_or(1, |m| m.total_pages.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    #[test]
    fn test_flat_list() {
        let page: Page<Item> = Page::from_envelope(json!({
            "success": true,
            "data": [{"id": 1}, {"id": 2}],
            "meta": {"page": 1, "limit": 10, "total": 2, "totalPages": 1}
        }))
        .unwrap();
        assert_eq!(page.items, vec![Item { id: 1 }, Item { id: 2 }]);
        assert_eq!(page.meta.unwrap().total, 2);
    }

    #[test]
    fn test_nested_list() {
        let page: Page<Item> = Page::from_envelope(json!({
            "success": true,
            "data": {"data": [{"id": 7}], "meta": {"page": 2, "limit": 1, "total": 5, "totalPages": 5}}
        }))
        .unwrap();
        assert_eq!(page.items, vec![Item { id: 7 }]);
        assert_eq!(page.total_pages(), 5);
    }

    #[test]
    fn test_unexpected_shape_is_empty() {
        let page: Page<Item> = Page::from_envelope(json!({"data": "nope"})).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages(), 1);
    }

    #[test]
    fn test_success_message() {
        assert_eq!(
            success_message(&json!({"message": "success"}), "Created successfully!"),
            "Created successfully!"
        );
        assert_eq!(
            success_message(&json!({"data": {"message": "Saved"}, "message": "x"}), "f"),
            "Saved"
        );
        assert_eq!(success_message(&Value::Null, "Deleted successfully!"), "Deleted successfully!");
    }

    #[test]
    fn test_empty_body_is_null() {
        assert_eq!(ApiReply::new(204).value().unwrap(), Value::Null);
    }
}
