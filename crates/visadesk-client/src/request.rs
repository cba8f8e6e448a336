//! Outgoing API requests.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// HTTP request methods used by the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET method
    Get,
    /// POST method
    Post,
    /// PUT method
    Put,
    /// PATCH method
    Patch,
    /// DELETE method
    Delete,
}

impl Method {
    /// Returns the method as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Returns whether the method changes server state.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Get)
    }

    /// Notice shown when a mutation succeeds without a meaningful message.
    pub fn success_message(&self) -> &'static str {
        match self {
            Self::Get => "",
            Self::Post => "Created successfully!",
            Self::Put | Self::Patch => "Updated successfully!",
            Self::Delete => "Deleted successfully!",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// A JSON document.
    Json(Value),
    /// Text parts sent as `multipart/form-data`.
    Multipart(Vec<(String, String)>),
}

/// A request to the backend, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Endpoint path, e.g. `/attributes/reorder`.
    pub path: String,
    /// Query string parameters.
    pub query: Vec<(String, String)>,
    /// Extra headers.
    pub headers: BTreeMap<String, String>,
    /// Payload.
    pub body: RequestBody,
}

impl ApiRequest {
    /// Creates a request without query, headers or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: BTreeMap::new(),
            body: RequestBody::Empty,
        }
    }

    /// Creates a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Appends query parameters.
    #[must_use]
    pub fn query(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Serializes `body` as the JSON payload.
    ///
    /// # Errors
    ///
    /// Fails when `body` cannot be represented as JSON.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Sets a multipart payload.
    #[must_use]
    pub fn multipart(mut self, parts: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// Returns the JSON payload, if any.
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            RequestBody::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the multipart parts, if any.
    pub fn multipart_parts(&self) -> Option<&[(String, String)]> {
        match &self.body {
            RequestBody::Multipart(parts) => Some(parts.as_slice()),
            _ => None,
        }
    }

    /// Returns a query parameter value.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_messages() {
        assert!(!Method::Get.is_mutation());
        assert!(Method::Delete.is_mutation());
        assert_eq!(Method::Patch.success_message(), "Updated successfully!");
        assert_eq!(Method::Post.to_string(), "POST");
    }

    #[test]
    fn test_builder() {
        let req = ApiRequest::new(Method::Post, "/attributes/reorder")
            .json(&json!({"attributes": [{"id": 1, "order": 1}]}))
            .unwrap()
            .header("Authorization", "Bearer t");
        assert_eq!(req.json_body().unwrap()["attributes"][0]["id"], 1);
        assert_eq!(req.headers["Authorization"], "Bearer t");

        let req = ApiRequest::get("/countries").query([("limit".to_string(), "100".to_string())]);
        assert_eq!(req.query_value("limit"), Some("100"));
    }
}
