//! # visadesk-client
//!
//! REST client for the visadesk dashboard backend.
//!
//! Every call goes through [`ApiClient`], which adds the bearer token from
//! the shared [`Session`], maps non-2xx replies to [`ApiError`] and reports
//! the outcome of mutations on the [`NoticeBoard`]. A 401 reply clears the
//! session and raises [`Session::login_required`].
//!
//! The [`Transport`] seam separates request handling from HTTP, so the same
//! client runs over [`HttpTransport`] in production and [`MockTransport`]
//! in tests.
//!
//! ```rust
//! use serde_json::json;
//! use visadesk_client::request::Method;
//! use visadesk_client::services::AttributeService;
//! use visadesk_client::{ApiClient, ListQuery, MockTransport};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mock = MockTransport::new();
//! mock.json(
//!     Method::Get,
//!     "/attributes",
//!     &json!({"data": [{"id": 1, "name_en": "Fee", "name_ar": "رسوم", "order": 1}]}),
//! );
//!
//! let attributes = AttributeService::attributes(ApiClient::new(mock));
//! let page = attributes.list(&ListQuery::new()).await.unwrap();
//! assert_eq!(page.items[0].name_ar, "رسوم");
//! # }
//! ```

mod client;
mod config;
mod error;
pub mod models;
mod notice;
pub mod prefs;
mod query;
pub mod request;
mod response;
pub mod services;
mod session;
mod transport;

pub use client::{ApiClient, Notify};
pub use config::{ClientConfig, API_TIMEOUT_ENV, API_URL_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{ApiError, ClientError, Result, DEFAULT_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE};
pub use notice::{Notice, NoticeBoard, NoticeLevel};
pub use prefs::PageSizeStore;
pub use query::ListQuery;
pub use request::{ApiRequest, Method};
pub use response::{success_message, ApiReply, ApiResponse, Page, PaginationMeta};
pub use session::Session;
pub use transport::{HttpTransport, MockTransport, Transport};
