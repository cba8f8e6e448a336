//! Transports that carry [`ApiRequest`]s to the backend.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::BoxFuture;
use reqwest::multipart::Form;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::request::{ApiRequest, Method, RequestBody};
use crate::response::ApiReply;

/// Sends requests and returns raw replies.
///
/// Implementations only report failures to reach the server as errors;
/// non-2xx replies are returned as-is.
pub trait Transport: Send + Sync {
    /// Sends one request.
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, Result<ApiReply>>;
}

/// HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Creates a transport for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, Result<ApiReply>> {
        Box::pin(async move {
            let url = self.config.url(&request.path);
            let mut builder = self
                .client
                .request(reqwest_method(request.method), &url)
                .query(&request.query);

            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }

            builder = match request.body {
                RequestBody::Empty => builder,
                RequestBody::Json(value) => builder.json(&value),
                RequestBody::Multipart(parts) => {
                    let form = parts
                        .into_iter()
                        .fold(Form::new(), |form, (name, value)| form.text(name, value));
                    builder.multipart(form)
                }
            };

            let response = builder
                .send()
                .await
                .map_err(|e| ClientError::Network(e.to_string()))?;
            let status = response.status();
            let body = response
                .bytes()
                .await
                .map_err(|e| ClientError::Network(e.to_string()))?;

            Ok(ApiReply {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body: body.to_vec(),
            })
        })
    }
}

#[derive(Debug)]
struct Route {
    method: Method,
    path: String,
    replies: VecDeque<std::result::Result<ApiReply, String>>,
}

#[derive(Debug, Default)]
struct MockState {
    routes: Vec<Route>,
    requests: Vec<ApiRequest>,
}

/// In-memory transport replaying canned replies.
///
/// Replies queued for a route are returned in order; the last one keeps
/// being returned once the queue is down to it. Unknown routes reply 404.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Creates a transport with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, reply: std::result::Result<ApiReply, String>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(route) = state
            .routes
            .iter_mut()
            .find(|r| r.method == method && r.path == path)
        {
            route.replies.push_back(reply);
        } else {
            state.routes.push(Route {
                method,
                path: path.to_string(),
                replies: VecDeque::from([reply]),
            });
        }
    }

    /// Queues a reply for `method path`.
    pub fn reply(&self, method: Method, path: &str, reply: ApiReply) -> &Self {
        self.push(method, path, Ok(reply));
        self
    }

    /// Queues a 200 JSON reply for `method path`.
    pub fn json(&self, method: Method, path: &str, body: &Value) -> &Self {
        self.reply(method, path, ApiReply::json(body))
    }

    /// Queues an error status with a JSON `message` for `method path`.
    pub fn status(&self, method: Method, path: &str, status: u16, message: &str) -> &Self {
        let body = serde_json::json!({ "message": message, "success": false });
        self.reply(method, path, ApiReply::json(&body).with_status(status))
    }

    /// Queues a network failure for `method path`.
    pub fn fail(&self, method: Method, path: &str, reason: &str) -> &Self {
        self.push(method, path, Err(reason.to_string()));
        self
    }

    /// Returns every request sent so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .requests
            .clone()
    }

    /// Returns the requests sent to `method path`.
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, Result<ApiReply>> {
        let reply = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.requests.push(request.clone());
            state
                .routes
                .iter_mut()
                .find(|r| r.method == request.method && r.path == request.path)
                .and_then(|route| {
                    if route.replies.len() > 1 {
                        route.replies.pop_front()
                    } else {
                        route.replies.front().cloned()
                    }
                })
                .unwrap_or_else(|| Ok(ApiReply::new(404)))
        };
        Box::pin(async move { reply.map_err(ClientError::Network) })
    }
}
