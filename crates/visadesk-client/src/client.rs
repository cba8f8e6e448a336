//! The shared API client used by every service.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, ClientError, Result};
use crate::notice::{Notice, NoticeBoard};
use crate::request::{ApiRequest, Method};
use crate::session::Session;
use crate::transport::{HttpTransport, Transport};

/// Whether a successful mutation posts a success notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notify {
    /// Post a success notice.
    #[default]
    Yes,
    /// Stay silent on success; failures are still reported.
    Quiet,
}

/// Client for the backend API.
///
/// Adds the JSON and bearer headers, maps non-2xx replies to [`ApiError`],
/// expires the [`Session`] on 401 and reports mutations on the
/// [`NoticeBoard`]. Cloning is cheap and shares all three.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Session,
    notices: NoticeBoard,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("session", &self.session)
            .field("notices", &self.notices)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client over any transport.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            session: Session::new(),
            notices: NoticeBoard::new(),
        }
    }

    /// Creates an HTTP client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the HTTP client cannot be built.
    pub fn http(config: ClientConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }

    /// Uses an existing session handle.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Uses an existing notice board.
    #[must_use]
    pub fn with_notices(mut self, notices: NoticeBoard) -> Self {
        self.notices = notices;
        self
    }

    /// Returns the session handle.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the notice board.
    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    /// Sends a request and returns the decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] for non-2xx replies and
    /// [`ClientError::Network`] when the server could not be reached.
    pub async fn execute(&self, request: ApiRequest, notify: Notify) -> Result<Value> {
        let method = request.method;
        let path = request.path.clone();
        let request = match self.session.authorization() {
            Some(auth) => request.header("Authorization", auth),
            None => request,
        }
        .header("Accept", "application/json");

        debug!(%method, %path, "sending request");
        let outcome = match self.transport.send(request).await {
            Ok(reply) if reply.is_success() => {
                debug!(%method, %path, status = reply.status, "request succeeded");
                reply.value()
            }
            Ok(reply) => {
                let error = ApiError::from_reply(reply.status, &reply.status_text, &reply.body);
                warn!(%method, %path, status = error.status, message = %error.message, "request rejected");
                if error.is_unauthorized() {
                    self.session.expire();
                }
                Err(ClientError::Api(error))
            }
            Err(error) => {
                warn!(%method, %path, %error, "request failed");
                Err(error)
            }
        };

        if method.is_mutation() {
            match &outcome {
                Ok(body) if notify == Notify::Yes => self.notices.push(Notice::success(
                    crate::response::success_message(body, method.success_message()),
                )),
                Ok(_) => {}
                Err(error) => self.notices.push(Notice::error(error.user_message())),
            }
        }

        outcome
    }

    async fn decode<T: DeserializeOwned>(&self, request: ApiRequest, notify: Notify) -> Result<T> {
        let value = self.execute(request, notify).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// GET with query parameters; `None` values are dropped.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute); also fails when the body does not match `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, Option<String>)],
    ) -> Result<T> {
        let query = params
            .iter()
            .filter_map(|(k, v)| v.clone().map(|v| ((*k).to_string(), v)));
        self.decode(ApiRequest::get(path).query(query), Notify::Yes)
            .await
    }

    /// POST a JSON body.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn post<B, T>(&self, path: &str, body: &B, notify: Notify) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(Method::Post, path).json(body)?;
        self.decode(request, notify).await
    }

    /// PUT a JSON body.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(Method::Put, path).json(body)?;
        self.decode(request, Notify::Yes).await
    }

    /// PUT text parts as `multipart/form-data`.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn put_form<T: DeserializeOwned>(
        &self,
        path: &str,
        parts: Vec<(String, String)>,
    ) -> Result<T> {
        let request = ApiRequest::new(Method::Put, path).multipart(parts);
        self.decode(request, Notify::Yes).await
    }

    /// PATCH a JSON body.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(Method::Patch, path).json(body)?;
        self.decode(request, Notify::Yes).await
    }

    /// DELETE a resource.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.execute(ApiRequest::new(Method::Delete, path), Notify::Yes)
            .await
            .map(drop)
    }
}
