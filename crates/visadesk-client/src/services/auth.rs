use serde_json::Value;
use tracing::info;

use super::envelope_data;
use crate::client::{ApiClient, Notify};
use crate::error::Result;
use crate::models::{LoginRequest, LoginResponse, User};
use crate::request::{ApiRequest, Method};

/// Service for `/auth/*`; keeps the client's session in sync.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Logs in and stores the token and user in the session.
    ///
    /// # Errors
    ///
    /// Fails when the credentials are rejected or the payload does not decode.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let value: Value = self.client.post("/auth/login", &body, Notify::Quiet).await?;
        let LoginResponse { access_token, user } = envelope_data(value)?;
        info!(email = %user.email, "logged in");
        self.client.session().login(access_token, user.clone());
        Ok(user)
    }

    /// Logs out; the local session is cleared even when the call fails.
    ///
    /// # Errors
    ///
    /// Fails when the request fails.
    pub async fn logout(&self) -> Result<()> {
        let outcome = self
            .client
            .execute(ApiRequest::new(Method::Post, "/auth/logout"), Notify::Quiet)
            .await;
        self.client.session().logout();
        outcome.map(drop)
    }

    /// Fetches the current user.
    ///
    /// # Errors
    ///
    /// Fails when the session is not valid.
    pub async fn me(&self) -> Result<User> {
        envelope_data(self.client.get::<Value>("/auth/me", &[]).await?)
    }
}
