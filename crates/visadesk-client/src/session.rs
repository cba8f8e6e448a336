//! Authenticated session shared by every request.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::warn;

use crate::models::User;

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<User>,
    login_required: bool,
}

/// Shared handle to the current session.
///
/// Cloning the handle shares the session. A 401 reply on any request
/// expires it and raises the login-required flag, which the shell reacts to
/// by sending the user back to the login screen.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: Arc<Mutex<SessionState>>,
}

impl Session {
    /// Creates an anonymous session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session from a stored bearer token.
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.lock().token = Some(token.into());
        session
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores the credentials returned by a successful login.
    pub fn login(&self, token: impl Into<String>, user: User) {
        let mut state = self.lock();
        state.token = Some(token.into());
        state.user = Some(user);
        state.login_required = false;
    }

    /// Forgets the credentials.
    pub fn logout(&self) {
        let mut state = self.lock();
        state.token = None;
        state.user = None;
    }

    /// Clears the session after the server rejected it.
    pub fn expire(&self) {
        let mut state = self.lock();
        if state.token.is_some() {
            warn!("session rejected by server, clearing credentials");
        }
        state.token = None;
        state.user = None;
        state.login_required = true;
    }

    /// Returns the bearer token.
    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    /// Returns the logged-in user.
    pub fn user(&self) -> Option<User> {
        self.lock().user.clone()
    }

    /// Returns whether a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.lock().token.is_some()
    }

    /// Returns whether the user must log in again.
    pub fn login_required(&self) -> bool {
        self.lock().login_required
    }

    /// Returns the `Authorization` header value.
    pub fn authorization(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {t}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 1,
            email: "admin@example.com".to_string(),
            first_name: "Lina".to_string(),
            last_name: "Saleh".to_string(),
            role: "admin".to_string(),
        }
    }

    #[test]
    fn test_login_and_expire() {
        let session = Session::new();
        assert!(!session.is_authenticated());

        session.login("abc", user());
        assert_eq!(session.authorization().as_deref(), Some("Bearer abc"));
        assert_eq!(session.user().unwrap().email, "admin@example.com");

        let shared = session.clone();
        shared.expire();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(session.login_required());
    }

    #[test]
    fn test_logout_keeps_flag_clear() {
        let session = Session::with_token("t");
        session.logout();
        assert!(!session.is_authenticated());
        assert!(!session.login_required());
    }
}
