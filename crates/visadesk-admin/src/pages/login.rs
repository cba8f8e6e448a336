use visadesk_client::models::User;
use visadesk_client::services::AuthService;
use visadesk_forms::fields::{password, required_text};
use visadesk_forms::{FieldValue, FormState, Language};

use crate::error::Result;

/// The login screen.
#[derive(Debug)]
pub struct LoginForm {
    form: FormState,
}

impl LoginForm {
    pub fn new(language: Language) -> Self {
        Self {
            form: FormState::new(language)
                .field(required_text("email", "Email"))
                .field(password("password", "Password")),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Updates a field.
    ///
    /// # Errors
    ///
    /// Fails for an unknown field.
    pub fn set_value(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<bool> {
        Ok(self.form.set_value(name, value)?)
    }

    /// Validates and logs in; the session is stored by `auth`.
    ///
    /// # Errors
    ///
    /// Fails when a field is empty or the credentials are rejected.
    pub async fn submit(&mut self, auth: &AuthService) -> Result<User> {
        self.form.submit()?;
        let user = auth
            .login(self.form.text("email").trim(), self.form.text("password"))
            .await?;
        self.form.clear();
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use visadesk_client::{ApiClient, Method, MockTransport};

    #[tokio::test]
    async fn test_login_flow() {
        let mock = MockTransport::new();
        mock.json(
            Method::Post,
            "/auth/login",
            &json!({"data": {"access_token": "jwt", "user": {"id": 1, "email": "admin@example.com"}}}),
        );
        let client = ApiClient::new(mock.clone());
        let auth = AuthService::new(client.clone());
        let mut form = LoginForm::new(Language::Ar);

        let err = form.submit(&auth).await.unwrap_err();
        assert_eq!(err.invalid_field(), Some("email"));
        assert_eq!(form.form().errors().get("password"), Some("هذا الحقل مطلوب"));
        assert!(mock.requests().is_empty());

        form.set_value("email", " admin@example.com ").unwrap();
        form.set_value("password", "secret").unwrap();
        let user = form.submit(&auth).await.unwrap();
        assert_eq!(user.id, 1);
        assert!(client.session().is_authenticated());
        assert_eq!(
            mock.requests()[0].json_body().unwrap()["email"],
            "admin@example.com"
        );
    }
}
