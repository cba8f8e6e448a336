use visadesk_client::models::{AboutUs, UpdateAboutUs};
use visadesk_client::services::AboutUsService;
use visadesk_client::ApiClient;
use visadesk_forms::widgets::BootstrapTextarea;
use visadesk_forms::{FieldDescriptor, FieldValue, FormState, Language, Rule};

use crate::error::Result;

fn content_field(name: &str, label: &str, direction: Language) -> FieldDescriptor {
    FieldDescriptor::new(name, label, BootstrapTextarea::new(12))
        .rule(Rule::Required)
        .direction(direction)
}

/// Editor for the "About Us" page.
///
/// The content is rich text, so only presence is checked.
#[derive(Debug)]
pub struct AboutUsEditor {
    service: AboutUsService,
    form: FormState,
    current: Option<AboutUs>,
}

impl AboutUsEditor {
    pub fn new(client: ApiClient, language: Language) -> Self {
        Self {
            service: AboutUsService::new(client),
            form: FormState::new(language)
                .field(content_field("contentEn", "Content (English)", Language::En))
                .field(content_field("contentAr", "Content (Arabic)", Language::Ar)),
            current: None,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// The page as last loaded or saved.
    pub fn current(&self) -> Option<&AboutUs> {
        self.current.as_ref()
    }

    fn fill(&mut self, page: AboutUs) -> Result<()> {
        self.form.set_value("contentEn", page.content_en.as_str())?;
        self.form.set_value("contentAr", page.content_ar.as_str())?;
        self.current = Some(page);
        Ok(())
    }

    /// Fetches the page into the form.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn load(&mut self) -> Result<()> {
        let page = self.service.get().await?;
        self.fill(page)
    }

    /// Updates a field.
    ///
    /// # Errors
    ///
    /// Fails for an unknown field.
    pub fn set_value(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<bool> {
        Ok(self.form.set_value(name, value)?)
    }

    /// Validates and saves both contents.
    ///
    /// # Errors
    ///
    /// Fails when a content is empty or the request fails.
    pub async fn save(&mut self) -> Result<()> {
        self.form.submit()?;
        let update = UpdateAboutUs {
            content_en: Some(self.form.text("contentEn").to_string()),
            content_ar: Some(self.form.text("contentAr").to_string()),
        };
        let saved = self.service.update(update).await?;
        self.fill(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use visadesk_client::{Method, MockTransport};

    #[tokio::test]
    async fn test_load_and_save() {
        let mock = MockTransport::new();
        let page = json!({"data": {"id": 1, "image": "/a.png", "contentEn": "<p>We help</p>", "contentAr": "<p>نساعد</p>"}});
        mock.json(Method::Get, "/about-us", &page);
        mock.json(Method::Put, "/about-us", &page);

        let mut editor = AboutUsEditor::new(ApiClient::new(mock.clone()), Language::En);
        editor.load().await.unwrap();
        assert_eq!(editor.form().text("contentAr"), "<p>نساعد</p>");

        editor.set_value("contentEn", "").unwrap();
        let err = editor.save().await.unwrap_err();
        assert_eq!(err.invalid_field(), Some("contentEn"));
        assert!(mock.requests_to(Method::Put, "/about-us").is_empty());

        editor.set_value("contentEn", "<p>We help</p>").unwrap();
        editor.save().await.unwrap();
        assert_eq!(mock.requests_to(Method::Put, "/about-us").len(), 1);
        assert_eq!(editor.current().unwrap().image, "/a.png");
    }
}
