use serde_json::Value;

use super::envelope_data;
use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{AboutUs, UpdateAboutUs};

/// Service for `/about-us`.
#[derive(Debug, Clone)]
pub struct AboutUsService {
    client: ApiClient,
}

impl AboutUsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetches the page.
    ///
    /// # Errors
    ///
    /// Fails when the request fails or the payload does not decode.
    pub async fn get(&self) -> Result<AboutUs> {
        envelope_data(self.client.get::<Value>("/about-us", &[]).await?)
    }

    /// Updates the text content with a multipart `PUT`.
    ///
    /// # Errors
    ///
    /// Fails when the request fails or the payload does not decode.
    pub async fn update(&self, update: UpdateAboutUs) -> Result<AboutUs> {
        let value: Value = self.client.put_form("/about-us", update.into_parts()).await?;
        envelope_data(value)
    }
}
