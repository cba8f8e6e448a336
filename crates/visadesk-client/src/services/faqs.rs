use serde_json::{json, Value};

use super::envelope_data;
use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{FaqItem, Faqs};

/// Service for the single FAQ document at `/faqs`.
#[derive(Debug, Clone)]
pub struct FaqService {
    client: ApiClient,
}

impl FaqService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetches the FAQ document.
    ///
    /// # Errors
    ///
    /// Fails when the request fails or the payload does not decode.
    pub async fn get(&self) -> Result<Faqs> {
        envelope_data(self.client.get::<Value>("/faqs", &[]).await?)
    }

    /// Replaces every item.
    ///
    /// # Errors
    ///
    /// Fails when the request fails or the payload does not decode.
    pub async fn save(&self, items: &[FaqItem]) -> Result<Faqs> {
        let value: Value = self.client.put("/faqs", &json!({ "items": items })).await?;
        envelope_data(value)
    }
}
