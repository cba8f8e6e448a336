use serde_json::Value;

use super::envelope_data;
use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{AboutUs, Country, Faqs};
use crate::response::Page;

/// Page size the public catalog requests.
pub const PUBLIC_COUNTRY_LIMIT: u32 = 100;

/// Read-only endpoints used by the public site.
#[derive(Debug, Clone)]
pub struct PublicService {
    client: ApiClient,
}

impl PublicService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetches the published countries, optionally narrowed by `search`.
    ///
    /// # Errors
    ///
    /// Fails when the request fails or a country does not decode.
    pub async fn countries(&self, search: Option<&str>) -> Result<Vec<Country>> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        let value = self
            .client
            .get::<Value>(
                "/countries",
                &[
                    ("search", search.map(str::to_string)),
                    ("limit", Some(PUBLIC_COUNTRY_LIMIT.to_string())),
                ],
            )
            .await?;
        Ok(Page::from_envelope(value)?.items)
    }

    /// Fetches the "About Us" page.
    ///
    /// # Errors
    ///
    /// Fails when the request fails or the payload does not decode.
    pub async fn about_us(&self) -> Result<AboutUs> {
        envelope_data(self.client.get::<Value>("/about-us", &[]).await?)
    }

    /// Fetches the FAQ document.
    ///
    /// # Errors
    ///
    /// Fails when the request fails or the payload does not decode.
    pub async fn faqs(&self) -> Result<Faqs> {
        envelope_data(self.client.get::<Value>("/faqs", &[]).await?)
    }
}
