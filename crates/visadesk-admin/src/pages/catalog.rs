use visadesk_client::models::Country;
use visadesk_client::services::PublicService;

use crate::error::Result;
use crate::reorder::sort_by_order;

/// The public country catalog with client-side search.
#[derive(Debug)]
pub struct Catalog {
    service: PublicService,
    countries: Vec<Country>,
}

impl Catalog {
    pub fn new(service: PublicService) -> Self {
        Self {
            service,
            countries: Vec::new(),
        }
    }

    /// Fetches the published countries.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn load(&mut self) -> Result<()> {
        let mut countries = self.service.countries(None).await?;
        sort_by_order(&mut countries);
        self.countries = countries;
        Ok(())
    }

    /// Replaces the loaded countries.
    pub fn set_countries(&mut self, mut countries: Vec<Country>) {
        sort_by_order(&mut countries);
        self.countries = countries;
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Countries whose English name contains `search` ignoring case, or
    /// whose Arabic name contains it verbatim.
    pub fn search(&self, search: &str) -> Vec<&Country> {
        let search = search.trim();
        if search.is_empty() {
            return self.countries.iter().collect();
        }
        let lowered = search.to_lowercase();
        self.countries
            .iter()
            .filter(|c| c.name_en().to_lowercase().contains(&lowered) || c.name_ar().contains(search))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visadesk_client::models::CountryWorld;
    use visadesk_client::{ApiClient, MockTransport};

    fn country(id: i64, order: i64, en: &str, ar: &str) -> Country {
        Country {
            id,
            country_world_id: id,
            country_world: Some(CountryWorld {
                id,
                name_en: en.to_string(),
                name_ar: ar.to_string(),
                image_url: String::new(),
            }),
            attributes: Vec::new(),
            order,
            created_at: None,
            updated_at: None,
        }
    }

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new(PublicService::new(ApiClient::new(MockTransport::new())));
        catalog.set_countries(vec![
            country(1, 2, "Spain", "إسبانيا"),
            country(2, 1, "Germany", "ألمانيا"),
            country(3, 3, "Saudi Arabia", "السعودية"),
        ]);
        catalog
    }

    fn names(found: &[&Country]) -> Vec<String> {
        found.iter().map(|c| c.name_en().to_string()).collect()
    }

    #[test]
    fn test_english_search_ignores_case() {
        let catalog = catalog();
        assert_eq!(names(&catalog.search("SPA")), vec!["Spain"]);
        assert_eq!(names(&catalog.search("  ")), vec!["Germany", "Spain", "Saudi Arabia"]);
    }

    #[test]
    fn test_arabic_search_is_verbatim() {
        let catalog = catalog();
        assert_eq!(names(&catalog.search("ألمان")), vec!["Germany"]);
        assert!(catalog.search("المانيا").is_empty());
    }
}
