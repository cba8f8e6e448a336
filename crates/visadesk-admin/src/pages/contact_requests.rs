use chrono::NaiveDate;
use tracing::info;
use visadesk_client::models::{ContactRequest, ContactRequestFilter, Country, NewContactRequest};
use visadesk_client::services::ContactRequestService;
use visadesk_client::{ApiClient, PageSizeStore};
use visadesk_forms::fields::{numeric_text, required_text};
use visadesk_forms::{FieldValue, FormState, Language};

use crate::error::Result;
use crate::list::ListPage;

/// The contact requests screen: a filtered list with delete.
#[derive(Debug)]
pub struct ContactRequestsPage {
    service: ContactRequestService,
    list: ListPage<ContactRequest>,
    filter: ContactRequestFilter,
}

impl ContactRequestsPage {
    pub fn new(client: ApiClient) -> Self {
        Self {
            service: ContactRequestService::new(client),
            list: ListPage::new("contact-requests"),
            filter: ContactRequestFilter::default(),
        }
    }

    /// Persists the page size through `store`.
    #[must_use]
    pub fn with_store(mut self, store: PageSizeStore) -> Self {
        self.list = self.list.with_store(store);
        self
    }

    pub fn items(&self) -> &[ContactRequest] {
        self.list.items()
    }

    pub fn list(&self) -> &ListPage<ContactRequest> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListPage<ContactRequest> {
        &mut self.list
    }

    pub fn filter(&self) -> &ContactRequestFilter {
        &self.filter
    }

    /// Replaces the filters and returns to the first page.
    pub fn set_filter(&mut self, filter: ContactRequestFilter) {
        self.filter = filter;
        self.list.set_page(1);
    }

    /// Narrows the list to requests created between `start` and `end`.
    pub fn set_date_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.filter.start_date = start;
        self.filter.end_date = end;
        self.list.set_page(1);
    }

    /// Fetches the current page.
    ///
    /// # Errors
    ///
    /// Returns the request error; the loaded items are kept.
    pub async fn load(&mut self) -> Result<()> {
        let ticket = self.list.begin_load();
        match self.service.list(ticket.query(), &self.filter).await {
            Ok(page) => {
                self.list.finish_load(ticket, page);
                Ok(())
            }
            Err(error) => {
                self.list.fail_load(ticket);
                Err(error.into())
            }
        }
    }

    /// Deletes a request, then reloads the list.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn delete(&mut self, id: i64) -> Result<()> {
        self.service.delete(id).await?;
        self.list.retain(|r| r.id != id);
        self.load().await
    }
}

/// The public "contact us" form shown for a destination.
#[derive(Debug)]
pub struct ContactRequestForm {
    form: FormState,
    submitted: bool,
}

impl ContactRequestForm {
    /// A blank form; the destination is prefilled from `country` in `language`.
    pub fn new(language: Language, country: Option<&Country>) -> Self {
        let destination = country.map_or("", |c| language.pick(c.name_en(), c.name_ar()));
        let form = FormState::new(language)
            .field(required_text("firstName", language.pick("First name", "الاسم الأول")))
            .field(required_text("lastName", language.pick("Last name", "اسم العائلة")))
            .field(required_text("nationality", language.pick("Nationality", "الجنسية")))
            .field(numeric_text("phoneNumber", language.pick("Phone number", "رقم الهاتف")))
            .field(
                required_text("destination", language.pick("Destination", "الوجهة"))
                    .value(destination),
            );
        Self {
            form,
            submitted: false,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Whether the last submit went through.
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Updates a field.
    ///
    /// # Errors
    ///
    /// Fails for an unknown field.
    pub fn set_value(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<bool> {
        Ok(self.form.set_value(name, value)?)
    }

    /// Validates the form and returns the request body.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Invalid`](visadesk_forms::FormError::Invalid)
    /// naming the first failing field.
    pub fn request(&mut self) -> Result<NewContactRequest> {
        self.form.submit()?;
        let name = format!(
            "{} {}",
            self.form.text("firstName").trim(),
            self.form.text("lastName").trim()
        );
        Ok(NewContactRequest {
            name: name.trim().to_string(),
            nationality: self.form.text("nationality").trim().to_string(),
            phone_number: self.form.text("phoneNumber").trim().to_string(),
            destination_country: self.form.text("destination").trim().to_string(),
        })
    }

    /// Validates and sends the request, clearing the form on success.
    ///
    /// # Errors
    ///
    /// Fails when the form does not validate or the request fails.
    pub async fn submit(&mut self, service: &ContactRequestService) -> Result<()> {
        self.submitted = false;
        let request = self.request()?;
        service.create(&request).await?;
        info!(destination = %request.destination_country, "contact request sent");
        self.form.clear();
        self.submitted = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use visadesk_client::models::CountryWorld;

    fn spain() -> Country {
        Country {
            id: 3,
            country_world_id: 9,
            country_world: Some(CountryWorld {
                id: 9,
                name_en: "Spain".to_string(),
                name_ar: "إسبانيا".to_string(),
                image_url: String::new(),
            }),
            attributes: Vec::new(),
            order: 1,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_destination_follows_language() {
        let en = ContactRequestForm::new(Language::En, Some(&spain()));
        let ar = ContactRequestForm::new(Language::Ar, Some(&spain()));
        assert_eq!(en.form().text("destination"), "Spain");
        assert_eq!(ar.form().text("destination"), "إسبانيا");
    }

    #[test]
    fn test_phone_must_be_numeric() {
        let mut form = ContactRequestForm::new(Language::En, Some(&spain()));
        for (name, value) in [
            ("firstName", "Omar"),
            ("lastName", "Haddad"),
            ("nationality", "Jordanian"),
            ("phoneNumber", "+962 79"),
        ] {
            form.set_value(name, value).unwrap();
        }
        let err = form.request().unwrap_err();
        assert_eq!(err.invalid_field(), Some("phoneNumber"));

        form.set_value("phoneNumber", "0790000000").unwrap();
        let request = form.request().unwrap();
        assert_eq!(request.name, "Omar Haddad");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "name": "Omar Haddad",
                "nationality": "Jordanian",
                "phone_number": "0790000000",
                "destination_country": "Spain"
            })
        );
    }
}
