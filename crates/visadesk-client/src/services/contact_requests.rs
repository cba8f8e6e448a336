use serde_json::Value;

use super::envelope_data;
use crate::client::{ApiClient, Notify};
use crate::error::Result;
use crate::models::{ContactRequest, ContactRequestFilter, NewContactRequest};
use crate::query::ListQuery;
use crate::request::ApiRequest;
use crate::response::Page;

const PATH: &str = "/contact-requests";

/// Service for `/contact-requests`.
#[derive(Debug, Clone)]
pub struct ContactRequestService {
    client: ApiClient,
}

impl ContactRequestService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetches one filtered page.
    ///
    /// # Errors
    ///
    /// Fails when the request fails or an item does not decode.
    pub async fn list(
        &self,
        query: &ListQuery,
        filter: &ContactRequestFilter,
    ) -> Result<Page<ContactRequest>> {
        let query = query.clone().filters(filter.to_pairs());
        let request = ApiRequest::get(PATH).query(query.to_pairs());
        Page::from_envelope(self.client.execute(request, Notify::Yes).await?)
    }

    /// Fetches one request.
    ///
    /// # Errors
    ///
    /// Fails when the request fails or the payload does not decode.
    pub async fn get(&self, id: i64) -> Result<ContactRequest> {
        envelope_data(self.client.get::<Value>(&format!("{PATH}/{id}"), &[]).await?)
    }

    /// Deletes one request.
    ///
    /// # Errors
    ///
    /// Fails when the request fails.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&format!("{PATH}/{id}")).await
    }

    /// Submits a request from the public site.
    ///
    /// # Errors
    ///
    /// Fails when the request fails.
    pub async fn create(&self, request: &NewContactRequest) -> Result<()> {
        self.client
            .post::<_, Value>(PATH, request, Notify::Yes)
            .await
            .map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Method;
    use crate::transport::MockTransport;
    use chrono::NaiveDate;
    use serde_json::json;

    #[tokio::test]
    async fn test_filtered_list() {
        let mock = MockTransport::new();
        let service = ContactRequestService::new(ApiClient::new(mock.clone()));
        mock.json(
            Method::Get,
            PATH,
            &json!({"data": [{"id": 1, "name": "Omar", "nationality": "Jordanian",
                              "phoneNumber": "0790000000", "destinationCountry": "Spain"}]}),
        );

        let filter = ContactRequestFilter {
            destination_country: Some("Spain".to_string()),
            end_date: NaiveDate::from_ymd_opt(2025, 4, 30),
            ..Default::default()
        };
        let page = service.list(&ListQuery::new(), &filter).await.unwrap();
        assert_eq!(page.items[0].destination_country, "Spain");

        let sent = &mock.requests()[0];
        assert_eq!(sent.query_value("destination_country"), Some("Spain"));
        assert_eq!(sent.query_value("endDate"), Some("2025-04-30"));
        assert_eq!(sent.query_value("nationality"), None);
    }

    #[tokio::test]
    async fn test_create_uses_snake_case() {
        let mock = MockTransport::new();
        let service = ContactRequestService::new(ApiClient::new(mock.clone()));
        mock.json(Method::Post, PATH, &json!({"message": "Request received"}));

        service
            .create(&NewContactRequest {
                name: "Omar Haddad".to_string(),
                nationality: "Jordanian".to_string(),
                phone_number: "0790000000".to_string(),
                destination_country: "Spain".to_string(),
            })
            .await
            .unwrap();

        let body = mock.requests()[0].json_body().cloned().unwrap();
        assert_eq!(body["phone_number"], "0790000000");
        assert_eq!(body["destination_country"], "Spain");
        assert_eq!(service.client.notices().latest().unwrap().text, "Request received");
    }
}
