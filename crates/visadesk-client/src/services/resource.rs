use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::envelope_data;
use crate::client::{ApiClient, Notify};
use crate::error::Result;
use crate::models::{Attribute, Country, CountryWorld, ReorderEntry};
use crate::query::ListQuery;
use crate::request::ApiRequest;
use crate::response::Page;

/// CRUD and batch reorder for one collection endpoint.
pub struct ResourceService<T> {
    client: ApiClient,
    path: &'static str,
    plural: &'static str,
    _marker: PhantomData<fn() -> T>,
}

/// Service for `/attributes`.
pub type AttributeService = ResourceService<Attribute>;

/// Service for `/countries`.
pub type CountryService = ResourceService<Country>;

impl<T> Clone for ResourceService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            path: self.path,
            plural: self.plural,
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for ResourceService<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceService")
            .field("path", &self.path)
            .field("plural", &self.plural)
            .finish_non_exhaustive()
    }
}

impl ResourceService<Attribute> {
    /// Service for attributes.
    pub fn attributes(client: ApiClient) -> Self {
        Self::new(client, "/attributes", "attributes")
    }
}

impl ResourceService<Country> {
    /// Service for catalog countries.
    pub fn countries(client: ApiClient) -> Self {
        Self::new(client, "/countries", "countries")
    }

    /// Lists the world countries a catalog country can be created from.
    ///
    /// # Errors
    ///
    /// Fails when the request fails or the payload does not decode.
    pub async fn world(&self) -> Result<Vec<CountryWorld>> {
        let value = self.client.get::<Value>("/countries-world", &[]).await?;
        Ok(Page::from_envelope(value)?.items)
    }
}

impl<T> ResourceService<T> {
    /// Creates a service for `path`; `plural` keys the reorder payload.
    pub fn new(client: ApiClient, path: &'static str, plural: &'static str) -> Self {
        Self {
            client,
            path,
            plural,
            _marker: PhantomData,
        }
    }

    /// Endpoint path, e.g. `/attributes`.
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Key of the reorder payload, e.g. `attributes`.
    pub fn plural(&self) -> &'static str {
        self.plural
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    fn item_path(&self, id: i64) -> String {
        format!("{}/{id}", self.path)
    }

    /// Deletes an item.
    ///
    /// # Errors
    ///
    /// Fails when the request fails.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&self.item_path(id)).await
    }

    /// Persists a new order with one batch request.
    ///
    /// Sends `POST <path>/reorder` with `{ "<plural>": [{id, order}, ..] }`.
    ///
    /// # Errors
    ///
    /// Fails when the request fails; the server then keeps its old order.
    pub async fn reorder(&self, entries: &[ReorderEntry]) -> Result<()> {
        let mut body = Map::new();
        body.insert(self.plural.to_string(), serde_json::to_value(entries)?);
        self.client
            .post::<_, Value>(&format!("{}/reorder", self.path), &body, Notify::Yes)
            .await
            .map(drop)
    }
}

impl<T: DeserializeOwned> ResourceService<T> {
    /// Fetches one page of items.
    ///
    /// # Errors
    ///
    /// Fails when the request fails or an item does not decode.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<T>> {
        let request = ApiRequest::get(self.path).query(query.to_pairs());
        let value = self.client.execute(request, Notify::Yes).await?;
        Page::from_envelope(value)
    }

    /// Fetches one item.
    ///
    /// # Errors
    ///
    /// Fails when the request fails or the item does not decode.
    pub async fn get(&self, id: i64) -> Result<T> {
        let value = self.client.get::<Value>(&self.item_path(id), &[]).await?;
        envelope_data(value)
    }

    /// Creates an item.
    ///
    /// # Errors
    ///
    /// Fails when the request fails or the created item does not decode.
    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> Result<T> {
        let value = self
            .client
            .post::<_, Value>(self.path, body, Notify::Yes)
            .await?;
        envelope_data(value)
    }

    /// Partially updates an item.
    ///
    /// # Errors
    ///
    /// Fails when the request fails or the updated item does not decode.
    pub async fn update<B: Serialize + ?Sized>(&self, id: i64, body: &B) -> Result<T> {
        let value = self
            .client
            .patch::<_, Value>(&self.item_path(id), body)
            .await?;
        envelope_data(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateAttribute;
    use crate::request::Method;
    use crate::transport::MockTransport;
    use serde_json::json;

    fn service() -> (AttributeService, MockTransport) {
        let mock = MockTransport::new();
        (AttributeService::attributes(ApiClient::new(mock.clone())), mock)
    }

    #[tokio::test]
    async fn test_reorder_body() {
        let (service, mock) = service();
        mock.json(Method::Post, "/attributes/reorder", &json!({"success": true}));

        service
            .reorder(&[ReorderEntry { id: 3, order: 1 }, ReorderEntry { id: 1, order: 2 }])
            .await
            .unwrap();

        let sent = mock.requests_to(Method::Post, "/attributes/reorder");
        assert_eq!(
            sent[0].json_body().unwrap(),
            &json!({"attributes": [{"id": 3, "order": 1}, {"id": 1, "order": 2}]})
        );
    }

    #[tokio::test]
    async fn test_countries_reorder_key() {
        let mock = MockTransport::new();
        let service = CountryService::countries(ApiClient::new(mock.clone()));
        mock.json(Method::Post, "/countries/reorder", &json!({}));
        service.reorder(&[ReorderEntry { id: 1, order: 1 }]).await.unwrap();
        let body = mock.requests()[0].json_body().cloned().unwrap();
        assert!(body.get("countries").is_some());
    }

    #[tokio::test]
    async fn test_list_sends_query() {
        let (service, mock) = service();
        mock.json(
            Method::Get,
            "/attributes",
            &json!({"data": [{"id": 1, "name_en": "Fee", "name_ar": "رسوم", "order": 1}],
                    "meta": {"page": 2, "limit": 20, "total": 21, "totalPages": 2}}),
        );

        let page = service
            .list(&ListQuery::new().page(2).limit(20).search("Fee"))
            .await
            .unwrap();
        assert_eq!(page.items[0].name_en, "Fee");
        assert_eq!(page.total_pages(), 2);

        let sent = &mock.requests()[0];
        assert_eq!(sent.query_value("page"), Some("2"));
        assert_eq!(sent.query_value("search"), Some("Fee"));
    }

    #[tokio::test]
    async fn test_create_and_update() {
        let (service, mock) = service();
        let item = json!({"data": {"id": 9, "name_en": "Fee", "name_ar": "رسوم", "order": 4}});
        mock.json(Method::Post, "/attributes", &item);
        mock.json(Method::Patch, "/attributes/9", &item);

        let created = service
            .create(&CreateAttribute {
                name_en: "Fee".to_string(),
                name_ar: "رسوم".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, 9);

        let updated = service.update(9, &json!({"name_en": "Fee"})).await.unwrap();
        assert_eq!(updated.order, 4);
        assert_eq!(service.client().notices().len(), 2);
    }

    #[tokio::test]
    async fn test_world_list() {
        let mock = MockTransport::new();
        let service = CountryService::countries(ApiClient::new(mock.clone()));
        mock.json(
            Method::Get,
            "/countries-world",
            &json!({"data": [{"id": 1, "name_en": "Spain", "name_ar": "إسبانيا", "image_url": ""}]}),
        );
        let world = service.world().await.unwrap();
        assert_eq!(world[0].name_en, "Spain");
    }
}
