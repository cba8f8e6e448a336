//! End-to-end flows of the client over an in-memory transport.

use serde_json::json;
use visadesk_client::models::{ReorderEntry, UpdateAboutUs};
use visadesk_client::services::{
    AboutUsService, AttributeService, AuthService, FaqService, PublicService,
};
use visadesk_client::{ApiClient, ListQuery, Method, MockTransport, NoticeLevel};

fn setup() -> (ApiClient, MockTransport) {
    let mock = MockTransport::new();
    (ApiClient::new(mock.clone()), mock)
}

fn login_reply() -> serde_json::Value {
    json!({
        "success": true,
        "data": {
            "access_token": "jwt-1",
            "user": {"id": 1, "email": "admin@example.com", "firstName": "Lina", "lastName": "Saleh", "role": "admin"}
        }
    })
}

#[tokio::test]
async fn test_session_expires_on_401_for_any_request() {
    let (client, mock) = setup();
    mock.json(Method::Post, "/auth/login", &login_reply());
    mock.status(Method::Get, "/attributes", 401, "Unauthorized");

    AuthService::new(client.clone())
        .login("admin@example.com", "secret")
        .await
        .unwrap();
    assert!(client.session().is_authenticated());

    let err = AttributeService::attributes(client.clone())
        .list(&ListQuery::new())
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert!(!client.session().is_authenticated());
    assert!(client.session().login_required());
}

#[tokio::test]
async fn test_failed_reorder_reports_error_notice() {
    let (client, mock) = setup();
    mock.status(Method::Post, "/attributes/reorder", 422, "Invalid order");

    let result = AttributeService::attributes(client.clone())
        .reorder(&[ReorderEntry { id: 1, order: 1 }])
        .await;

    assert_eq!(result.unwrap_err().status(), 422);
    let notice = client.notices().latest().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.text, "Invalid order");
}

#[tokio::test]
async fn test_validation_errors_are_kept() {
    let (client, mock) = setup();
    mock.reply(
        Method::Post,
        "/attributes",
        visadesk_client::ApiReply::json(&json!({
            "message": "Validation failed",
            "errors": {"name_en": ["name_en must be unique"]}
        }))
        .with_status(400),
    );

    let err = AttributeService::attributes(client)
        .create(&json!({"name_en": "Fee", "name_ar": "رسوم"}))
        .await
        .unwrap_err();
    let visadesk_client::ClientError::Api(api) = err else {
        panic!("expected an API error");
    };
    assert_eq!(api.message, "Validation failed");
    assert_eq!(api.errors.unwrap()["name_en"], vec!["name_en must be unique"]);
}

#[tokio::test]
async fn test_content_pages() {
    let (client, mock) = setup();
    mock.json(
        Method::Get,
        "/faqs",
        &json!({"data": {"id": 1, "items": [
            {"questionEn": "How long?", "questionAr": "كم المدة؟", "answerEn": "Two weeks", "answerAr": "أسبوعان"}
        ]}}),
    );
    mock.json(Method::Put, "/faqs", &json!({"data": {"id": 1, "items": []}}));
    mock.json(
        Method::Put,
        "/about-us",
        &json!({"data": {"id": 1, "image": "", "contentEn": "We help", "contentAr": "نساعد"}}),
    );

    let faqs = FaqService::new(client.clone());
    let current = faqs.get().await.unwrap();
    assert_eq!(current.items[0].answer_ar, "أسبوعان");
    faqs.save(&[]).await.unwrap();
    assert_eq!(
        mock.requests_to(Method::Put, "/faqs")[0].json_body().unwrap(),
        &json!({"items": []})
    );

    let about = AboutUsService::new(client.clone())
        .update(UpdateAboutUs {
            content_en: Some("We help".to_string()),
            content_ar: None,
        })
        .await
        .unwrap();
    assert_eq!(about.content_ar, "نساعد");
    let sent = &mock.requests_to(Method::Put, "/about-us")[0];
    assert_eq!(sent.multipart_parts(), Some(&[("contentEn".to_string(), "We help".to_string())][..]));
    assert_eq!(client.notices().len(), 2);
}

#[tokio::test]
async fn test_public_catalog_request() {
    let (client, mock) = setup();
    mock.json(Method::Get, "/countries", &json!({"data": [], "meta": {"total": 0}}));

    let countries = PublicService::new(client).countries(Some(" spa ")).await.unwrap();
    assert!(countries.is_empty());

    let sent = &mock.requests()[0];
    assert_eq!(sent.query_value("search"), Some("spa"));
    assert_eq!(sent.query_value("limit"), Some("100"));
}
