use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A country attribute such as "Processing time", shown in both languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: i64,
    pub name_en: String,
    pub name_ar: String,
    #[serde(default)]
    pub order: i64,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /attributes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAttribute {
    pub name_en: String,
    pub name_ar: String,
}

/// Body of `PATCH /attributes/:id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAttribute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_ar: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_attribute() {
        let attr: Attribute = serde_json::from_value(json!({
            "id": 4,
            "name_en": "Visa fee",
            "name_ar": "رسوم التأشيرة",
            "order": 2,
            "createdAt": "2025-01-05T10:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(attr.order, 2);
        assert!(attr.created_at.is_some());
        assert!(attr.updated_at.is_none());
    }

    #[test]
    fn test_partial_update_skips_missing() {
        let body = serde_json::to_value(UpdateAttribute {
            name_ar: Some("رسوم".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, json!({"name_ar": "رسوم"}));
    }
}
