use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Attribute;

/// An entry of the world country list a catalog country is picked from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryWorld {
    pub id: i64,
    pub name_en: String,
    pub name_ar: String,
    #[serde(default)]
    pub image_url: String,
}

/// The value of one attribute for one country.
///
/// Public endpoints also embed the attribute itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryAttribute {
    #[serde(rename = "attributeId")]
    pub attribute_id: i64,
    #[serde(default)]
    pub value_en: String,
    #[serde(default)]
    pub value_ar: String,
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<Attribute>,
}

/// A country of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    #[serde(rename = "countryWorldId")]
    pub country_world_id: i64,
    #[serde(rename = "countryWorld", default, skip_serializing_if = "Option::is_none")]
    pub country_world: Option<CountryWorld>,
    #[serde(default)]
    pub attributes: Vec<CountryAttribute>,
    #[serde(default)]
    pub order: i64,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Country {
    /// English display name, empty when the world entry is not embedded.
    pub fn name_en(&self) -> &str {
        self.country_world.as_ref().map_or("", |w| w.name_en.as_str())
    }

    /// Arabic display name, empty when the world entry is not embedded.
    pub fn name_ar(&self) -> &str {
        self.country_world.as_ref().map_or("", |w| w.name_ar.as_str())
    }

    /// Attributes the public site shows.
    pub fn active_attributes(&self) -> impl Iterator<Item = &CountryAttribute> {
        self.attributes.iter().filter(|a| a.is_active)
    }
}

/// Body of `POST /countries` and `PATCH /countries/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryInput {
    #[serde(rename = "countryWorldId")]
    pub country_world_id: i64,
    pub attributes: Vec<CountryAttribute>,
}

/// Body of `PATCH /countries/:id` carrying only what changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCountry {
    #[serde(rename = "countryWorldId", skip_serializing_if = "Option::is_none")]
    pub country_world_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<CountryAttribute>>,
}

impl UpdateCountry {
    /// Returns whether nothing changed.
    pub fn is_empty(&self) -> bool {
        self.country_world_id.is_none() && self.attributes.is_none()
    }
}
