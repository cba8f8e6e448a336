use serde::{Deserialize, Serialize};

/// The "About Us" page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutUs {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub content_en: String,
    #[serde(default)]
    pub content_ar: String,
}

/// Text content for `PUT /about-us`; the image is managed elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateAboutUs {
    pub content_en: Option<String>,
    pub content_ar: Option<String>,
}

impl UpdateAboutUs {
    /// Multipart text parts for the fields that are set.
    pub fn into_parts(self) -> Vec<(String, String)> {
        [("contentEn", self.content_en), ("contentAr", self.content_ar)]
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name.to_string(), v)))
            .collect()
    }
}
