use serde::{Deserialize, Serialize};

/// One question and answer, in both languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqItem {
    pub question_en: String,
    pub question_ar: String,
    pub answer_en: String,
    pub answer_ar: String,
}

/// The single FAQ document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faqs {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub items: Vec<FaqItem>,
}
