use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A visitor's request to be contacted about a visa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub id: i64,
    pub name: String,
    pub nationality: String,
    pub phone_number: String,
    pub destination_country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of the public `POST /contact-requests`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContactRequest {
    pub name: String,
    pub nationality: String,
    pub phone_number: String,
    pub destination_country: String,
}

/// Filters of the admin contact request list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactRequestFilter {
    pub destination_country: Option<String>,
    pub nationality: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ContactRequestFilter {
    /// Query parameters for the filters that are set.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        [
            ("destination_country", self.destination_country.clone()),
            ("nationality", self.nationality.clone()),
            ("startDate", self.start_date.map(|d| d.format("%Y-%m-%d").to_string())),
            ("endDate", self.end_date.map(|d| d.format("%Y-%m-%d").to_string())),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.filter(|v| !v.is_empty()).map(|v| (k.to_string(), v)))
        .collect()
    }
}
