//! Resource models as exchanged with the backend.

mod about_us;
mod attribute;
mod auth;
mod contact_request;
mod country;
mod faq;

pub use about_us::{AboutUs, UpdateAboutUs};
pub use attribute::{Attribute, CreateAttribute, UpdateAttribute};
pub use auth::{LoginRequest, LoginResponse, User};
pub use contact_request::{ContactRequest, ContactRequestFilter, NewContactRequest};
pub use country::{Country, CountryAttribute, CountryInput, CountryWorld, UpdateCountry};
pub use faq::{FaqItem, Faqs};

use serde::{Deserialize, Serialize};

/// One `{id, order}` pair of a batch reorder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderEntry {
    /// Record id.
    pub id: i64,
    /// New 1-based position.
    pub order: i64,
}
