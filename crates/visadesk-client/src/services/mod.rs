//! Typed services over [`ApiClient`](crate::ApiClient), one per backend resource.

mod about_us;
mod auth;
mod contact_requests;
mod faqs;
mod public;
mod resource;

pub use about_us::AboutUsService;
pub use auth::AuthService;
pub use contact_requests::ContactRequestService;
pub use faqs::FaqService;
pub use public::{PublicService, PUBLIC_COUNTRY_LIMIT};
pub use resource::{AttributeService, CountryService, ResourceService};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;
use crate::response::ApiResponse;

/// Unwraps the `data` member of an envelope.
pub(crate) fn envelope_data<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(ApiResponse::<T>::from_value(value)?.data)
}
