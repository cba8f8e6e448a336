//! Controllers for the dashboard screens and the public site.

mod about_us;
mod attributes;
mod catalog;
mod contact_requests;
mod countries;
mod faqs;
mod login;

pub use about_us::AboutUsEditor;
pub use attributes::AttributesPage;
pub use catalog::Catalog;
pub use contact_requests::{ContactRequestForm, ContactRequestsPage};
pub use countries::{attribute_field, AttributeRow, CountriesPage, CountryForm, COUNTRY_FIELD};
pub use faqs::{FaqEditor, FaqEntry, FaqText};
pub use login::LoginForm;

use visadesk_client::ClientError;
use visadesk_forms::FormState;

/// Copies server-side field errors into `form`.
///
/// `fields` maps the server's field names to the form's.
fn apply_server_errors(form: &mut FormState, error: &ClientError, fields: &[(&str, &str)]) {
    let ClientError::Api(api) = error else {
        return;
    };
    let Some(errors) = &api.errors else {
        return;
    };
    for (server, field) in fields {
        if let Some(message) = errors.get(*server).and_then(|m| m.first()) {
            form.validation_mut().set_error(field, message.clone());
        }
    }
}
