//! # visadesk-forms
//!
//! Bilingual (English/Arabic) form validation with Bootstrap 5 widgets.
//!
//! This crate provides:
//! - A closed set of validation rules with English and Arabic messages
//! - A validation engine maintaining a per-field error map
//! - Form state wiring field values to the engine
//! - Bootstrap 5 rendering of fields with their inline errors
//!
//! ## Per-field and full-form validation
//!
//! Change events validate one field and skip `required`, so a field being
//! typed into is never flagged as missing. Submitting runs every rule,
//! `required` included, and replaces the whole error map.
//!
//! ```rust
//! use std::collections::HashMap;
//! use visadesk_forms::{FieldValue, Language, Rule, RuleConfig, Validation};
//!
//! let mut validation = Validation::new(Language::En);
//!
//! // Keystroke: `required` is not checked.
//! assert!(validation.validate_one("nameEn", &FieldValue::from(""), &[Rule::Required, Rule::Latin]));
//!
//! // Submit: every rule is checked.
//! let config = RuleConfig::new().field("nameEn", &[Rule::Required, Rule::Latin]);
//! let values = HashMap::from([("nameEn".to_string(), FieldValue::from(""))]);
//! assert!(!validation.validate_all(&values, &config));
//! assert_eq!(validation.first_error(), Some("nameEn"));
//! assert_eq!(validation.error("nameEn"), Some("This field is required"));
//! ```
//!
//! ## Forms
//!
//! ```rust
//! use visadesk_forms::fields::{arabic_text, english_text};
//! use visadesk_forms::{FormError, FormState, Language};
//!
//! let mut form = FormState::new(Language::Ar)
//!     .field(english_text("nameEn", "Name (English)"))
//!     .field(arabic_text("nameAr", "Name (Arabic)"));
//!
//! form.set_value("nameEn", "Work visa").unwrap();
//! match form.submit() {
//!     Err(FormError::Invalid { first }) => assert_eq!(first, "nameAr"),
//!     _ => unreachable!(),
//! }
//! assert_eq!(form.errors().get("nameAr"), Some("هذا الحقل مطلوب"));
//! ```

mod engine;
mod error;
pub mod fields;
mod form;
mod language;
pub mod validation;
mod value;
pub mod widgets;

pub use engine::{RuleConfig, Validation};
pub use error::{ErrorMap, FormError, Result};
pub use form::{render_bootstrap_field, render_bootstrap_form, FieldDescriptor, FormState};
pub use language::Language;
pub use validation::{parse_rules, Rule};
pub use value::FieldValue;
