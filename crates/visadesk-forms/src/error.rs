//! Error types for forms.

use std::collections::HashMap;
use thiserror::Error;

/// Form-specific errors.
#[derive(Debug, Error)]
pub enum FormError {
    /// The form did not pass validation; `first` is the field to focus.
    #[error("form is invalid, first failing field: {first}")]
    Invalid { first: String },

    /// The form has no field with this name.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A rule identifier outside the closed rule set.
    #[error("unknown validation rule: {0}")]
    UnknownRule(String),

    /// A language code other than `en` or `ar`.
    #[error("unknown language: {0}")]
    UnknownLanguage(String),
}

/// Current validation message per field.
///
/// A field without an entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    /// Messages keyed by field name.
    pub errors: HashMap<String, String>,
}

impl ErrorMap {
    /// Creates a new empty ErrorMap.
    pub fn new() -> Self {
        Self {
            errors: HashMap::new(),
        }
    }

    /// Sets the message for a field, replacing any previous one.
    pub fn set(&mut self, field: &str, message: impl Into<String>) {
        self.errors.insert(field.to_string(), message.into());
    }

    /// Removes the entry for a field.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.errors.remove(field)
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the message for a specific field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Returns whether a field currently has an error.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Keeps only the fields for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.errors.retain(|field, _| keep(field));
    }

    /// Iterates over `(field, message)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

impl std::fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable();
        for (field, message) in entries {
            writeln!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
