//! Field and form validation over a shared error map.
//!
//! [`Validation`] is owned by the page or form controller. It never performs
//! I/O: every operation is a synchronous transformation of its [`ErrorMap`].

use std::collections::HashMap;

use crate::error::ErrorMap;
use crate::language::Language;
use crate::validation::Rule;
use crate::value::FieldValue;

/// Ordered mapping from field name to the rules applied to it.
///
/// Order matters: after a failed full-form pass the first failing field in
/// this order is the one to focus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleConfig {
    entries: Vec<(String, Vec<Rule>)>,
}

impl RuleConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the rules for a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, rules: &[Rule]) -> Self {
        self.insert(name, rules.to_vec());
        self
    }

    /// Adds or replaces the rules for a field, keeping its original position.
    pub fn insert(&mut self, name: impl Into<String>, rules: Vec<Rule>) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = rules;
        } else {
            self.entries.push((name, rules));
        }
    }

    /// Returns the rules for a field.
    pub fn rules(&self, name: &str) -> Option<&[Rule]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, rules)| rules.as_slice())
    }

    /// Iterates over fields in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.entries
            .iter()
            .map(|(name, rules)| (name.as_str(), rules.as_slice()))
    }

    /// Returns the number of configured fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no field is configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Validation state for one form.
#[derive(Debug, Clone, Default)]
pub struct Validation {
    errors: ErrorMap,
    language: Language,
    first_error: Option<String>,
}

impl Validation {
    /// Creates an empty validation state producing messages in `language`.
    pub fn new(language: Language) -> Self {
        Self {
            errors: ErrorMap::new(),
            language,
            first_error: None,
        }
    }

    /// Returns the language used for new messages.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Switches the message language.
    ///
    /// Stored messages keep their text until the next validation pass
    /// recomputes them.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Returns the current error map.
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Returns the message for one field, if it is failing.
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name)
    }

    /// Returns whether no field is failing.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the first failing field of the last full-form pass.
    pub fn first_error(&self) -> Option<&str> {
        self.first_error.as_deref()
    }

    /// Validates one field on change.
    ///
    /// `Rule::Required` is skipped here so that a field being typed into is
    /// never reported as missing; it is only enforced by [`validate_all`].
    /// The field's entry is set to the first failing rule's message or
    /// cleared when every checked rule passes.
    ///
    /// [`validate_all`]: Self::validate_all
    pub fn validate_one(&mut self, name: &str, value: &FieldValue, rules: &[Rule]) -> bool {
        let failure = rules
            .iter()
            .filter(|rule| **rule != Rule::Required)
            .find_map(|rule| rule.validate(value, self.language).err());

        match failure {
            Some(message) => {
                self.errors.set(name, message);
                false
            }
            None => {
                self.errors.remove(name);
                true
            }
        }
    }

    /// Validates every configured field against all of its rules.
    ///
    /// The error map is replaced wholesale, so entries for fields that are no
    /// longer configured disappear. Missing values count as `Null`.
    pub fn validate_all(
        &mut self,
        values: &HashMap<String, FieldValue>,
        config: &RuleConfig,
    ) -> bool {
        let mut errors = ErrorMap::new();
        let mut first_error = None;

        for (name, rules) in config.iter() {
            let value = values.get(name).unwrap_or(&FieldValue::Null);
            if let Some(message) = rules
                .iter()
                .find_map(|rule| rule.validate(value, self.language).err())
            {
                errors.set(name, message);
                if first_error.is_none() {
                    first_error = Some(name.to_string());
                }
            }
        }

        self.errors = errors;
        self.first_error = first_error;
        self.errors.is_empty()
    }

    /// Removes a field's entry.
    pub fn clear_error(&mut self, name: &str) {
        self.errors.remove(name);
        if self.first_error.as_deref() == Some(name) {
            self.first_error = None;
        }
    }

    /// Stores an externally produced message, e.g. a server-side field error.
    pub fn set_error(&mut self, name: &str, message: impl Into<String>) {
        self.errors.set(name, message);
    }

    /// Drops entries for fields that no longer exist.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.errors.retain(&mut keep);
        if self.first_error.as_deref().is_some_and(|name| !keep(name)) {
            self.first_error = None;
        }
    }

    /// Clears every entry.
    pub fn reset(&mut self) {
        self.errors = ErrorMap::new();
        self.first_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, FieldValue> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), FieldValue::from(*v)))
            .collect()
    }

    #[test]
    fn test_validate_one_skips_required() {
        let mut v = Validation::new(Language::En);
        assert!(v.validate_one("x", &FieldValue::from(""), &[Rule::Required]));
        assert!(v.errors().is_empty());
        assert!(v.validate_one("x", &FieldValue::Null, &[Rule::Required, Rule::Latin]));
        assert!(v.errors().is_empty());
    }

    #[test]
    fn test_validate_one_sets_and_clears() {
        let mut v = Validation::new(Language::En);
        assert!(!v.validate_one("nameEn", &FieldValue::from("أحمد"), &[Rule::Required, Rule::Latin]));
        assert_eq!(v.error("nameEn"), Some("Only English characters are allowed"));

        assert!(v.validate_one("nameEn", &FieldValue::from("Ahmed"), &[Rule::Required, Rule::Latin]));
        assert_eq!(v.error("nameEn"), None);
    }

    #[test]
    fn test_validate_one_reports_first_failing_rule() {
        let mut v = Validation::new(Language::En);
        v.validate_one("f", &FieldValue::from("أ1"), &[Rule::Numeric, Rule::Latin]);
        assert_eq!(v.error("f"), Some("Only numbers are allowed"));
    }

    #[test]
    fn test_validate_all() {
        let config = RuleConfig::new().field("name", &[Rule::Required]);
        let mut v = Validation::new(Language::En);

        assert!(!v.validate_all(&values(&[("name", "")]), &config));
        assert!(v.errors().contains("name"));
        assert_eq!(v.first_error(), Some("name"));

        assert!(v.validate_all(&values(&[("name", "ok")]), &config));
        assert!(v.errors().is_empty());
        assert_eq!(v.first_error(), None);
    }

    #[test]
    fn test_validate_all_first_error_follows_config_order() {
        let config = RuleConfig::new()
            .field("b", &[Rule::Required])
            .field("a", &[Rule::Required])
            .field("c", &[Rule::Numeric]);
        let mut v = Validation::new(Language::En);
        assert!(!v.validate_all(&values(&[("c", "x")]), &config));
        assert_eq!(v.first_error(), Some("b"));
        assert_eq!(v.errors().len(), 3);
    }

    #[test]
    fn test_validate_all_drops_stale_entries() {
        let mut v = Validation::new(Language::En);
        v.set_error("removed", "server says no");
        let config = RuleConfig::new().field("kept", &[Rule::Required]);
        v.validate_all(&values(&[("kept", "yes")]), &config);
        assert!(!v.errors().contains("removed"));
    }

    #[test]
    fn test_language_switch_only_changes_text_on_next_pass() {
        let config = RuleConfig::new().field("name", &[Rule::Required]);
        let input = values(&[("name", " ")]);
        let mut v = Validation::new(Language::En);

        assert!(!v.validate_all(&input, &config));
        v.set_language(Language::Ar);
        assert_eq!(v.error("name"), Some("This field is required"));

        assert!(!v.validate_all(&input, &config));
        assert_eq!(v.error("name"), Some("هذا الحقل مطلوب"));
    }

    #[test]
    fn test_clear_set_and_retain() {
        let mut v = Validation::new(Language::En);
        v.set_error("a", "bad");
        v.set_error("b", "bad");
        v.clear_error("a");
        assert!(!v.errors().contains("a"));
        v.retain(|name| name != "b");
        assert!(v.is_valid());
    }

    #[test]
    fn test_rule_config_insert_keeps_position() {
        let mut config = RuleConfig::new()
            .field("a", &[Rule::Required])
            .field("b", &[Rule::Required]);
        config.insert("a", vec![Rule::Latin]);
        let names: Vec<_> = config.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(config.rules("a"), Some(&[Rule::Latin][..]));
    }
}
