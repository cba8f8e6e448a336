//! Field helpers for the bilingual forms of the dashboard.

use crate::form::FieldDescriptor;
use crate::language::Language;
use crate::validation::Rule;
use crate::widgets::{BootstrapSelect, BootstrapTextInput, BootstrapTextarea};

/// A required text field that only accepts English (Latin) text.
pub fn english_text(name: &str, label: &str) -> FieldDescriptor {
    FieldDescriptor::new(name, label, BootstrapTextInput::new())
        .rules(&[Rule::Required, Rule::Latin])
        .direction(Language::En)
}

/// A required text field that only accepts Arabic text.
pub fn arabic_text(name: &str, label: &str) -> FieldDescriptor {
    FieldDescriptor::new(name, label, BootstrapTextInput::new())
        .rules(&[Rule::Required, Rule::Arabic])
        .direction(Language::Ar)
}

/// A required multi-line field for English content.
pub fn english_textarea(name: &str, label: &str, rows: usize) -> FieldDescriptor {
    FieldDescriptor::new(name, label, BootstrapTextarea::new(rows))
        .rules(&[Rule::Required, Rule::Latin])
        .direction(Language::En)
}

/// A required multi-line field for Arabic content.
pub fn arabic_textarea(name: &str, label: &str, rows: usize) -> FieldDescriptor {
    FieldDescriptor::new(name, label, BootstrapTextarea::new(rows))
        .rules(&[Rule::Required, Rule::Arabic])
        .direction(Language::Ar)
}

/// A required field accepting digits only, e.g. a phone number.
pub fn numeric_text(name: &str, label: &str) -> FieldDescriptor {
    FieldDescriptor::new(name, label, BootstrapTextInput::tel()).rules(&[Rule::Required, Rule::Numeric])
}

/// A required free-text field in either script.
pub fn required_text(name: &str, label: &str) -> FieldDescriptor {
    FieldDescriptor::new(name, label, BootstrapTextInput::new()).rule(Rule::Required)
}

/// A required password field.
pub fn password(name: &str, label: &str) -> FieldDescriptor {
    FieldDescriptor::new(name, label, BootstrapTextInput::password()).rule(Rule::Required)
}

/// A required select over `(value, label)` choices.
pub fn required_choice(name: &str, label: &str, choices: Vec<(String, String)>) -> FieldDescriptor {
    FieldDescriptor::new(name, label, BootstrapSelect::new(choices)).rule(Rule::Required)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bilingual_pair() {
        let en = english_text("nameEn", "Name (English)");
        let ar = arabic_text("nameAr", "Name (Arabic)");
        assert_eq!(en.rules, vec![Rule::Required, Rule::Latin]);
        assert_eq!(ar.rules, vec![Rule::Required, Rule::Arabic]);
        assert_eq!(ar.direction, Language::Ar);
    }

    #[test]
    fn test_numeric_text() {
        let field = numeric_text("phoneNumber", "Phone number");
        assert!(field.is_required());
        assert_eq!(field.widget.input_type(), "tel");
    }

    #[test]
    fn test_required_choice() {
        let field = required_choice(
            "countryWorldId",
            "Country",
            vec![("1".to_string(), "Jordan - الأردن".to_string())],
        );
        assert_eq!(field.rules, vec![Rule::Required]);
        assert_eq!(field.widget.input_type(), "select");
    }
}
