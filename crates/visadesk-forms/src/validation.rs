//! The closed set of field validation rules.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::FormError;
use crate::language::Language;
use crate::value::FieldValue;

// Digits, whitespace and the shared punctuation allowlist are accepted by
// both script rules.
static ARABIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[\x{0600}-\x{06FF}0-9\s!@#$%^\&*()_+\-=\[\]{};':"\\|,.<>/?]+$"#)
        .expect("arabic script pattern is valid")
});

static LATIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[a-zA-Z0-9\s!@#$%^\&*()_+\-=\[\]{};':"\\|,.<>/?]+$"#)
        .expect("latin script pattern is valid")
});

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("numeric pattern is valid"));

/// A validation rule applied to a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// The value must be present and not blank.
    Required,
    /// Text may only use Arabic script, digits, whitespace and punctuation.
    Arabic,
    /// Text may only use basic Latin letters, digits, whitespace and punctuation.
    Latin,
    /// Text may only contain ASCII digits.
    Numeric,
}

impl Rule {
    /// Every rule, in declaration order.
    pub const ALL: [Self; 4] = [Self::Required, Self::Arabic, Self::Latin, Self::Numeric];

    /// Returns the rule identifier used in rule configurations.
    pub fn name(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Arabic => "isAr",
            Self::Latin => "isEn",
            Self::Numeric => "isNum",
        }
    }

    /// Returns the failure message for this rule in the given language.
    pub fn message(self, language: Language) -> &'static str {
        match self {
            Self::Required => language.pick("This field is required", "هذا الحقل مطلوب"),
            Self::Arabic => language.pick(
                "Only Arabic characters are allowed",
                "يُسمح فقط بالأحرف العربية",
            ),
            Self::Latin => language.pick(
                "Only English characters are allowed",
                "يُسمح فقط بالأحرف الإنجليزية",
            ),
            Self::Numeric => language.pick("Only numbers are allowed", "يُسمح فقط بالأرقام"),
        }
    }

    /// Returns whether the value passes this rule.
    ///
    /// Empty text and non-text values pass every rule except `Required`.
    pub fn check(self, value: &FieldValue) -> bool {
        if self == Self::Required {
            return !value.is_blank();
        }
        let Some(text) = value.as_text().filter(|t| !t.is_empty()) else {
            return true;
        };
        match self {
            Self::Required => true,
            Self::Arabic => ARABIC.is_match(text),
            Self::Latin => LATIN.is_match(text),
            Self::Numeric => NUMERIC.is_match(text),
        }
    }

    /// Validates a value and returns the localized message on failure.
    pub fn validate(self, value: &FieldValue, language: Language) -> Result<(), &'static str> {
        if self.check(value) {
            Ok(())
        } else {
            Err(self.message(language))
        }
    }
}

impl FromStr for Rule {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "required" => Ok(Self::Required),
            "isAr" | "arabic" => Ok(Self::Arabic),
            "isEn" | "latin" | "english" => Ok(Self::Latin),
            "isNum" | "numeric" => Ok(Self::Numeric),
            other => Err(FormError::UnknownRule(other.to_string())),
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a comma-separated rule list such as `"required,isEn"`.
pub fn parse_rules(list: &str) -> Result<Vec<Rule>, FormError> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}
