//! Field values as seen by the validation engine.

use serde_json::Value;

/// The current value of a form field.
///
/// Script and numeric rules only look at `Text`; every other variant passes
/// them. `Null` and whitespace-only text fail `required`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// No value (unset select, missing key).
    #[default]
    Null,
    /// Text typed by the user.
    Text(String),
    /// A numeric value, e.g. a selected record id.
    Number(f64),
    /// A checkbox or toggle.
    Bool(bool),
}

impl FieldValue {
    /// Returns the text if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns whether the value counts as missing for `required`.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) | Self::Bool(_) => false,
        }
    }

    /// Renders the value for an HTML `value` attribute.
    pub fn to_display(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(n.to_string()),
            Self::Bool(b) => Some(b.to_string()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<i64> for FieldValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<Self>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::String(s) => Self::Text(s.clone()),
            Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            Value::Bool(b) => Self::Bool(*b),
            Value::Array(_) | Value::Object(_) => Self::Text(value.to_string()),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_values() {
        assert!(FieldValue::Null.is_blank());
        assert!(FieldValue::from("   ").is_blank());
        assert!(!FieldValue::from("a").is_blank());
        assert!(!FieldValue::from(0_i64).is_blank());
        assert!(FieldValue::from(None::<String>).is_blank());
    }

    #[test]
    fn test_from_json() {
        assert_eq!(FieldValue::from(json!("x")), FieldValue::from("x"));
        assert_eq!(FieldValue::from(json!(3)), FieldValue::Number(3.0));
        assert_eq!(FieldValue::from(json!(null)), FieldValue::Null);
    }
}
