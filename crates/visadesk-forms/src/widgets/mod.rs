//! Form widgets for rendering HTML inputs.

mod bootstrap;

pub use bootstrap::{BootstrapSelect, BootstrapTextInput, BootstrapTextarea};

use std::collections::BTreeMap;

/// Attributes that can be applied to a widget.
///
/// Kept sorted so rendered markup is stable.
#[derive(Debug, Clone, Default)]
pub struct WidgetAttrs {
    /// HTML attributes.
    pub attrs: BTreeMap<String, String>,
}

impl WidgetAttrs {
    /// Creates new empty widget attributes.
    pub fn new() -> Self {
        Self {
            attrs: BTreeMap::new(),
        }
    }

    /// Sets an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Gets an attribute.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.attrs.get(key)
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Renders every attribute not in `skip` as ` key="value"` pairs.
    pub fn to_html_except(&self, skip: &[&str]) -> String {
        self.attrs
            .iter()
            .filter(|(k, _)| !skip.contains(&k.as_str()))
            .map(|(k, v)| format!(r#" {k}="{}""#, html_escape(v)))
            .collect()
    }

    /// Returns the element id, defaulting to `id_<name>`.
    pub fn id_for(&self, name: &str) -> String {
        self.get("id")
            .cloned()
            .unwrap_or_else(|| format!("id_{name}"))
    }

    /// Returns `base` followed by any extra `class` attribute.
    pub fn class_with(&self, base: &str) -> String {
        match self.get("class") {
            Some(extra) if !extra.is_empty() => format!("{base} {extra}"),
            _ => base.to_string(),
        }
    }
}

/// Trait for form widgets that render HTML inputs.
pub trait Widget: Send + Sync {
    /// Renders the widget as HTML.
    ///
    /// # Arguments
    /// * `name` - The field name (used for the name attribute)
    /// * `value` - The current value (if any)
    /// * `attrs` - Additional HTML attributes
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String;

    /// Returns the HTML input type.
    fn input_type(&self) -> &str {
        "text"
    }
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"test\""), "&quot;test&quot;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn test_widget_attrs() {
        let attrs = WidgetAttrs::new()
            .with("class", "is-invalid")
            .with("dir", "rtl")
            .with("id", "my-input");
        assert_eq!(attrs.to_html_except(&["class", "id"]), r#" dir="rtl""#);
        assert_eq!(attrs.class_with("form-control"), "form-control is-invalid");
        assert_eq!(attrs.id_for("x"), "my-input");
        assert_eq!(WidgetAttrs::new().id_for("x"), "id_x");
    }
}
