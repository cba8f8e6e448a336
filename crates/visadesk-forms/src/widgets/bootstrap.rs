//! Bootstrap 5 form widgets.

use super::{html_escape, Widget, WidgetAttrs};

const OWN_ATTRS: [&str; 2] = ["class", "id"];

/// Bootstrap 5 text input widget.
#[derive(Debug, Clone)]
pub struct BootstrapTextInput {
    /// The HTML input type (text, tel, password, ...).
    pub input_type: String,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

impl Default for BootstrapTextInput {
    fn default() -> Self {
        Self {
            input_type: "text".to_string(),
            placeholder: None,
        }
    }
}

impl BootstrapTextInput {
    /// Creates a new text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a password input.
    pub fn password() -> Self {
        Self {
            input_type: "password".to_string(),
            ..Default::default()
        }
    }

    /// Creates a telephone input.
    pub fn tel() -> Self {
        Self {
            input_type: "tel".to_string(),
            ..Default::default()
        }
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }
}

impl Widget for BootstrapTextInput {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let value_attr = value
            .map(|v| format!(r#" value="{}""#, html_escape(v)))
            .unwrap_or_default();

        let placeholder_attr = self
            .placeholder
            .as_ref()
            .map(|p| format!(r#" placeholder="{}""#, html_escape(p)))
            .unwrap_or_default();

        format!(
            r#"<input type="{}" class="{}" id="{}" name="{}"{}{}{}>"#,
            self.input_type,
            attrs.class_with("form-control"),
            attrs.id_for(name),
            name,
            value_attr,
            placeholder_attr,
            attrs.to_html_except(&OWN_ATTRS),
        )
    }

    fn input_type(&self) -> &str {
        &self.input_type
    }
}

/// Bootstrap 5 textarea widget, used for long bilingual content.
#[derive(Debug, Clone)]
pub struct BootstrapTextarea {
    /// Number of rows.
    pub rows: usize,
}

impl Default for BootstrapTextarea {
    fn default() -> Self {
        Self { rows: 4 }
    }
}

impl BootstrapTextarea {
    /// Creates a new textarea with the specified rows.
    pub fn new(rows: usize) -> Self {
        Self { rows }
    }
}

impl Widget for BootstrapTextarea {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let content = value.map(html_escape).unwrap_or_default();
        format!(
            r#"<textarea class="{}" id="{}" name="{}" rows="{}"{}>{}</textarea>"#,
            attrs.class_with("form-control"),
            attrs.id_for(name),
            name,
            self.rows,
            attrs.to_html_except(&OWN_ATTRS),
            content
        )
    }

    fn input_type(&self) -> &str {
        "textarea"
    }
}

/// Bootstrap 5 select widget.
#[derive(Debug, Clone)]
pub struct BootstrapSelect {
    /// Available choices (value, label).
    pub choices: Vec<(String, String)>,
    /// Label of the leading empty option.
    pub blank_label: String,
}

impl BootstrapSelect {
    /// Creates a new select with the given choices.
    pub fn new(choices: Vec<(impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            choices: choices
                .into_iter()
                .map(|(v, l)| (v.into(), l.into()))
                .collect(),
            blank_label: "---------".to_string(),
        }
    }

    /// Sets the blank label.
    #[must_use]
    pub fn blank_label(mut self, label: impl Into<String>) -> Self {
        self.blank_label = label.into();
        self
    }
}

impl Widget for BootstrapSelect {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let mut options = format!(
            r#"<option value="">{}</option>"#,
            html_escape(&self.blank_label)
        );

        for (opt_value, label) in &self.choices {
            let selected_attr = if value == Some(opt_value.as_str()) {
                " selected"
            } else {
                ""
            };
            options.push_str(&format!(
                r#"<option value="{}"{selected_attr}>{}</option>"#,
                html_escape(opt_value),
                html_escape(label)
            ));
        }

        format!(
            r#"<select class="{}" id="{}" name="{}"{}>{}</select>"#,
            attrs.class_with("form-select"),
            attrs.id_for(name),
            name,
            attrs.to_html_except(&OWN_ATTRS),
            options
        )
    }

    fn input_type(&self) -> &str {
        "select"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_keeps_direction() {
        let widget = BootstrapTextInput::new().placeholder("الاسم");
        let html = widget.render("nameAr", None, &WidgetAttrs::new().with("dir", "rtl"));
        assert!(html.contains(r#"class="form-control""#));
        assert!(html.contains(r#"name="nameAr""#));
        assert!(html.contains(r#"dir="rtl""#));
        assert!(html.contains(r#"placeholder="الاسم""#));
    }

    #[test]
    fn test_tel_input() {
        let html = BootstrapTextInput::tel().render("phoneNumber", Some("0790"), &WidgetAttrs::new());
        assert!(html.contains(r#"type="tel""#));
        assert!(html.contains(r#"value="0790""#));
    }

    #[test]
    fn test_textarea() {
        let widget = BootstrapTextarea::new(6);
        let html = widget.render("contentEn", Some("<b>Hi</b>"), &WidgetAttrs::new());
        assert!(html.contains(r#"rows="6""#));
        assert!(html.contains("&lt;b&gt;Hi&lt;/b&gt;"));
    }

    #[test]
    fn test_select() {
        let widget = BootstrapSelect::new(vec![("1", "Jordan - الأردن"), ("2", "Spain - إسبانيا")]);
        let html = widget.render("countryWorldId", Some("2"), &WidgetAttrs::new());
        assert!(html.contains(r#"class="form-select""#));
        assert!(html.contains(r#"value="2" selected"#));
        assert!(html.contains(r#"<option value="">---------</option>"#));
    }
}
