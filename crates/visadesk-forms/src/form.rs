//! Form state and Bootstrap rendering.

use std::collections::HashMap;

use ironhtml::html;
use ironhtml_elements::Div;

use crate::engine::{RuleConfig, Validation};
use crate::error::{ErrorMap, FormError, Result};
use crate::language::Language;
use crate::validation::Rule;
use crate::value::FieldValue;
use crate::widgets::{Widget, WidgetAttrs};

/// A field of a mounted form: its value and the rules applied to it.
pub struct FieldDescriptor {
    /// Field name, also the key in the error map.
    pub name: String,
    /// Field label.
    pub label: String,
    /// Current value.
    pub value: FieldValue,
    /// Rules in evaluation order.
    pub rules: Vec<Rule>,
    /// Writing direction of the content (Arabic fields render right-to-left).
    pub direction: Language,
    /// The widget to render.
    pub widget: Box<dyn Widget>,
    /// Help text.
    pub help_text: Option<String>,
    /// Widget attributes.
    pub attrs: WidgetAttrs,
    /// Whether the field is disabled.
    pub disabled: bool,
}

impl std::fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("value", &self.value)
            .field("rules", &self.rules)
            .field("direction", &self.direction)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

impl FieldDescriptor {
    /// Creates a new field descriptor with no rules and a `Null` value.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        widget: impl Widget + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            value: FieldValue::Null,
            rules: Vec::new(),
            direction: Language::En,
            widget: Box::new(widget),
            help_text: None,
            attrs: WidgetAttrs::new(),
            disabled: false,
        }
    }

    /// Appends a rule.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        }
        self
    }

    /// Appends several rules.
    #[must_use]
    pub fn rules(self, rules: &[Rule]) -> Self {
        rules.iter().fold(self, |field, rule| field.rule(*rule))
    }

    /// Sets the initial value.
    #[must_use]
    pub fn value(mut self, value: impl Into<FieldValue>) -> Self {
        self.value = value.into();
        self
    }

    /// Sets the content direction.
    #[must_use]
    pub fn direction(mut self, language: Language) -> Self {
        self.direction = language;
        self
    }

    /// Sets help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    /// Sets a widget attribute.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set(key, value);
        self
    }

    /// Disables the field.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Returns whether `Rule::Required` applies to this field.
    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }
}

/// The fields of one mounted form together with their validation state.
#[derive(Debug, Default)]
pub struct FormState {
    fields: Vec<FieldDescriptor>,
    validation: Validation,
}

impl FormState {
    /// Creates an empty form whose messages use `language`.
    pub fn new(language: Language) -> Self {
        Self {
            fields: Vec::new(),
            validation: Validation::new(language),
        }
    }

    /// Adds a field.
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.push(field);
        self
    }

    /// Adds a field, replacing any field with the same name in place.
    pub fn push(&mut self, field: FieldDescriptor) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    /// Inserts a field at `index`, clamped to the field count.
    ///
    /// A field with the same name is removed first; its error entry is kept.
    pub fn insert(&mut self, index: usize, field: FieldDescriptor) {
        self.fields.retain(|f| f.name != field.name);
        let index = index.min(self.fields.len());
        self.fields.insert(index, field);
    }

    /// Returns the fields in definition order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the current value of a field.
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.get(name).map(|f| &f.value)
    }

    /// Returns the current text of a field, or `""` when it has none.
    pub fn text(&self, name: &str) -> &str {
        self.value(name).and_then(FieldValue::as_text).unwrap_or("")
    }

    /// Updates a field on a change event and validates it.
    ///
    /// Returns whether the field passes its non-`required` rules.
    pub fn set_value(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<bool> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        field.value = value.into();
        Ok(self
            .validation
            .validate_one(&field.name, &field.value, &field.rules))
    }

    /// Removes a field and its error entry.
    pub fn remove_field(&mut self, name: &str) -> Option<FieldDescriptor> {
        let index = self.fields.iter().position(|f| f.name == name)?;
        self.validation.clear_error(name);
        Some(self.fields.remove(index))
    }

    /// Current values keyed by field name.
    pub fn values(&self) -> HashMap<String, FieldValue> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    /// Rule configuration in field order.
    pub fn rule_config(&self) -> RuleConfig {
        let mut config = RuleConfig::new();
        for field in &self.fields {
            config.insert(field.name.clone(), field.rules.clone());
        }
        config
    }

    /// Runs a full-form validation pass, including `required`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Invalid`] naming the first failing field.
    pub fn submit(&mut self) -> Result<()> {
        let values = self.values();
        let config = self.rule_config();
        if self.validation.validate_all(&values, &config) {
            return Ok(());
        }
        let first = self
            .validation
            .first_error()
            .unwrap_or_default()
            .to_string();
        Err(FormError::Invalid { first })
    }

    /// Clears all values and errors, e.g. after a successful save.
    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value = FieldValue::Null;
        }
        self.validation.reset();
    }

    /// Returns the error map.
    pub fn errors(&self) -> &ErrorMap {
        self.validation.errors()
    }

    /// Returns the validation state.
    pub fn validation(&self) -> &Validation {
        &self.validation
    }

    /// Returns the validation state mutably, e.g. to apply server errors.
    pub fn validation_mut(&mut self) -> &mut Validation {
        &mut self.validation
    }

    /// Switches the message language.
    pub fn set_language(&mut self, language: Language) {
        self.validation.set_language(language);
    }
}

/// Renders a field with Bootstrap 5 styling and its current error.
pub fn render_bootstrap_field(field: &FieldDescriptor, error: Option<&str>) -> String {
    let id = format!("id_{}", field.name);

    let required_marker = if field.is_required() { " *" } else { "" };
    let label_text = format!("{}{}", field.label, required_marker);

    let mut attrs = field.attrs.clone();
    attrs.set("id", &id);
    attrs.set("dir", field.direction.dir());

    if error.is_some() {
        let current_class = attrs.get("class").cloned().unwrap_or_default();
        attrs.set("class", format!("{current_class} is-invalid").trim());
    }

    if field.disabled {
        attrs.set("disabled", "disabled");
    }

    let value = field.value.to_display();
    let widget_html = field.widget.render(&field.name, value.as_deref(), &attrs);

    let label_el = html! {
        label.for_(#id).class("form-label") { #label_text }
    };

    let help_text = field.help_text.clone();

    html! { div.class("mb-3") }
        .raw(label_el.render())
        .raw(&widget_html)
        .when(error.is_some(), |d| {
            d.child::<Div, _>(|e| e.class("invalid-feedback").text(error.unwrap_or("")))
        })
        .when(help_text.is_some(), |d| {
            d.child::<Div, _>(|h| {
                h.class("form-text")
                    .text(help_text.as_deref().unwrap_or(""))
            })
        })
        .render()
}

/// Renders a complete form with Bootstrap 5 styling.
pub fn render_bootstrap_form(
    form: &FormState,
    action: &str,
    method: &str,
    submit_label: &str,
) -> String {
    let dir = form.validation().language().dir();
    let mut html_form = html! {
        form.action(#action).method(#method)
    }
    .attr("dir", dir);

    for field in form.fields() {
        let field_html = render_bootstrap_field(field, form.errors().get(&field.name));
        html_form = html_form.child::<Div, _>(|d| d.raw(&field_html));
    }

    html_form = html_form.child::<Div, _>(|d| {
        let btn = html! {
            button.type_("submit").class("btn btn-primary") {
                #submit_label
            }
        };
        d.raw(btn.render())
    });

    html_form.render()
}
