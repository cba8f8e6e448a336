use tracing::info;
use visadesk_client::models::{Attribute, CreateAttribute, UpdateAttribute};
use visadesk_client::services::AttributeService;
use visadesk_client::{ApiClient, PageSizeStore};
use visadesk_forms::fields::{arabic_text, english_text};
use visadesk_forms::{render_bootstrap_form, FieldValue, FormState, Language};

use super::apply_server_errors;
use crate::error::{AdminError, Result};
use crate::list::ListPage;
use crate::reorder::{DragEnd, ReorderController, ReorderOutcome};

const SERVER_FIELDS: [(&str, &str); 2] = [("name_en", "nameEn"), ("name_ar", "nameAr")];

fn attribute_form(language: Language) -> FormState {
    FormState::new(language)
        .field(english_text("nameEn", "Name (English)"))
        .field(arabic_text("nameAr", "Name (Arabic)"))
}

/// The attributes screen: a reorderable list with a create form and inline edit.
#[derive(Debug)]
pub struct AttributesPage {
    service: AttributeService,
    list: ListPage<Attribute>,
    order: ReorderController<Attribute>,
    create_form: FormState,
    editing: Option<(i64, FormState)>,
    language: Language,
}

impl AttributesPage {
    pub fn new(client: ApiClient, language: Language) -> Self {
        Self {
            service: AttributeService::attributes(client),
            list: ListPage::new("attributes"),
            order: ReorderController::default(),
            create_form: attribute_form(language),
            editing: None,
            language,
        }
    }

    /// Persists the page size through `store`.
    #[must_use]
    pub fn with_store(mut self, store: PageSizeStore) -> Self {
        self.list = self.list.with_store(store);
        self
    }

    /// Attributes in display order.
    pub fn items(&self) -> &[Attribute] {
        self.order.items()
    }

    pub fn list(&self) -> &ListPage<Attribute> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListPage<Attribute> {
        &mut self.list
    }

    /// Fetches the current page.
    ///
    /// # Errors
    ///
    /// Returns the request error; the loaded items are kept.
    pub async fn load(&mut self) -> Result<()> {
        let ticket = self.list.begin_load();
        match self.service.list(ticket.query()).await {
            Ok(page) => {
                if self.list.finish_load(ticket, page) {
                    self.order.replace_confirmed(self.list.items().to_vec());
                }
                Ok(())
            }
            Err(error) => {
                self.list.fail_load(ticket);
                Err(error.into())
            }
        }
    }

    /// Handles a drop on the list.
    pub async fn move_item(&mut self, event: DragEnd) -> ReorderOutcome {
        self.order.reorder(event, &self.service).await
    }

    pub fn create_form(&self) -> &FormState {
        &self.create_form
    }

    /// Updates a create-form field; returns whether it is valid so far.
    ///
    /// # Errors
    ///
    /// Fails for an unknown field.
    pub fn set_create_value(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<bool> {
        Ok(self.create_form.set_value(name, value)?)
    }

    /// Renders the create form.
    pub fn render_create_form(&self) -> String {
        let label = self.language.pick("Add attribute", "إضافة خاصية");
        render_bootstrap_form(&self.create_form, "/admin/attributes", "post", label)
    }

    /// Validates and creates an attribute, then reloads the list.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Invalid`](visadesk_forms::FormError::Invalid)
    /// when the form does not validate, or the request error; the form keeps
    /// its values either way.
    pub async fn create(&mut self) -> Result<Attribute> {
        self.create_form.submit()?;
        let body = CreateAttribute {
            name_en: self.create_form.text("nameEn").trim().to_string(),
            name_ar: self.create_form.text("nameAr").trim().to_string(),
        };
        let created = match self.service.create(&body).await {
            Ok(created) => created,
            Err(error) => {
                apply_server_errors(&mut self.create_form, &error, &SERVER_FIELDS);
                return Err(error.into());
            }
        };
        info!(id = created.id, "attribute created");
        self.create_form.clear();
        self.load().await?;
        Ok(created)
    }

    /// Opens the inline editor for an attribute.
    ///
    /// # Errors
    ///
    /// Fails when the attribute is not in the loaded list.
    pub fn start_edit(&mut self, id: i64) -> Result<()> {
        let attribute = self
            .items()
            .iter()
            .find(|a| a.id == id)
            .ok_or(AdminError::NotFound(id))?;
        let mut form = attribute_form(self.language);
        form.set_value("nameEn", attribute.name_en.as_str())?;
        form.set_value("nameAr", attribute.name_ar.as_str())?;
        self.editing = Some((id, form));
        Ok(())
    }

    /// The inline editor, if open.
    pub fn edit_form(&self) -> Option<(i64, &FormState)> {
        self.editing.as_ref().map(|(id, form)| (*id, form))
    }

    /// Updates an inline-editor field.
    ///
    /// # Errors
    ///
    /// Fails when no editor is open or the field is unknown.
    pub fn set_edit_value(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<bool> {
        let (_, form) = self.editing.as_mut().ok_or(AdminError::NotEditing)?;
        Ok(form.set_value(name, value)?)
    }

    /// Closes the inline editor without saving.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Saves the inline editor, then reloads the list.
    ///
    /// # Errors
    ///
    /// Fails when no editor is open, the form does not validate or the
    /// request fails; the editor stays open on failure.
    pub async fn save_edit(&mut self) -> Result<Attribute> {
        let (id, form) = self.editing.as_mut().ok_or(AdminError::NotEditing)?;
        let id = *id;
        form.submit()?;
        let body = UpdateAttribute {
            name_en: Some(form.text("nameEn").trim().to_string()),
            name_ar: Some(form.text("nameAr").trim().to_string()),
        };
        let updated = match self.service.update(id, &body).await {
            Ok(updated) => updated,
            Err(error) => {
                if let Some((_, form)) = self.editing.as_mut() {
                    apply_server_errors(form, &error, &SERVER_FIELDS);
                }
                return Err(error.into());
            }
        };
        self.editing = None;
        self.load().await?;
        Ok(updated)
    }

    /// Deletes an attribute, then reloads the list.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn delete(&mut self, id: i64) -> Result<()> {
        self.service.delete(id).await?;
        if self.editing.as_ref().is_some_and(|(editing, _)| *editing == id) {
            self.editing = None;
        }
        self.load().await
    }

    /// Switches the language of subsequent validation messages.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.create_form.set_language(language);
        if let Some((_, form)) = self.editing.as_mut() {
            form.set_language(language);
        }
    }
}
