use tracing::{debug, info};
use visadesk_client::models::{
    Attribute, Country, CountryAttribute, CountryInput, CountryWorld, UpdateCountry,
};
use visadesk_client::services::{AttributeService, CountryService};
use visadesk_client::{ApiClient, ListQuery, PageSizeStore};
use visadesk_forms::fields::{arabic_text, english_text, required_choice};
use visadesk_forms::{FieldDescriptor, FieldValue, FormError, FormState, Language, Rule};

use crate::error::{AdminError, Result};
use crate::list::ListPage;
use crate::reorder::{sort_by_order, DragEnd, ReorderController, ReorderOutcome};

/// Name of the country selector field.
pub const COUNTRY_FIELD: &str = "countryWorldId";

/// Attribute lists fetched for the country form are not paginated in practice.
const ALL_ATTRIBUTES: u32 = 1000;

/// Name of the field holding an attribute's value in one language.
pub fn attribute_field(attribute_id: i64, language: Language) -> String {
    format!("attribute_{attribute_id}_{}", language.code())
}

/// One attribute row of the country form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRow {
    pub attribute_id: i64,
    pub name_en: String,
    pub name_ar: String,
    pub value_en: String,
    pub value_ar: String,
    /// Inactive rows keep their values but are neither validated nor shown
    /// on the public site.
    pub active: bool,
}

impl AttributeRow {
    fn value(&self, language: Language) -> &str {
        match language {
            Language::En => &self.value_en,
            Language::Ar => &self.value_ar,
        }
    }
}

/// The create/edit form of a catalog country.
#[derive(Debug)]
pub struct CountryForm {
    form: FormState,
    rows: Vec<AttributeRow>,
    original: Option<Country>,
}

impl CountryForm {
    /// A blank form; every attribute row starts active.
    pub fn new(language: Language, world: &[CountryWorld], attributes: &[Attribute]) -> Self {
        let choices = world
            .iter()
            .map(|c| (c.id.to_string(), format!("{} - {}", c.name_en, c.name_ar)))
            .collect();

        let mut attributes = attributes.to_vec();
        sort_by_order(&mut attributes);
        let rows = attributes
            .into_iter()
            .map(|a| AttributeRow {
                attribute_id: a.id,
                name_en: a.name_en,
                name_ar: a.name_ar,
                value_en: String::new(),
                value_ar: String::new(),
                active: true,
            })
            .collect();

        let mut form = Self {
            form: FormState::new(language).field(required_choice(COUNTRY_FIELD, "Country", choices)),
            rows,
            original: None,
        };
        form.rebuild_attribute_fields();
        form
    }

    /// A form prefilled from an existing country.
    ///
    /// # Errors
    ///
    /// Never fails for a form built by this type.
    pub fn for_country(
        language: Language,
        world: &[CountryWorld],
        attributes: &[Attribute],
        country: &Country,
    ) -> Result<Self> {
        let mut form = Self::new(language, world, attributes);
        for row in &mut form.rows {
            if let Some(saved) = country
                .attributes
                .iter()
                .find(|a| a.attribute_id == row.attribute_id)
            {
                row.value_en.clone_from(&saved.value_en);
                row.value_ar.clone_from(&saved.value_ar);
                row.active = saved.is_active;
            }
        }
        debug!(country = country.id, "prefilling country form");
        form.rebuild_attribute_fields();
        // change-path validation skips `required`, so prefilling flags nothing
        form.form
            .set_value(COUNTRY_FIELD, country.country_world_id.to_string())?;
        form.original = Some(country.clone());
        Ok(form)
    }

    fn rebuild_attribute_fields(&mut self) {
        let stale: Vec<String> = self
            .form
            .fields()
            .iter()
            .filter(|f| f.name.starts_with("attribute_"))
            .map(|f| f.name.clone())
            .collect();
        for name in stale {
            self.form.remove_field(&name);
        }
        for row in self.rows.iter().filter(|r| r.active) {
            for field in row_fields(row) {
                self.form.push(field);
            }
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn rows(&self) -> &[AttributeRow] {
        &self.rows
    }

    /// Position of a row's first field: after the country selector and the
    /// fields of the active rows before it.
    fn field_index(&self, attribute_id: i64) -> usize {
        let start = self
            .form
            .fields()
            .iter()
            .position(|f| f.name == COUNTRY_FIELD)
            .map_or(0, |i| i + 1);
        let before = self
            .rows
            .iter()
            .take_while(|r| r.attribute_id != attribute_id)
            .filter(|r| r.active)
            .count();
        start + 2 * before
    }

    fn row_mut(&mut self, attribute_id: i64) -> Result<&mut AttributeRow> {
        self.rows
            .iter_mut()
            .find(|r| r.attribute_id == attribute_id)
            .ok_or(AdminError::NotFound(attribute_id))
    }

    /// Selects the world country.
    ///
    /// # Errors
    ///
    /// Never fails for a form built by this type.
    pub fn select_country(&mut self, id: Option<i64>) -> Result<bool> {
        Ok(self
            .form
            .set_value(COUNTRY_FIELD, id.map(|id| id.to_string()))?)
    }

    /// Updates an attribute value; validates it when the row is active.
    ///
    /// # Errors
    ///
    /// Fails when the attribute has no row.
    pub fn set_attribute_value(
        &mut self,
        attribute_id: i64,
        language: Language,
        text: &str,
    ) -> Result<bool> {
        let row = self.row_mut(attribute_id)?;
        match language {
            Language::En => text.clone_into(&mut row.value_en),
            Language::Ar => text.clone_into(&mut row.value_ar),
        }
        if !row.active {
            return Ok(true);
        }
        Ok(self
            .form
            .set_value(&attribute_field(attribute_id, language), text)?)
    }

    /// Activates or deactivates a row; deactivating forgets its errors.
    ///
    /// # Errors
    ///
    /// Fails when the attribute has no row.
    pub fn set_active(&mut self, attribute_id: i64, active: bool) -> Result<()> {
        let row = self.row_mut(attribute_id)?;
        if row.active == active {
            return Ok(());
        }
        row.active = active;
        if active {
            let fields = row_fields(row);
            let index = self.field_index(attribute_id);
            for (offset, field) in fields.into_iter().enumerate() {
                self.form.insert(index + offset, field);
            }
        } else {
            for language in [Language::En, Language::Ar] {
                self.form.remove_field(&attribute_field(attribute_id, language));
            }
        }
        Ok(())
    }

    /// Validates the form and returns the request body.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Invalid`] naming the first failing field.
    pub fn submit(&mut self) -> Result<CountryInput> {
        self.form.submit()?;
        let country_world_id = self
            .form
            .value(COUNTRY_FIELD)
            .and_then(FieldValue::to_display)
            .and_then(|id| id.trim().parse::<i64>().ok());
        let Some(country_world_id) = country_world_id else {
            let message = Rule::Required.message(self.form.validation().language());
            self.form.validation_mut().set_error(COUNTRY_FIELD, message);
            return Err(FormError::Invalid {
                first: COUNTRY_FIELD.to_string(),
            }
            .into());
        };

        let attributes = self
            .rows
            .iter()
            .map(|row| CountryAttribute {
                attribute_id: row.attribute_id,
                value_en: row.value_en.clone(),
                value_ar: row.value_ar.clone(),
                is_active: row.active,
                attribute: None,
            })
            .collect();
        Ok(CountryInput {
            country_world_id,
            attributes,
        })
    }

    /// Validates the form and returns only what changed since it was
    /// prefilled; a blank form reports everything.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Invalid`] naming the first failing field.
    pub fn changes(&mut self) -> Result<UpdateCountry> {
        let input = self.submit()?;
        let Some(original) = &self.original else {
            return Ok(UpdateCountry {
                country_world_id: Some(input.country_world_id),
                attributes: Some(input.attributes),
            });
        };

        let changed: Vec<CountryAttribute> = input
            .attributes
            .into_iter()
            .filter(|new| {
                original
                    .attributes
                    .iter()
                    .find(|old| old.attribute_id == new.attribute_id)
                    .map_or(true, |old| {
                        old.value_en != new.value_en
                            || old.value_ar != new.value_ar
                            || old.is_active != new.is_active
                    })
            })
            .collect();

        Ok(UpdateCountry {
            country_world_id: (original.country_world_id != input.country_world_id)
                .then_some(input.country_world_id),
            attributes: (!changed.is_empty()).then_some(changed),
        })
    }

    /// Switches the language of subsequent validation messages.
    pub fn set_language(&mut self, language: Language) {
        self.form.set_language(language);
    }
}

fn row_fields(row: &AttributeRow) -> [FieldDescriptor; 2] {
    [
        english_text(
            &attribute_field(row.attribute_id, Language::En),
            &format!("{} (English)", row.name_en),
        )
        .value(row.value(Language::En)),
        arabic_text(
            &attribute_field(row.attribute_id, Language::Ar),
            &format!("{} (Arabic)", row.name_ar),
        )
        .value(row.value(Language::Ar)),
    ]
}

/// The countries screen: a reorderable list plus the data the form needs.
#[derive(Debug)]
pub struct CountriesPage {
    service: CountryService,
    list: ListPage<Country>,
    order: ReorderController<Country>,
    world: Vec<CountryWorld>,
    attributes: Vec<Attribute>,
    language: Language,
}

impl CountriesPage {
    pub fn new(client: ApiClient, language: Language) -> Self {
        Self {
            service: CountryService::countries(client),
            list: ListPage::new("countries"),
            order: ReorderController::default(),
            world: Vec::new(),
            attributes: Vec::new(),
            language,
        }
    }

    /// Persists the page size through `store`.
    #[must_use]
    pub fn with_store(mut self, store: PageSizeStore) -> Self {
        self.list = self.list.with_store(store);
        self
    }

    /// Countries in display order.
    pub fn items(&self) -> &[Country] {
        self.order.items()
    }

    pub fn list_mut(&mut self) -> &mut ListPage<Country> {
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

    /// Fetches the world countries and every attribute for the form.
    ///
    /// # Errors
    ///
    /// Returns the first request error.
    pub async fn load_form_data(&mut self) -> Result<()> {
        self.world = self.service.world().await?;
        let attributes = AttributeService::attributes(self.service.client().clone());
        self.attributes = attributes
            .list(&ListQuery::new().limit(ALL_ATTRIBUTES))
            .await?
            .items;
        Ok(())
    }

    /// A blank create form.
    pub fn new_form(&self) -> CountryForm {
        CountryForm::new(self.language, &self.world, &self.attributes)
    }

    /// An edit form for a country fetched from the server.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn edit_form(&self, id: i64) -> Result<CountryForm> {
        let country = self.service.get(id).await?;
        CountryForm::for_country(self.language, &self.world, &self.attributes, &country)
    }

    /// Creates a country from `form`, then reloads the list.
    ///
    /// # Errors
    ///
    /// Fails when the form does not validate or the request fails.
    pub async fn create(&mut self, form: &mut CountryForm) -> Result<Country> {
        let input = form.submit()?;
        let created = self.service.create(&input).await?;
        info!(id = created.id, "country created");
        self.load().await?;
        Ok(created)
    }

    /// Sends the changes of an edit form, then reloads the list.
    ///
    /// Returns `false` when nothing changed and no request was sent.
    ///
    /// # Errors
    ///
    /// Fails when the form does not validate or the request fails.
    pub async fn update(&mut self, id: i64, form: &mut CountryForm) -> Result<bool> {
        let changes = form.changes()?;
        if changes.is_empty() {
            debug!(id, "country unchanged, nothing to send");
            return Ok(false);
        }
        self.service.update(id, &changes).await?;
        self.load().await?;
        Ok(true)
    }

    /// Deletes a country, then reloads the list.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn delete(&mut self, id: i64) -> Result<()> {
        self.service.delete(id).await?;
        self.load().await
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }
}
