use std::collections::HashMap;

use tracing::info;
use visadesk_client::models::FaqItem;
use visadesk_client::services::FaqService;
use visadesk_client::ApiClient;
use visadesk_forms::{FieldValue, FormError, Language, Rule, RuleConfig, Validation};

use crate::error::{AdminError, Result};
use crate::reorder::array_move;

/// One of the four texts of a FAQ item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaqText {
    QuestionEn,
    QuestionAr,
    AnswerEn,
    AnswerAr,
}

impl FaqText {
    pub const ALL: [Self; 4] = [Self::QuestionEn, Self::QuestionAr, Self::AnswerEn, Self::AnswerAr];

    fn suffix(self) -> &'static str {
        match self {
            Self::QuestionEn => "questionEn",
            Self::QuestionAr => "questionAr",
            Self::AnswerEn => "answerEn",
            Self::AnswerAr => "answerAr",
        }
    }

    /// Answers are rich-text HTML, so only questions get a script rule.
    fn rules(self) -> &'static [Rule] {
        match self {
            Self::QuestionEn => &[Rule::Required, Rule::Latin],
            Self::QuestionAr => &[Rule::Required, Rule::Arabic],
            Self::AnswerEn | Self::AnswerAr => &[Rule::Required],
        }
    }

    fn get(self, item: &FaqItem) -> &str {
        match self {
            Self::QuestionEn => &item.question_en,
            Self::QuestionAr => &item.question_ar,
            Self::AnswerEn => &item.answer_en,
            Self::AnswerAr => &item.answer_ar,
        }
    }

    fn get_mut(self, item: &mut FaqItem) -> &mut String {
        match self {
            Self::QuestionEn => &mut item.question_en,
            Self::QuestionAr => &mut item.question_ar,
            Self::AnswerEn => &mut item.answer_en,
            Self::AnswerAr => &mut item.answer_ar,
        }
    }
}

/// A FAQ item with the local key used for drag handles and error entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqEntry {
    pub key: u64,
    pub item: FaqItem,
}

impl FaqEntry {
    /// Error map key of one of this entry's texts.
    pub fn field(&self, text: FaqText) -> String {
        field_name(self.key, text)
    }
}

fn field_name(key: u64, text: FaqText) -> String {
    format!("faq_{key}_{}", text.suffix())
}

/// Local editor for the FAQ document; nothing is sent until [`save`](Self::save).
#[derive(Debug)]
pub struct FaqEditor {
    service: FaqService,
    entries: Vec<FaqEntry>,
    next_key: u64,
    validation: Validation,
}

impl FaqEditor {
    pub fn new(client: ApiClient, language: Language) -> Self {
        Self {
            service: FaqService::new(client),
            entries: Vec::new(),
            next_key: 0,
            validation: Validation::new(language),
        }
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn validation(&self) -> &Validation {
        &self.validation
    }

    fn replace_items(&mut self, items: Vec<FaqItem>) {
        self.entries.clear();
        self.validation.reset();
        for item in items {
            self.push(item);
        }
    }

    fn push(&mut self, item: FaqItem) -> u64 {
        let key = self.next_key;
        self.next_key += 1;
        self.entries.push(FaqEntry { key, item });
        key
    }

    fn position(&self, key: u64) -> Result<usize> {
        self.entries
            .iter()
            .position(|e| e.key == key)
            .ok_or(AdminError::UnknownEntry(key))
    }

    /// Fetches the document, discarding local edits.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn load(&mut self) -> Result<()> {
        let faqs = self.service.get().await?;
        self.replace_items(faqs.items);
        Ok(())
    }

    /// Appends an empty item and returns its key.
    pub fn add(&mut self) -> u64 {
        self.push(FaqItem::default())
    }

    /// Changes one text of an item and validates it.
    ///
    /// # Errors
    ///
    /// Fails when no item has this key.
    pub fn update(&mut self, key: u64, text: FaqText, value: &str) -> Result<bool> {
        let index = self.position(key)?;
        value.clone_into(text.get_mut(&mut self.entries[index].item));
        Ok(self
            .validation
            .validate_one(&field_name(key, text), &FieldValue::from(value), text.rules()))
    }

    /// Removes an item together with its error entries.
    ///
    /// # Errors
    ///
    /// Fails when no item has this key.
    pub fn remove(&mut self, key: u64) -> Result<FaqItem> {
        let index = self.position(key)?;
        let prefix = format!("faq_{key}_");
        self.validation.retain(|name| !name.starts_with(&prefix));
        Ok(self.entries.remove(index).item)
    }

    /// Moves the item `source` to the position of `target`.
    ///
    /// # Errors
    ///
    /// Fails when either key is unknown.
    pub fn move_entry(&mut self, source: u64, target: u64) -> Result<()> {
        let from = self.position(source)?;
        let to = self.position(target)?;
        array_move(&mut self.entries, from, to);
        Ok(())
    }

    /// Validates every text of every item.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Invalid`] naming the first failing text.
    pub fn validate(&mut self) -> Result<()> {
        let mut config = RuleConfig::new();
        let mut values = HashMap::new();
        for entry in &self.entries {
            for text in FaqText::ALL {
                let name = entry.field(text);
                values.insert(name.clone(), FieldValue::from(text.get(&entry.item)));
                config.insert(name, text.rules().to_vec());
            }
        }
        if self.validation.validate_all(&values, &config) {
            return Ok(());
        }
        let first = self.validation.first_error().unwrap_or_default().to_string();
        Err(FormError::Invalid { first }.into())
    }

    /// Validates and replaces the server document with the local items.
    ///
    /// # Errors
    ///
    /// Fails when validation fails or the request fails; local edits are
    /// kept either way.
    pub async fn save(&mut self) -> Result<()> {
        self.validate()?;
        let items: Vec<FaqItem> = self.entries.iter().map(|e| e.item.clone()).collect();
        self.service.save(&items).await?;
        info!(count = items.len(), "faqs saved");
        Ok(())
    }

    pub fn set_language(&mut self, language: Language) {
        self.validation.set_language(language);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use visadesk_client::{Method, MockTransport};

    fn editor() -> FaqEditor {
        FaqEditor::new(ApiClient::new(MockTransport::new()), Language::En)
    }

    #[test]
    fn test_update_validates_script() {
        let mut editor = editor();
        let key = editor.add();
        assert!(!editor.update(key, FaqText::QuestionAr, "How long?").unwrap());
        assert_eq!(
            editor.validation().error(&field_name(key, FaqText::QuestionAr)),
            Some("Only Arabic characters are allowed")
        );
        // empty is not flagged while typing
        assert!(editor.update(key, FaqText::QuestionAr, "").unwrap());
    }

    #[test]
    fn test_remove_forgets_errors() {
        let mut editor = editor();
        let first = editor.add();
        let second = editor.add();
        let err = editor.validate().unwrap_err();
        assert_eq!(err.invalid_field(), Some("faq_0_questionEn"));
        assert_eq!(editor.validation().errors().len(), 8);

        editor.remove(first).unwrap();
        assert_eq!(editor.validation().errors().len(), 4);
        assert!(editor
            .validation()
            .errors()
            .iter()
            .all(|(name, _)| name.starts_with(&format!("faq_{second}_"))));
    }

    #[tokio::test]
    async fn test_html_answers_are_saved() {
        let mock = MockTransport::new();
        mock.json(
            Method::Get,
            "/faqs",
            &json!({"data": {"id": 1, "items": [{
                "questionEn": "How long?",
                "questionAr": "كم المدة؟",
                "answerEn": "<p>Two <strong>weeks</strong></p>",
                "answerAr": "<p>أسبوعان</p>"
            }]}}),
        );
        mock.json(Method::Put, "/faqs", &json!({"data": {"id": 1, "items": []}}));
        let mut editor = FaqEditor::new(ApiClient::new(mock.clone()), Language::Ar);
        editor.load().await.unwrap();

        let key = editor.entries()[0].key;
        assert!(editor.update(key, FaqText::AnswerAr, "<p>ثلاثة أسابيع</p>").unwrap());
        editor.save().await.unwrap();

        assert!(editor.validation().errors().is_empty());
        let sent = mock.requests_to(Method::Put, "/faqs");
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].json_body().unwrap()["items"][0]["answerAr"],
            "<p>ثلاثة أسابيع</p>"
        );
    }

    #[test]
    fn test_move_entry() {
        let mut editor = editor();
        let keys: Vec<u64> = (0..3).map(|_| editor.add()).collect();
        editor.move_entry(keys[2], keys[0]).unwrap();
        let order: Vec<u64> = editor.entries().iter().map(|e| e.key).collect();
        assert_eq!(order, vec![2, 0, 1]);
        assert!(editor.move_entry(99, 0).is_err());
    }
}
