//! Editable form state for one record
//!
//! The form is generic over `F`, the handle of a picked file. In the browser this wraps a
//! `web_sys::File`; tests use plain structs.

use std::collections::BTreeMap;

use crate::record::ContentRecord;
use crate::schema::{FieldKind, FieldSpec, ResourceSchema};

/// Problems found before anything is sent to the backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{label} is required")]
    Missing { label: &'static str },
    #[error("{label} must be a number, got `{value}`")]
    NotANumber { label: &'static str, value: String },
    #[error("`{value}` is not a valid choice for {label}")]
    InvalidChoice { label: &'static str, value: String },
    #[error("There is no open form to submit")]
    NotOpen,
}

/// An ordered sequence of editable strings which never has less than one slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextList(Vec<String>);
impl Default for TextList {
    fn default() -> Self {
        Self(vec![String::new()])
    }
}
impl TextList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<String>) -> Self {
        if entries.is_empty() {
            Self::default()
        } else {
            Self(entries)
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false, there is at least one slot
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push_empty(&mut self) {
        self.0.push(String::new());
    }

    /// Returns false if `index` is out of range
    pub fn set(&mut self, index: usize, value: String) -> bool {
        match self.0.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Remove the entry at `index`. Removing the only entry empties it instead.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.0.len() {
            return false;
        }
        if self.0.len() == 1 {
            self.0[0].clear();
        } else {
            self.0.remove(index);
        }
        true
    }

    /// Entries with content, in order
    pub fn filled(&self) -> impl Iterator<Item = &String> {
        self.0.iter().filter(|e| !e.trim().is_empty())
    }
}

/// Files picked for a media field
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSelection<F> {
    /// Newly picked files; a new pick replaces the previous one
    pub files: Vec<F>,
    /// What the server currently stores, only used for previews
    pub existing: Vec<String>,
    /// The user asked to drop the current media
    pub clear: bool,
}
impl<F> Default for MediaSelection<F> {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            existing: Vec::new(),
            clear: false,
        }
    }
}
impl<F> MediaSelection<F> {
    pub fn is_unset(&self) -> bool {
        self.files.is_empty() && !self.clear
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<F> {
    Text(String),
    Flag(bool),
    List(TextList),
    Media(MediaSelection<F>),
}
impl<F> FieldValue<F> {
    fn blank(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Flag => Self::Flag(false),
            FieldKind::TextList => Self::List(TextList::new()),
            FieldKind::Media(_) => Self::Media(MediaSelection::default()),
            FieldKind::Choice(options) => {
                Self::Text(options.first().map(|o| o.to_string()).unwrap_or_default())
            }
            FieldKind::Text
            | FieldKind::LongText
            | FieldKind::Number
            | FieldKind::Date
            | FieldKind::Time => Self::Text(String::new()),
        }
    }

    fn from_record(field: &FieldSpec, record: &ContentRecord) -> Self {
        match field.kind {
            FieldKind::Flag => Self::Flag(record.flag(field.record_path)),
            FieldKind::TextList => {
                Self::List(TextList::from_entries(record.texts(field.record_path)))
            }
            FieldKind::Media(_) => Self::Media(MediaSelection {
                files: Vec::new(),
                existing: record.media(field.record_path),
                clear: false,
            }),
            _ => record
                .text(field.record_path)
                .map(Self::Text)
                .unwrap_or_else(|| Self::blank(&field.kind)),
        }
    }
}

/// The values of an open create or edit form
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<F> {
    /// Id of the record being edited, `None` when creating
    editing: Option<String>,
    values: BTreeMap<&'static str, FieldValue<F>>,
}
impl<F> FormState<F> {
    /// An empty form for a new record
    pub fn blank(schema: &ResourceSchema) -> Self {
        Self {
            editing: None,
            values: schema
                .fields
                .iter()
                .map(|f| (f.key, FieldValue::blank(&f.kind)))
                .collect(),
        }
    }

    /// A form pre-filled from `record`. Media fields start unset.
    pub fn from_record(schema: &ResourceSchema, record: &ContentRecord) -> Self {
        Self {
            editing: Some(record.id.clone()),
            values: schema
                .fields
                .iter()
                .map(|f| (f.key, FieldValue::from_record(f, record)))
                .collect(),
        }
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub fn value(&self, key: &str) -> Option<&FieldValue<F>> {
        self.values.get(key)
    }

    pub fn text(&self, key: &str) -> &str {
        match self.values.get(key) {
            Some(FieldValue::Text(t)) => t,
            _ => "",
        }
    }

    pub fn flag(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(FieldValue::Flag(true)))
    }

    pub fn list(&self, key: &str) -> Option<&TextList> {
        match self.values.get(key) {
            Some(FieldValue::List(l)) => Some(l),
            _ => None,
        }
    }

    pub fn media(&self, key: &str) -> Option<&MediaSelection<F>> {
        match self.values.get(key) {
            Some(FieldValue::Media(m)) => Some(m),
            _ => None,
        }
    }

    pub fn set_text(&mut self, key: &str, value: String) {
        if let Some(FieldValue::Text(t)) = self.values.get_mut(key) {
            *t = value;
        }
    }

    pub fn set_flag(&mut self, key: &str, value: bool) {
        if let Some(FieldValue::Flag(f)) = self.values.get_mut(key) {
            *f = value;
        }
    }

    pub fn list_mut(&mut self, key: &str) -> Option<&mut TextList> {
        match self.values.get_mut(key) {
            Some(FieldValue::List(l)) => Some(l),
            _ => None,
        }
    }

    /// Replace the picked files of a media field
    pub fn set_files(&mut self, key: &str, files: Vec<F>) {
        if let Some(FieldValue::Media(m)) = self.values.get_mut(key) {
            m.files = files;
            if !m.files.is_empty() {
                m.clear = false;
            }
        }
    }

    /// Ask for the current media to be removed; drops any picked files
    pub fn set_clear(&mut self, key: &str, clear: bool) {
        if let Some(FieldValue::Media(m)) = self.values.get_mut(key) {
            m.clear = clear;
            if clear {
                m.files.clear();
            }
        }
    }

    /// Check required fields, numbers and choices
    pub fn validate(&self, schema: &ResourceSchema) -> Result<(), FormError> {
        for field in schema.fields {
            let Some(value) = self.values.get(field.key) else {
                continue;
            };
            match (value, &field.kind) {
                (FieldValue::Text(t), kind) => {
                    let trimmed = t.trim();
                    if trimmed.is_empty() {
                        if field.required {
                            return Err(FormError::Missing { label: field.label });
                        }
                        continue;
                    }
                    match kind {
                        FieldKind::Number if parse_number(trimmed).is_none() => {
                            return Err(FormError::NotANumber {
                                label: field.label,
                                value: t.clone(),
                            });
                        }
                        FieldKind::Choice(options) if !options.contains(&t.as_str()) => {
                            return Err(FormError::InvalidChoice {
                                label: field.label,
                                value: t.clone(),
                            });
                        }
                        _ => {}
                    }
                }
                (FieldValue::List(l), _) => {
                    if field.required && l.filled().next().is_none() {
                        return Err(FormError::Missing { label: field.label });
                    }
                }
                // flags always have a value and media are optional on the client side
                (FieldValue::Flag(_), _) | (FieldValue::Media(_), _) => {}
            }
        }
        Ok(())
    }
}

/// Parse user input as a JSON number; integral values become integers
pub(crate) fn parse_number(input: &str) -> Option<serde_json::Number> {
    let trimmed = input.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(i.into());
    }
    let f = trimmed.parse::<f64>().ok()?;
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some((f as i64).into())
    } else {
        serde_json::Number::from_f64(f)
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::resources::{ABOUT, PRICING, PROGRAMS};

    type Form = FormState<&'static str>;

    #[test]
    fn removing_the_last_entry_keeps_one_empty_slot() {
        let mut list = TextList::from_entries(vec!["a".into(), "b".into()]);
        assert!(list.remove(0));
        assert!(list.remove(0));
        assert_eq!(list.entries(), &[String::new()]);
        assert!(list.remove(0));
        assert_eq!(list.len(), 1);
        assert!(!list.remove(1));
    }

    #[test]
    fn list_editing() {
        let mut list = TextList::new();
        assert!(list.set(0, "Gym access".into()));
        list.push_empty();
        assert!(list.set(1, "Trainer".into()));
        assert!(!list.set(5, "nope".into()));
        list.push_empty();
        let filled: Vec<&String> = list.filled().collect();
        assert_eq!(filled, vec!["Gym access", "Trainer"]);
        assert_eq!(TextList::from_entries(Vec::new()), TextList::new());
    }

    #[test]
    fn blank_form_defaults() {
        let form = Form::blank(&PROGRAMS);
        assert!(!form.is_edit());
        assert_eq!(form.text("subtitle"), "7 Week · 5x/week");
        assert!(form.media("image").unwrap().is_unset());
        let pricing = Form::blank(&PRICING);
        assert_eq!(pricing.list("features").unwrap().len(), 1);
        assert!(!pricing.flag("isPopular"));
    }

    #[test]
    fn select_for_edit_prefills_scalars_and_resets_media() {
        let record = ContentRecord::from_value(json!({
            "_id": "a1",
            "hero": { "description": "Train hard", "bgImage": "/uploads/hero.jpg" },
            "description": { "texts": [], "images": ["/uploads/1.jpg"] },
            "trainer": { "texts": ["Coach"], "image": "/uploads/coach.jpg" }
        }))
        .unwrap();
        let form = Form::from_record(&ABOUT, &record);
        assert_eq!(form.editing_id(), Some("a1"));
        assert_eq!(form.text("heroDescription"), "Train hard");
        // empty lists on the server still give one slot to type into
        assert_eq!(form.list("descriptionTexts").unwrap().len(), 1);
        assert_eq!(form.list("trainerTexts").unwrap().entries(), &["Coach"]);
        let hero = form.media("heroBgImage").unwrap();
        assert!(hero.files.is_empty());
        assert_eq!(hero.existing, vec!["/uploads/hero.jpg"]);
        assert!(form.media("qrImg").unwrap().existing.is_empty());
    }

    #[test]
    fn picking_files_and_clearing_exclude_each_other() {
        let mut form = Form::blank(&PROGRAMS);
        form.set_clear("image", true);
        assert!(form.media("image").unwrap().clear);
        form.set_files("image", vec!["new.jpg"]);
        let media = form.media("image").unwrap();
        assert!(!media.clear);
        assert_eq!(media.files, vec!["new.jpg"]);
        form.set_clear("image", true);
        assert!(form.media("image").unwrap().files.is_empty());
    }

    #[test]
    fn validation() {
        let mut form = Form::blank(&PRICING);
        assert_eq!(
            form.validate(&PRICING),
            Err(FormError::Missing { label: "Duration" })
        );
        form.set_text("duration", "3 Months".into());
        form.set_text("price", "a lot".into());
        assert_eq!(
            form.validate(&PRICING),
            Err(FormError::NotANumber {
                label: "Price",
                value: "a lot".into()
            })
        );
        form.set_text("price", "999".into());
        assert_eq!(
            form.validate(&PRICING),
            Err(FormError::Missing { label: "Features" })
        );
        form.list_mut("features").unwrap().set(0, "Gym access".into());
        assert_eq!(form.validate(&PRICING), Ok(()));

        let mut program = Form::blank(&PROGRAMS);
        program.set_text("title", "Strength".into());
        program.set_text("subtitle", "2 Week".into());
        assert!(matches!(
            program.validate(&PROGRAMS),
            Err(FormError::InvalidChoice { .. })
        ));
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_number("999"), Some(999.into()));
        assert_eq!(parse_number(" 999.0 "), Some(999.into()));
        assert_eq!(parse_number("12.5").map(|n| n.as_f64()), Some(Some(12.5)));
        assert_eq!(parse_number("twelve"), None);
    }
}
