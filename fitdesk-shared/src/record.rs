//! A single manageable item as returned by the backend

use serde_json::{Map, Value};

use crate::schema::{FieldKind, FieldSpec};
use crate::urls;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("Expected a JSON object for a record, got {0}")]
    NotAnObject(&'static str),
    #[error("Record has no usable `_id` or `id`")]
    MissingId,
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A record with an opaque identifier and whatever fields the server sent
///
/// Timestamps and other server-assigned fields are kept verbatim, the console never
/// computes them itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRecord {
    pub id: String,
    pub fields: Map<String, Value>,
}
impl ContentRecord {
    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        let mut fields = match value {
            Value::Object(map) => map,
            other => return Err(RecordError::NotAnObject(json_type_name(&other))),
        };
        let id = ["_id", "id"]
            .iter()
            .find_map(|key| match fields.remove(*key) {
                Some(Value::String(s)) if !s.is_empty() => Some(s),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            })
            .ok_or(RecordError::MissingId)?;
        Ok(Self { id, fields })
    }

    /// Follow a dot-separated path into nested objects
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// The value at `path` as editable text
    pub fn text(&self, path: &str) -> Option<String> {
        match self.get(path)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// The strings at `path`; a single string counts as a list of one
    pub fn texts(&self, path: &str) -> Vec<String> {
        match self.get(path) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
            Some(Value::String(s)) => vec![s.clone()],
            _ => Vec::new(),
        }
    }

    pub fn flag(&self, path: &str) -> bool {
        match self.get(path) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s == "true",
            _ => false,
        }
    }

    /// Media paths stored at `path`, empty strings dropped
    pub fn media(&self, path: &str) -> Vec<String> {
        self.texts(path)
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect()
    }

    /// How `field` is shown in a table cell
    pub fn display(&self, field: &FieldSpec) -> String {
        match field.kind {
            FieldKind::Flag => {
                if self.flag(field.record_path) {
                    "Yes".to_string()
                } else {
                    "No".to_string()
                }
            }
            FieldKind::TextList => self.texts(field.record_path).join(", "),
            FieldKind::Media(_) => match self.media(field.record_path).len() {
                0 => "-".to_string(),
                1 => "1 file".to_string(),
                n => format!("{n} files"),
            },
            _ => self.text(field.record_path).unwrap_or_default(),
        }
    }
}

/// Turn a media path from the backend into a url the browser can fetch
pub fn resolve_media_url(base: &str, path: &str) -> String {
    if path.starts_with("http://")
        || path.starts_with("https://")
        || path.starts_with("blob:")
        || path.starts_with("data:")
    {
        path.to_string()
    } else {
        urls::join(base, path)
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::resources::{ABOUT, PRICING};

    fn about() -> ContentRecord {
        ContentRecord::from_value(json!({
            "_id": "a1",
            "hero": { "description": "Train hard", "bgImage": "/uploads/hero.jpg", "qrImg": "" },
            "description": { "texts": ["one", "two"], "images": ["/uploads/1.jpg", "/uploads/2.jpg"] },
            "createdAt": "2025-01-01T00:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn id_is_taken_out_of_the_fields() {
        let record = about();
        assert_eq!(record.id, "a1");
        assert!(!record.fields.contains_key("_id"));
        assert!(record.fields.contains_key("createdAt"));
    }

    #[test]
    fn numeric_and_plain_ids() {
        let r = ContentRecord::from_value(json!({"id": 42, "title": "x"})).unwrap();
        assert_eq!(r.id, "42");
        assert_eq!(
            ContentRecord::from_value(json!({"title": "x"})),
            Err(RecordError::MissingId)
        );
        assert_eq!(
            ContentRecord::from_value(json!(["x"])),
            Err(RecordError::NotAnObject("an array"))
        );
    }

    #[test]
    fn nested_paths() {
        let record = about();
        assert_eq!(record.text("hero.description").as_deref(), Some("Train hard"));
        assert_eq!(record.texts("description.texts"), vec!["one", "two"]);
        assert_eq!(record.media("hero.qrImg"), Vec::<String>::new());
        assert!(record.get("trainer.texts").is_none());
        assert!(record.get("hero.description.deeper").is_none());
    }

    #[test]
    fn display_per_kind() {
        let record = ContentRecord::from_value(json!({
            "_id": "p",
            "duration": "3 Months",
            "price": 999,
            "features": ["Gym access", "Trainer"],
            "isPopular": true
        }))
        .unwrap();
        let cells: Vec<String> = PRICING.table_fields().map(|f| record.display(f)).collect();
        assert_eq!(cells, vec!["3 Months", "999", "Gym access, Trainer", "Yes"]);
        let images = ABOUT.field("descriptionImages").unwrap();
        assert_eq!(about().display(images), "2 files");
    }

    #[test]
    fn media_urls() {
        assert_eq!(
            resolve_media_url("/media", "/uploads/a.jpg"),
            "/media/uploads/a.jpg"
        );
        assert_eq!(
            resolve_media_url("http://localhost:7000/", "uploads/a.jpg"),
            "http://localhost:7000/uploads/a.jpg"
        );
        assert_eq!(
            resolve_media_url("/media", "https://cdn.example.org/a.jpg"),
            "https://cdn.example.org/a.jpg"
        );
    }
}
