//! Turning an open form into the body of a create or update request

use serde_json::{Map, Value};

use crate::form::{parse_number, FieldValue, FormError, FormState};
use crate::schema::{FieldKind, ResourceSchema};

/// One part of a `multipart/form-data` body
#[derive(Debug, Clone, PartialEq)]
pub enum Part<F> {
    Text { name: String, value: String },
    File { name: String, file: F },
}
impl<F> Part<F> {
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload<F> {
    Json(Value),
    Multipart(Vec<Part<F>>),
}

/// Validate `form` and build the request body for `schema`
///
/// Content types with media fields are always sent as multipart, all others as JSON. Media the
/// user did not touch are not sent at all. Blank scalars and empty lists are left out of a new
/// record, but sent empty on an edit so the stored value is cleared.
pub fn build_payload<F: Clone>(
    schema: &ResourceSchema,
    form: &FormState<F>,
) -> Result<Payload<F>, FormError> {
    form.validate(schema)?;
    if schema.has_media() {
        Ok(Payload::Multipart(multipart_parts(schema, form)))
    } else {
        Ok(Payload::Json(json_object(schema, form)))
    }
}

fn multipart_parts<F: Clone>(schema: &ResourceSchema, form: &FormState<F>) -> Vec<Part<F>> {
    let text = |name: &str, value: String| Part::Text {
        name: name.to_string(),
        value,
    };
    let editing = form.is_edit();
    let mut parts = Vec::new();
    for field in schema.fields {
        let Some(value) = form.value(field.key) else {
            continue;
        };
        match (value, &field.kind) {
            (FieldValue::Text(t), FieldKind::Number) => {
                match parse_number(t) {
                    Some(n) => parts.push(text(field.wire_name, n.to_string())),
                    None if editing => parts.push(text(field.wire_name, String::new())),
                    None => {}
                }
            }
            (FieldValue::Text(t), _) => {
                if editing || !t.trim().is_empty() {
                    parts.push(text(field.wire_name, t.clone()));
                }
            }
            (FieldValue::Flag(b), _) => parts.push(text(field.wire_name, b.to_string())),
            (FieldValue::List(list), _) => {
                let before = parts.len();
                parts.extend(list.filled().map(|e| text(field.wire_name, e.clone())));
                // a single empty entry tells the backend the list is now empty
                if editing && parts.len() == before {
                    parts.push(text(field.wire_name, String::new()));
                }
            }
            (FieldValue::Media(media), kind) => {
                parts.extend(media.files.iter().map(|file| Part::File {
                    name: field.wire_name.to_string(),
                    file: file.clone(),
                }));
                if let FieldKind::Media(spec) = kind {
                    if let (true, Some(flag)) = (media.clear, spec.clear_flag) {
                        parts.push(text(flag, "true".to_string()));
                    }
                }
            }
        }
    }
    parts
}

fn json_object<F>(schema: &ResourceSchema, form: &FormState<F>) -> Value {
    let editing = form.is_edit();
    let mut object = Map::new();
    for field in schema.fields {
        let Some(value) = form.value(field.key) else {
            continue;
        };
        let json = match (value, &field.kind) {
            (FieldValue::Text(t), FieldKind::Number) => parse_number(t)
                .map(Value::Number)
                .or_else(|| editing.then_some(Value::Null)),
            (FieldValue::Text(t), _) => {
                Some(Value::String(t.clone())).filter(|_| editing || !t.trim().is_empty())
            }
            (FieldValue::Flag(b), _) => Some(Value::Bool(*b)),
            (FieldValue::List(list), _) => Some(Value::Array(
                list.filled().cloned().map(Value::String).collect(),
            )),
            // schemas with media are never sent as JSON
            (FieldValue::Media(_), _) => None,
        };
        if let Some(json) = json {
            object.insert(field.wire_name.to_string(), json);
        }
    }
    Value::Object(object)
}
