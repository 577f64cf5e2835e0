//! Describing a content type: which fields it has, where they live in the server record and how
//! they are named on the wire.

use crate::record::ContentRecord;
use crate::urls;

/// What kind of media a file input accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaAccept {
    Image,
    Video,
}
impl MediaAccept {
    /// Value for the `accept` attribute of a file input
    pub fn mime_pattern(&self) -> &'static str {
        match self {
            Self::Image => "image/*",
            Self::Video => "video/*",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaSpec {
    /// Whether several files may be picked at once
    pub multiple: bool,
    pub accept: MediaAccept,
    /// Wire name of a flag asking the backend to drop the current media
    pub clear_flag: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    Number,
    Date,
    Time,
    Flag,
    /// An ordered list of independently editable strings
    TextList,
    /// One of a fixed set of values. The first option is the default.
    Choice(&'static [&'static str]),
    Media(MediaSpec),
}
impl FieldKind {
    pub fn is_media(&self) -> bool {
        matches!(self, Self::Media(_))
    }
}

/// A single field of a content type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Stable key of this field in the form state
    pub key: &'static str,
    /// Human readable label
    pub label: &'static str,
    /// Dot-separated path into the record returned by the server
    pub record_path: &'static str,
    /// Name used in JSON objects and multipart parts
    pub wire_name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Shown as a column in the overview table
    pub in_table: bool,
}
impl FieldSpec {
    /// A field whose key, record path and wire name are all `key`
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            record_path: key,
            wire_name: key,
            kind,
            required: false,
            in_table: false,
        }
    }

    pub const fn text(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    pub const fn image(key: &'static str, label: &'static str) -> Self {
        Self::new(
            key,
            label,
            FieldKind::Media(MediaSpec {
                multiple: false,
                accept: MediaAccept::Image,
                clear_flag: None,
            }),
        )
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn in_table(mut self) -> Self {
        self.in_table = true;
        self
    }

    pub const fn at(mut self, record_path: &'static str) -> Self {
        self.record_path = record_path;
        self
    }

    pub const fn wire(mut self, wire_name: &'static str) -> Self {
        self.wire_name = wire_name;
        self
    }

    pub fn media_spec(&self) -> Option<&MediaSpec> {
        match &self.kind {
            FieldKind::Media(spec) => Some(spec),
            _ => None,
        }
    }
}

/// Everything the generic resource manager needs to know about one content type
#[derive(Debug, PartialEq, Eq)]
pub struct ResourceSchema {
    /// Stable identifier, also used as the console route
    pub key: &'static str,
    /// Plural label, used as page heading and in the navigation
    pub label: &'static str,
    /// Singular noun, used in buttons and confirmations
    pub singular: &'static str,
    /// Collection endpoint relative to the api base url
    pub endpoint: &'static str,
    /// Key under which the backend returns the collection
    pub collection_key: &'static str,
    /// At most one record exists
    pub singleton: bool,
    /// Records can only be listed and inspected
    pub read_only: bool,
    pub fields: &'static [FieldSpec],
    /// Key of the field naming a record in tables and confirmations
    pub title_field: &'static str,
}
impl ResourceSchema {
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Any record of this type carries image or video files
    pub fn has_media(&self) -> bool {
        self.fields.iter().any(|f| f.kind.is_media())
    }

    pub fn media_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.kind.is_media())
    }

    pub fn table_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.in_table)
    }

    /// Endpoint of a single record
    pub fn item_endpoint(&self, id: &str) -> String {
        urls::join(self.endpoint, id)
    }

    /// A short name for `record`, falling back to its id
    pub fn title_of(&self, record: &ContentRecord) -> String {
        self.field(self.title_field)
            .and_then(|f| record.text(f.record_path))
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| record.id.clone())
    }
}
