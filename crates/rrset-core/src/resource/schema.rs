//! Declarative field schema
//!
//! A host uses the schema to render documentation or to check declared
//! configuration before calling a resource. Every field of both resources is
//! immutable: changing one forces a new resource (`force_new`).

use serde::Serialize;

/// Value type of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// UTF-8 string
    String,
    /// Integer
    Int,
    /// Boolean
    Bool,
    /// Unordered set of strings
    StringSet,
}

/// One field of a resource schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSchema {
    /// Field name as it appears in configuration and state
    pub name: &'static str,
    /// Value type
    pub kind: FieldKind,
    /// Whether the field must be declared
    pub required: bool,
    /// Whether changing the field replaces the resource
    pub force_new: bool,
    /// Value used when an optional field is omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    /// Human-readable description
    #[serde(skip_serializing_if = "str::is_empty")]
    pub description: &'static str,
}

impl FieldSchema {
    /// A required, immutable field
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            force_new: true,
            default: None,
            description: "",
        }
    }

    /// An optional, immutable field with a default value
    pub fn optional(name: &'static str, kind: FieldKind, default: serde_json::Value) -> Self {
        Self {
            name,
            kind,
            required: false,
            force_new: true,
            default: Some(default),
            description: "",
        }
    }

    /// Attach a description
    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}

/// Schema of a resource type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    /// Resource type name (e.g. "powerdns_record")
    pub resource: &'static str,
    /// Declared fields, in display order
    pub fields: Vec<FieldSchema>,
}

impl Schema {
    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Fields shared by every record resource
pub(crate) fn record_set_fields() -> Vec<FieldSchema> {
    vec![
        FieldSchema::required("zone", FieldKind::String),
        FieldSchema::required("name", FieldKind::String),
        FieldSchema::required("type", FieldKind::String),
        FieldSchema::required("ttl", FieldKind::Int),
    ]
}
