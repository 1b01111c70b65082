//! Decoded value types
//!
//! The output of a decode: an immutable record whose fields follow the shape's
//! declaration order.

use crate::document::{Document, Node, NodeValue, Scalar};
use crate::error::{Error, Result};
use crate::types::{ContentFormat, JsonObject, JsonValue};
use serde::{Serialize, Serializer};

/// A decoded field value
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    /// Absent optional field
    Null,
    /// Text value
    String(String),
    /// Whole number
    Integer(i64),
    /// Finite floating point number
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Nested record
    Record(DecodedRecord),
    /// List entries in document order
    List(Vec<DecodedValue>),
}

impl DecodedValue {
    /// Variant name used in accessor errors
    fn kind(&self) -> &'static str {
        match self {
            DecodedValue::Null => "null",
            DecodedValue::String(_) => "string",
            DecodedValue::Integer(_) => "integer",
            DecodedValue::Float(_) => "float",
            DecodedValue::Bool(_) => "boolean",
            DecodedValue::Record(_) => "record",
            DecodedValue::List(_) => "list",
        }
    }

    /// Render as JSON
    pub fn to_json(&self) -> JsonValue {
        match self {
            DecodedValue::Null => JsonValue::Null,
            DecodedValue::String(s) => JsonValue::String(s.clone()),
            DecodedValue::Integer(n) => JsonValue::from(*n),
            DecodedValue::Float(f) => JsonValue::from(*f),
            DecodedValue::Bool(b) => JsonValue::Bool(*b),
            DecodedValue::Record(record) => record.to_json(),
            DecodedValue::List(items) => {
                JsonValue::Array(items.iter().map(DecodedValue::to_json).collect())
            }
        }
    }

    /// Convert into a document node, using `format` conventions for lists:
    /// JSON arrays, or XML wrapper elements holding one element per entry.
    fn to_node(&self, name: &str, format: ContentFormat) -> Node {
        let value = match self {
            DecodedValue::Null => NodeValue::Null,
            DecodedValue::String(s) => NodeValue::Scalar(Scalar::Text(s.clone())),
            DecodedValue::Integer(n) => match format {
                ContentFormat::Json => NodeValue::Scalar(Scalar::Integer(*n)),
                ContentFormat::Xml => NodeValue::Scalar(Scalar::Text(n.to_string())),
            },
            DecodedValue::Float(f) => match format {
                ContentFormat::Json => NodeValue::Scalar(Scalar::Float(*f)),
                ContentFormat::Xml => NodeValue::Scalar(Scalar::Text(f.to_string())),
            },
            DecodedValue::Bool(b) => match format {
                ContentFormat::Json => NodeValue::Scalar(Scalar::Bool(*b)),
                ContentFormat::Xml => NodeValue::Scalar(Scalar::Text(b.to_string())),
            },
            DecodedValue::Record(record) => record.to_node(name, format).value,
            DecodedValue::List(items) => {
                let entries = items
                    .iter()
                    .map(|item| {
                        let entry_name = match (format, item) {
                            (ContentFormat::Json, _) => String::new(),
                            (ContentFormat::Xml, DecodedValue::Record(r)) => r.shape().to_lowercase(),
                            (ContentFormat::Xml, _) => "item".to_string(),
                        };
                        item.to_node(&entry_name, format)
                    })
                    .collect();
                match format {
                    ContentFormat::Json => NodeValue::Array(entries),
                    ContentFormat::Xml => NodeValue::Object(entries),
                }
            }
        };
        Node::new(name, value)
    }
}

impl Serialize for DecodedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// A decoded record
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRecord {
    shape: String,
    fields: Vec<(String, DecodedValue)>,
}

impl DecodedRecord {
    pub(crate) fn new(shape: impl Into<String>, fields: Vec<(String, DecodedValue)>) -> Self {
        Self {
            shape: shape.into(),
            fields,
        }
    }

    /// Name of the shape this record was decoded with
    pub fn shape(&self) -> &str {
        &self.shape
    }

    /// Fields in shape declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &DecodedValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the shape declared no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field value by name
    pub fn get(&self, name: &str) -> Option<&DecodedValue> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    fn require(&self, name: &str) -> Result<&DecodedValue> {
        match self.get(name) {
            None | Some(DecodedValue::Null) => Err(Error::missing_field(name)),
            Some(value) => Ok(value),
        }
    }

    fn mismatch(name: &str, expected: &str, found: &DecodedValue) -> Error {
        Error::type_coercion(name, expected, found.kind())
    }

    /// String field
    pub fn string(&self, name: &str) -> Result<&str> {
        match self.require(name)? {
            DecodedValue::String(s) => Ok(s),
            other => Err(Self::mismatch(name, "string", other)),
        }
    }

    /// Integer field
    pub fn integer(&self, name: &str) -> Result<i64> {
        match self.require(name)? {
            DecodedValue::Integer(n) => Ok(*n),
            other => Err(Self::mismatch(name, "integer", other)),
        }
    }

    /// Float field (integers widen)
    pub fn float(&self, name: &str) -> Result<f64> {
        match self.require(name)? {
            DecodedValue::Float(f) => Ok(*f),
            DecodedValue::Integer(n) => Ok(*n as f64),
            other => Err(Self::mismatch(name, "float", other)),
        }
    }

    /// Boolean field
    pub fn boolean(&self, name: &str) -> Result<bool> {
        match self.require(name)? {
            DecodedValue::Bool(b) => Ok(*b),
            other => Err(Self::mismatch(name, "boolean", other)),
        }
    }

    /// Nested record field
    pub fn record(&self, name: &str) -> Result<&DecodedRecord> {
        match self.require(name)? {
            DecodedValue::Record(r) => Ok(r),
            other => Err(Self::mismatch(name, "record", other)),
        }
    }

    /// List field; an absent list reads as empty
    pub fn list(&self, name: &str) -> Result<&[DecodedValue]> {
        match self.get(name) {
            None | Some(DecodedValue::Null) => Ok(&[]),
            Some(DecodedValue::List(items)) => Ok(items),
            Some(other) => Err(Self::mismatch(name, "list", other)),
        }
    }

    /// Render as a JSON object
    pub fn to_json(&self) -> JsonValue {
        let mut map = JsonObject::new();
        for (name, value) in &self.fields {
            map.insert(name.clone(), value.to_json());
        }
        JsonValue::Object(map)
    }

    /// Build a document carrying this record's fields, laid out the way a
    /// `format` body would be. The XML root element is named after the shape.
    pub fn to_document(&self, format: ContentFormat) -> Document {
        let root_name = match format {
            ContentFormat::Json => String::new(),
            ContentFormat::Xml => self.shape.clone(),
        };
        Document::new(self.to_node(&root_name, format))
    }

    fn to_node(&self, name: &str, format: ContentFormat) -> Node {
        let children = self
            .fields
            .iter()
            .map(|(field, value)| value.to_node(field, format))
            .collect();
        Node::object(name, children)
    }
}

impl Serialize for DecodedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
