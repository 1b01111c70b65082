//! Shape types
//!
//! [`Shape`] is the validated runtime form; [`ShapeDefinition`] is its
//! serde-facing file representation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Declared type of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Any scalar, as text
    String,
    /// 64-bit signed integer
    Integer,
    /// Finite float
    Float,
    /// `true` or `false`
    Boolean,
    /// Nested record
    Record(Shape),
}

impl FieldType {
    /// Nested record type
    pub fn record(shape: Shape) -> Self {
        FieldType::Record(shape)
    }

    /// Type name used in error messages
    pub fn describe(&self) -> String {
        match self {
            FieldType::String => "string".to_string(),
            FieldType::Integer => "integer".to_string(),
            FieldType::Float => "float".to_string(),
            FieldType::Boolean => "boolean".to_string(),
            FieldType::Record(shape) => format!("record {}", shape.name()),
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Single value or ordered list of values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cardinality {
    /// Single value
    #[default]
    One,
    /// Ordered list of values
    Many,
}

/// One declared field of a shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Exact, case-sensitive name in the body
    pub name: String,
    /// Value type
    pub field_type: FieldType,
    /// Single value or list
    pub cardinality: Cardinality,
    /// Required single fields fail with `MissingField` when absent.
    /// Lists are never missing: absence decodes to an empty list.
    pub required: bool,
}

/// Description of an output record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    name: String,
    fields: Vec<FieldSpec>,
}

impl Shape {
    /// Create an empty shape
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a required single-valued field
    #[must_use]
    pub fn field(self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.with_field(FieldSpec {
            name: name.into(),
            field_type,
            cardinality: Cardinality::One,
            required: true,
        })
    }

    /// Add an optional single-valued field
    #[must_use]
    pub fn optional(self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.with_field(FieldSpec {
            name: name.into(),
            field_type,
            cardinality: Cardinality::One,
            required: false,
        })
    }

    /// Add an ordered list field
    #[must_use]
    pub fn list(self, name: impl Into<String>, item_type: FieldType) -> Self {
        self.with_field(FieldSpec {
            name: name.into(),
            field_type: item_type,
            cardinality: Cardinality::Many,
            required: true,
        })
    }

    /// Add a fully specified field
    #[must_use]
    pub fn with_field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Shape name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields in declaration order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a declared field
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check field names are non-empty and unique, recursively
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_shape("", "shape name is empty"));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(Error::invalid_shape(&self.name, "field name is empty"));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(Error::invalid_shape(
                    &self.name,
                    format!("duplicate field '{}'", field.name),
                ));
            }
            if let FieldType::Record(nested) = &field.field_type {
                nested.validate()?;
            }
        }

        Ok(())
    }

    /// Convert into the file representation
    pub fn to_definition(&self) -> ShapeDefinition {
        ShapeDefinition {
            name: self.name.clone(),
            fields: self.fields.iter().map(FieldDefinition::from_spec).collect(),
        }
    }
}

// ============================================================================
// File representation
// ============================================================================

/// Field kind as written in shape files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// [`FieldType::String`]
    String,
    /// [`FieldType::Integer`]
    Integer,
    /// [`FieldType::Float`]
    Float,
    /// [`FieldType::Boolean`]
    Boolean,
    /// [`FieldType::Record`] built from `fields`
    Record,
}

/// Shape as loaded from YAML/JSON
///
/// ```yaml
/// name: Pet
/// fields:
///   - name: name
///     type: string
///   - name: age
///     type: integer
///   - name: children
///     type: record
///     list: true
///     shape: Child
///     fields:
///       - name: name
///         type: string
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeDefinition {
    /// Shape name
    pub name: String,
    /// Declared fields in order
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// Field as loaded from YAML/JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field name
    pub name: String,

    /// Value type
    #[serde(rename = "type")]
    pub kind: FieldKind,

    /// Ordered list of values
    #[serde(default, skip_serializing_if = "is_false")]
    pub list: bool,

    /// Whether a single field must be present (default `true`)
    #[serde(default = "default_required")]
    pub required: bool,

    /// Nested record name (defaults to the field name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,

    /// Nested record fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDefinition>,
}

fn default_required() -> bool {
    true
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

impl FieldDefinition {
    fn from_spec(spec: &FieldSpec) -> Self {
        let (kind, shape, fields) = match &spec.field_type {
            FieldType::String => (FieldKind::String, None, Vec::new()),
            FieldType::Integer => (FieldKind::Integer, None, Vec::new()),
            FieldType::Float => (FieldKind::Float, None, Vec::new()),
            FieldType::Boolean => (FieldKind::Boolean, None, Vec::new()),
            FieldType::Record(nested) => (
                FieldKind::Record,
                Some(nested.name.clone()),
                nested.fields.iter().map(FieldDefinition::from_spec).collect(),
            ),
        };

        Self {
            name: spec.name.clone(),
            kind,
            list: spec.cardinality == Cardinality::Many,
            required: spec.required,
            shape,
            fields,
        }
    }

    fn into_spec(self, parent: &str) -> Result<FieldSpec> {
        let field_type = match self.kind {
            FieldKind::Record => {
                if self.fields.is_empty() {
                    return Err(Error::invalid_shape(
                        parent,
                        format!("record field '{}' declares no fields", self.name),
                    ));
                }
                let nested = ShapeDefinition {
                    name: self.shape.unwrap_or_else(|| self.name.clone()),
                    fields: self.fields,
                };
                FieldType::Record(Shape::try_from(nested)?)
            }
            scalar => {
                if !self.fields.is_empty() || self.shape.is_some() {
                    return Err(Error::invalid_shape(
                        parent,
                        format!("scalar field '{}' cannot declare nested fields", self.name),
                    ));
                }
                match scalar {
                    FieldKind::String => FieldType::String,
                    FieldKind::Integer => FieldType::Integer,
                    FieldKind::Float => FieldType::Float,
                    _ => FieldType::Boolean,
                }
            }
        };

        Ok(FieldSpec {
            name: self.name,
            field_type,
            cardinality: if self.list {
                Cardinality::Many
            } else {
                Cardinality::One
            },
            required: self.required,
        })
    }
}

impl TryFrom<ShapeDefinition> for Shape {
    type Error = Error;

    fn try_from(def: ShapeDefinition) -> Result<Self> {
        let name = def.name;
        let fields = def
            .fields
            .into_iter()
            .map(|f| f.into_spec(&name))
            .collect::<Result<Vec<_>>>()?;

        let shape = Shape { name, fields };
        shape.validate()?;
        Ok(shape)
    }
}
