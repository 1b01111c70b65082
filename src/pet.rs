//! Pet records
//!
//! Typed form of the built-in `pet` shape:
//!
//! ```text
//! Pet:
//!   name: string
//!   breed: string
//!   age: integer
//!   children: ordered-list of { name: string }
//! ```

use crate::decode::{DecodedRecord, DecodedValue, StructuredDecoder};
use crate::error::{Error, Result};
use crate::shape::{FieldType, Shape};
use crate::types::ContentFormat;
use serde::{Deserialize, Serialize};

/// A pet and its children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    /// Pet name
    pub name: String,
    /// Breed
    pub breed: String,
    /// Age in years
    pub age: i64,
    /// Children, in document order
    pub children: Vec<Child>,
}

/// One entry of [`Pet::children`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    /// Child name
    pub name: String,
}

impl Child {
    /// Create a child
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Shape of a child entry
    pub fn shape() -> Shape {
        Shape::new("Child").field("name", FieldType::String)
    }
}

impl Pet {
    /// Shape of a pet record
    pub fn shape() -> Shape {
        Shape::new("Pet")
            .field("name", FieldType::String)
            .field("breed", FieldType::String)
            .field("age", FieldType::Integer)
            .list("children", FieldType::record(Child::shape()))
    }

    /// Decode a raw body straight into a `Pet`
    pub fn decode(raw: impl AsRef<[u8]>, format: ContentFormat) -> Result<Self> {
        let record = StructuredDecoder::new().decode(raw, format, &Self::shape())?;
        Self::try_from(record)
    }
}

impl TryFrom<&DecodedRecord> for Child {
    type Error = Error;

    fn try_from(record: &DecodedRecord) -> Result<Self> {
        Ok(Self {
            name: record.string("name")?.to_string(),
        })
    }
}

impl TryFrom<DecodedRecord> for Pet {
    type Error = Error;

    fn try_from(record: DecodedRecord) -> Result<Self> {
        let children = record
            .list("children")?
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                DecodedValue::Record(child) => Child::try_from(child),
                _ => Err(Error::type_coercion(
                    format!("children[{index}]"),
                    "record Child",
                    item.to_json().to_string(),
                )),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: record.string("name")?.to_string(),
            breed: record.string("breed")?.to_string(),
            age: record.integer("age")?,
            children,
        })
    }
}
