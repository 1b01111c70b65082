//! Structured decoder
//!
//! Parses a raw body with the parser for its [`ContentFormat`] and maps the
//! resulting document onto a [`Shape`].

use super::mapper;
use super::types::DecodedRecord;
use crate::document::Document;
use crate::error::Result;
use crate::shape::Shape;
use crate::types::ContentFormat;
use tracing::debug;

/// Stateless decoder; safe to share across threads and call concurrently
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredDecoder;

impl StructuredDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self
    }

    /// Decode a raw body into a record of `shape`.
    ///
    /// Either every declared field decodes or an error is returned; there is no
    /// partial result.
    pub fn decode(
        &self,
        raw: impl AsRef<[u8]>,
        format: ContentFormat,
        shape: &Shape,
    ) -> Result<DecodedRecord> {
        let raw = raw.as_ref();
        debug!(
            "Decoding {} bytes of {} as {}",
            raw.len(),
            format,
            shape.name()
        );

        let document = Document::parse(raw, format)?;
        self.decode_document(&document, shape)
    }

    /// Map an already-parsed document onto `shape`
    pub fn decode_document(&self, document: &Document, shape: &Shape) -> Result<DecodedRecord> {
        mapper::map_root(document.root(), shape)
    }
}

/// Decode a raw body into a record of `shape`
///
/// # Examples
///
/// ```
/// use bodymap::decode::decode;
/// use bodymap::shape::{FieldType, Shape};
/// use bodymap::types::ContentFormat;
///
/// let shape = Shape::new("Cat")
///     .field("name", FieldType::String)
///     .field("age", FieldType::Integer);
///
/// let record = decode(r#"{"name": "Izzy", "age": 6}"#, ContentFormat::Json, &shape).unwrap();
/// assert_eq!(record.string("name").unwrap(), "Izzy");
/// assert_eq!(record.integer("age").unwrap(), 6);
/// ```
pub fn decode(
    raw: impl AsRef<[u8]>,
    format: ContentFormat,
    shape: &Shape,
) -> Result<DecodedRecord> {
    StructuredDecoder::new().decode(raw, format, shape)
}
