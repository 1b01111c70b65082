//! JSON parser
//!
//! Parses with serde_json and converts the value tree into document nodes.

use super::types::{ensure_not_blank, Document, DocumentParser, Node, NodeValue, Scalar};
use crate::error::{Error, Result};
use crate::types::{ContentFormat, JsonValue};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// JSON document parser
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl DocumentParser for JsonParser {
    fn format(&self) -> ContentFormat {
        ContentFormat::Json
    }

    fn parse(&self, raw: &[u8]) -> Result<Document> {
        ensure_not_blank(raw, ContentFormat::Json)?;

        let raw = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);
        let value: JsonValue = serde_json::from_slice(raw).map_err(|e| {
            Error::parse(
                ContentFormat::Json,
                e.to_string(),
                Some(format!("line {}, column {}", e.line(), e.column())),
            )
        })?;

        Ok(Document::from_json_value(value))
    }
}

/// Convert a JSON value into a node named `name`.
///
/// Integers that do not fit `i64` are kept as floats.
pub(super) fn value_to_node(name: String, value: JsonValue) -> Node {
    let value = match value {
        JsonValue::Null => NodeValue::Null,
        JsonValue::Bool(b) => NodeValue::Scalar(Scalar::Bool(b)),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => NodeValue::Scalar(Scalar::Integer(i)),
            None => NodeValue::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
        },
        JsonValue::String(s) => NodeValue::Scalar(Scalar::Text(s)),
        JsonValue::Array(items) => NodeValue::Array(
            items
                .into_iter()
                .map(|item| value_to_node(String::new(), item))
                .collect(),
        ),
        JsonValue::Object(map) => NodeValue::Object(
            map.into_iter()
                .map(|(key, item)| value_to_node(key, item))
                .collect(),
        ),
    };

    Node::new(name, value)
}
