//! Document tree types
//!
//! Defines the format-agnostic node tree shared by the XML and JSON parsers.

use super::{JsonParser, XmlParser};
use crate::error::{Error, Result};
use crate::types::{ContentFormat, JsonObject, JsonValue};
use std::fmt::Write as _;

/// Trait for parsing a raw body into a [`Document`]
pub trait DocumentParser: Send + Sync {
    /// Format this parser understands
    fn format(&self) -> ContentFormat;

    /// Parse the raw body into a document tree
    fn parse(&self, raw: &[u8]) -> Result<Document>;
}

/// Scalar leaf value
///
/// XML only ever produces [`Scalar::Text`]; JSON keeps its native types.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Text, the only leaf XML produces
    Text(String),
    /// JSON integer that fits `i64`
    Integer(i64),
    /// Any other JSON number
    Float(f64),
    /// JSON boolean
    Bool(bool),
}

impl Scalar {
    /// Raw textual form, as it would appear in an XML body
    pub fn raw_text(&self) -> String {
        match self {
            Scalar::Text(s) => s.clone(),
            Scalar::Integer(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// Value held by a [`Node`]
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    /// JSON `null`
    Null,
    /// Leaf value
    Scalar(Scalar),
    /// Named children in document order. XML may repeat names.
    Object(Vec<Node>),
    /// Ordered JSON array items (items carry an empty name)
    Array(Vec<Node>),
}

impl NodeValue {
    /// Short description used in coercion errors: the raw text for scalars,
    /// a placeholder for everything else.
    pub fn describe(&self) -> String {
        match self {
            NodeValue::Null => "null".to_string(),
            NodeValue::Scalar(s) => s.raw_text(),
            NodeValue::Object(_) => "<object>".to_string(),
            NodeValue::Array(_) => "<array>".to_string(),
        }
    }

    /// Whether this is JSON `null`
    pub fn is_null(&self) -> bool {
        matches!(self, NodeValue::Null)
    }
}

/// Name given to the text of an XML element that also carries attributes
pub const TEXT_NODE_NAME: &str = "$text";

/// Where a node came from in the source body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    /// XML element, JSON object member or array item
    #[default]
    Member,
    /// XML attribute
    Attribute,
    /// Text of an XML element that also has attributes
    Text,
}

/// A named node in the document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Element name (XML) or object key (JSON)
    pub name: String,
    /// Node value
    pub value: NodeValue,
    /// Origin of the node
    pub kind: NodeKind,
}

impl Node {
    /// Create a node
    pub fn new(name: impl Into<String>, value: NodeValue) -> Self {
        Self {
            name: name.into(),
            value,
            kind: NodeKind::Member,
        }
    }

    /// Create an XML attribute node
    pub fn attribute(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Attribute,
            ..Self::text(name, text)
        }
    }

    /// Create the text node of an element that also carries attributes
    pub fn element_text(text: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text,
            ..Self::text(TEXT_NODE_NAME, text)
        }
    }

    /// Create a text scalar node
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, NodeValue::Scalar(Scalar::Text(text.into())))
    }

    /// Create an object node
    pub fn object(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self::new(name, NodeValue::Object(children))
    }

    /// Child nodes of an object or array, empty for leaves
    pub fn children(&self) -> &[Node] {
        match &self.value {
            NodeValue::Object(children) | NodeValue::Array(children) => children,
            _ => &[],
        }
    }

    /// All object children with the given name, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        let children: &[Node] = match &self.value {
            NodeValue::Object(children) => children,
            _ => &[],
        };
        children.iter().filter(move |c| c.name == name)
    }

    /// Last object child with the given name (later duplicates win)
    pub fn child<'a>(&'a self, name: &'a str) -> Option<&'a Node> {
        self.children_named(name).last()
    }

    /// Object children that are elements or members, leaving out attributes
    /// and element text
    pub fn members(&self) -> impl Iterator<Item = &Node> {
        self.children().iter().filter(|c| c.kind == NodeKind::Member)
    }

    /// Scalar content of a leaf.
    ///
    /// An XML element with attributes but no child elements yields its text.
    pub fn scalar(&self) -> Option<&Scalar> {
        match &self.value {
            NodeValue::Scalar(scalar) => Some(scalar),
            NodeValue::Object(children) if self.members().next().is_none() => children
                .iter()
                .find(|c| c.kind == NodeKind::Text)
                .and_then(|c| match &c.value {
                    NodeValue::Scalar(scalar) => Some(scalar),
                    _ => None,
                }),
            _ => None,
        }
    }

    /// Whether this is an XML element with no attributes, children or text
    pub fn is_empty_element(&self) -> bool {
        matches!(&self.value, NodeValue::Scalar(Scalar::Text(text)) if text.is_empty())
    }
}

/// An immutable parsed document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Node,
}

impl Document {
    /// Wrap a root node
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// Parse a raw body with the parser for `format`
    pub fn parse(raw: &[u8], format: ContentFormat) -> Result<Self> {
        match format {
            ContentFormat::Xml => XmlParser.parse(raw),
            ContentFormat::Json => JsonParser.parse(raw),
        }
    }

    /// Parse XML text
    pub fn from_xml(input: &str) -> Result<Self> {
        XmlParser.parse(input.as_bytes())
    }

    /// Parse JSON text
    pub fn from_json(input: &str) -> Result<Self> {
        JsonParser.parse(input.as_bytes())
    }

    /// Build a document from an already-parsed JSON value
    pub fn from_json_value(value: JsonValue) -> Self {
        Self::new(super::json::value_to_node(String::new(), value))
    }

    /// Root node
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Render the document as a JSON value.
    ///
    /// Repeated object keys (XML siblings) are collected into an array.
    pub fn to_json_value(&self) -> JsonValue {
        node_value_to_json(&self.root.value)
    }

    /// Render the document as XML text with an XML declaration.
    ///
    /// Array items and unnamed nodes are written as `<item>` elements.
    pub fn to_xml_string(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\"?>\n");
        let root_name = if self.root.name.is_empty() {
            "root"
        } else {
            &self.root.name
        };
        write_xml_node(&mut out, root_name, &self.root.value, 0);
        out
    }
}

fn node_value_to_json(value: &NodeValue) -> JsonValue {
    match value {
        NodeValue::Null => JsonValue::Null,
        NodeValue::Scalar(Scalar::Text(s)) => JsonValue::String(s.clone()),
        NodeValue::Scalar(Scalar::Integer(n)) => JsonValue::from(*n),
        NodeValue::Scalar(Scalar::Float(f)) => JsonValue::from(*f),
        NodeValue::Scalar(Scalar::Bool(b)) => JsonValue::Bool(*b),
        NodeValue::Array(items) => {
            JsonValue::Array(items.iter().map(|n| node_value_to_json(&n.value)).collect())
        }
        NodeValue::Object(children) => {
            let mut map = JsonObject::new();
            for child in children {
                if map.contains_key(&child.name) {
                    continue;
                }
                let mut values: Vec<JsonValue> = children
                    .iter()
                    .filter(|c| c.name == child.name)
                    .map(|c| node_value_to_json(&c.value))
                    .collect();
                let rendered = if values.len() == 1 {
                    values.remove(0)
                } else {
                    JsonValue::Array(values)
                };
                map.insert(child.name.clone(), rendered);
            }
            JsonValue::Object(map)
        }
    }
}

fn write_xml_node(out: &mut String, name: &str, value: &NodeValue, depth: usize) {
    let indent = "  ".repeat(depth);
    match value {
        NodeValue::Null => {
            let _ = writeln!(out, "{indent}<{name}/>");
        }
        NodeValue::Scalar(scalar) => {
            let text = scalar.raw_text();
            let _ = writeln!(
                out,
                "{indent}<{name}>{}</{name}>",
                quick_xml::escape::escape(text.as_str())
            );
        }
        NodeValue::Object(children) | NodeValue::Array(children) => {
            if children.is_empty() {
                let _ = writeln!(out, "{indent}<{name}/>");
                return;
            }
            let _ = writeln!(out, "{indent}<{name}>");
            for child in children {
                if child.kind == NodeKind::Text {
                    let text = child.value.describe();
                    let _ = writeln!(out, "{indent}  {}", quick_xml::escape::escape(text.as_str()));
                    continue;
                }
                let child_name = if child.name.is_empty() {
                    "item"
                } else {
                    &child.name
                };
                write_xml_node(out, child_name, &child.value, depth + 1);
            }
            let _ = writeln!(out, "{indent}</{name}>");
        }
    }
}

/// Reject empty or whitespace-only bodies before handing them to a parser
pub(super) fn ensure_not_blank(raw: &[u8], format: ContentFormat) -> Result<()> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::parse(format, "empty input", None));
    }
    Ok(())
}
