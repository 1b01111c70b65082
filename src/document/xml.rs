//! XML parser
//!
//! Builds a document tree from quick-xml's pull reader. Attributes become
//! attribute nodes placed ahead of child elements; namespace prefixes are
//! dropped from element and attribute names.

use super::types::{ensure_not_blank, Document, DocumentParser, Node, NodeKind, NodeValue};
use crate::error::{Error, Result};
use crate::types::ContentFormat;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// XML document parser
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlParser;

impl DocumentParser for XmlParser {
    fn format(&self) -> ContentFormat {
        ContentFormat::Xml
    }

    fn parse(&self, raw: &[u8]) -> Result<Document> {
        ensure_not_blank(raw, ContentFormat::Xml)?;

        let input = std::str::from_utf8(raw).map_err(|e| {
            xml_error(
                format!("invalid UTF-8: {e}"),
                Some(format!("byte {}", e.valid_up_to())),
            )
        })?;

        parse_str(input)
    }
}

/// An element whose end tag has not been seen yet
struct OpenElement {
    name: String,
    children: Vec<Node>,
    text: String,
}

impl OpenElement {
    fn from_start(start: &BytesStart<'_>, offset: usize) -> Result<Self> {
        let name = utf8_name(start.local_name().as_ref(), offset)?;

        let mut children = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| xml_error(e.to_string(), byte_hint(offset)))?;
            let key = attr.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }
            let attr_name = utf8_name(attr.key.local_name().as_ref(), offset)?;
            let value = attr
                .unescape_value()
                .map_err(|e| xml_error(e.to_string(), byte_hint(offset)))?;
            children.push(Node::attribute(attr_name, value.trim()));
        }

        Ok(Self {
            name,
            children,
            text: String::new(),
        })
    }

    /// Elements with child elements or attributes become objects; anything
    /// else is a text scalar, possibly empty. An element with attributes and
    /// no child elements keeps its text in a trailing text node.
    fn finish(mut self) -> Node {
        let text = self.text.trim();
        if self.children.is_empty() {
            return Node::text(self.name, text);
        }
        if self.children.iter().all(|c| c.kind == NodeKind::Attribute) {
            self.children.push(Node::element_text(text));
        }
        Node::new(self.name, NodeValue::Object(self.children))
    }
}

fn parse_str(input: &str) -> Result<Document> {
    // Leading whitespace before the XML declaration is tolerated
    let trimmed = input.trim_start();
    let base = input.len() - trimmed.len();

    let mut reader = Reader::from_str(trimmed);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let offset = base + reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|e| {
            xml_error(
                e.to_string(),
                Some(format!("byte {}", base + reader.error_position() as usize)),
            )
        })?;

        match event {
            Event::Start(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(xml_error("multiple root elements", byte_hint(offset)));
                }
                stack.push(OpenElement::from_start(&start, offset)?);
            }
            Event::Empty(start) => {
                let node = OpenElement::from_start(&start, offset)?.finish();
                attach(&mut stack, &mut root, node, offset)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| xml_error("unexpected closing tag", byte_hint(offset)))?;
                attach(&mut stack, &mut root, element.finish(), offset)?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| xml_error(e.to_string(), byte_hint(offset)))?;
                push_text(&mut stack, &text, offset)?;
            }
            Event::CData(cdata) => {
                let text = std::str::from_utf8(&cdata)
                    .map_err(|e| xml_error(format!("invalid UTF-8 in CDATA: {e}"), byte_hint(offset)))?;
                push_text(&mut stack, text, offset)?;
            }
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.last() {
        return Err(xml_error(
            format!("unterminated element <{}>", open.name),
            Some(format!("byte {}", input.len())),
        ));
    }

    root.map(Document::new)
        .ok_or_else(|| xml_error("no root element", None))
}

fn attach(
    stack: &mut [OpenElement],
    root: &mut Option<Node>,
    node: Node,
    offset: usize,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => return Err(xml_error("multiple root elements", byte_hint(offset))),
    }
    Ok(())
}

fn push_text(stack: &mut [OpenElement], text: &str, offset: usize) -> Result<()> {
    match stack.last_mut() {
        Some(open) => open.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => return Err(xml_error("text outside of root element", byte_hint(offset))),
    }
    Ok(())
}

fn utf8_name(bytes: &[u8], offset: usize) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| xml_error(format!("invalid UTF-8 in name: {e}"), byte_hint(offset)))
}

fn byte_hint(offset: usize) -> Option<String> {
    Some(format!("byte {offset}"))
}

fn xml_error(message: impl Into<String>, position: Option<String>) -> Error {
    Error::parse(ContentFormat::Xml, message, position)
}
