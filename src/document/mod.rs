//! Document module
//!
//! Supports: XML, JSON
//!
//! # Overview
//!
//! Both formats parse into the same [`Document`] tree of named nodes, so the
//! mapping step in [`crate::decode`] never needs to know where a body came from.
//! Each parser implements [`DocumentParser`]; [`Document::parse`] picks one from
//! a [`crate::types::ContentFormat`].

mod json;
mod types;
mod xml;

pub use json::JsonParser;
pub use types::{Document, DocumentParser, Node, NodeKind, NodeValue, Scalar, TEXT_NODE_NAME};
pub use xml::XmlParser;
