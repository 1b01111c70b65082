// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]

//! # bodymap
//!
//! Shape-directed decoding of XML and JSON response bodies.
//!
//! ## Features
//!
//! - **One mapping step for two formats**: XML and JSON parse into the same document tree
//! - **Declarative shapes**: field names, types and cardinality, built in code or loaded from YAML
//! - **Typed errors**: parse, missing field and coercion failures, never partial results
//! - **HTTP fetch**: format picked from `Content-Type`, tested against a mock server
//!
//! ## Quick Start
//!
//! ```rust
//! use bodymap::{decode, ContentFormat, Pet};
//!
//! let body = r#"<?xml version="1.0"?>
//! <CAT>
//!   <name>Izzy</name>
//!   <breed>Siamese</breed>
//!   <children>
//!     <child><name>A</name></child>
//!     <child><name>B</name></child>
//!   </children>
//!   <age>6</age>
//! </CAT>"#;
//!
//! let record = decode(body, ContentFormat::Xml, &Pet::shape())?;
//! assert_eq!(record.integer("age")?, 6);
//!
//! let pet = Pet::try_from(record)?;
//! assert_eq!(pet.children.len(), 2);
//! # Ok::<(), bodymap::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! raw bytes ──► XmlParser / JsonParser ──► Document ──► mapper(Shape) ──► DecodedRecord
//!                      ▲                                                     │
//!               ContentFormat                                         Pet::try_from
//!        (Content-Type / extension / sniff)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Format-agnostic document tree and parsers
pub mod document;

/// Target record shapes
pub mod shape;

/// Structured decoder
pub mod decode;

/// Typed pet records
pub mod pet;

/// HTTP fetch and decode
pub mod http;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use decode::{decode, DecodedRecord, DecodedValue, StructuredDecoder};
pub use error::{Error, Result};
pub use pet::{Child, Pet};
pub use shape::{Cardinality, FieldType, Shape};
pub use types::ContentFormat;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
