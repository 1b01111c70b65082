//! Structured decoder module
//!
//! Supports: JSON, XML
//!
//! # Overview
//!
//! `raw body → Document → shape-directed mapping → DecodedRecord`
//!
//! Decoding is a pure function of the input and the shape. Errors are
//! [`crate::Error::Parse`], [`crate::Error::MissingField`] and
//! [`crate::Error::TypeCoercion`]; field order in the body never matters and
//! undeclared fields are ignored.

mod decoder;
mod mapper;
mod types;

pub use decoder::{decode, StructuredDecoder};
pub use types::{DecodedRecord, DecodedValue};
