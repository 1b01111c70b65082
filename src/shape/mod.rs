//! Target shape module
//!
//! A [`Shape`] is the declarative description of an output record: field names,
//! declared types, cardinality, and whether a field is required. The decoder
//! interprets it at runtime instead of relying on reflection.
//!
//! Shapes can be built in code with the builder methods, or loaded from YAML
//! (or JSON) files through [`load_shape`].

mod loader;
mod types;

pub use loader::{builtin_shape, list_builtin, load_shape, load_shape_from_str};
pub use types::{
    Cardinality, FieldDefinition, FieldKind, FieldSpec, FieldType, Shape, ShapeDefinition,
};
