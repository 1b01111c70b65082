//! Shape loader
//!
//! Resolves built-in shapes by name and falls back to YAML/JSON files on disk.

use super::types::{Shape, ShapeDefinition};
use crate::error::{Error, Result};
use crate::pet::Pet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Names of the shapes compiled into the crate
pub fn list_builtin() -> Vec<&'static str> {
    vec!["pet"]
}

/// Look up a built-in shape by name (case-insensitive)
pub fn builtin_shape(name: &str) -> Option<Shape> {
    match name.to_ascii_lowercase().as_str() {
        "pet" => Some(Pet::shape()),
        _ => None,
    }
}

/// Load a shape from a built-in name or a file path
///
/// # Examples
///
/// ```ignore
/// let pet = load_shape("pet")?;
/// let custom = load_shape("./shapes/order.yaml")?;
/// ```
pub fn load_shape(name_or_path: impl AsRef<Path>) -> Result<Shape> {
    let path = name_or_path.as_ref();
    let path_str = path.to_string_lossy();

    if !path_str.contains('/') && !path_str.contains('\\') && !path_str.contains('.') {
        if let Some(shape) = builtin_shape(&path_str) {
            debug!("Using built-in shape '{}'", path_str);
            return Ok(shape);
        }
    }

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: format!(
                    "{} (built-in shapes: {})",
                    path.display(),
                    list_builtin().join(", ")
                ),
            }
        } else {
            Error::config(format!(
                "Failed to read shape file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;

    debug!("Loaded shape file {}", path.display());
    load_shape_from_str(&content)
}

/// Parse and validate a shape from YAML (or JSON) text
pub fn load_shape_from_str(content: &str) -> Result<Shape> {
    let definition: ShapeDefinition = serde_yaml::from_str(content)?;
    Shape::try_from(definition)
}
