//! Shape-directed mapping
//!
//! Walks a [`Node`] tree alongside a [`Shape`], locating each declared field by
//! exact name and coercing scalars to the declared type. Undeclared nodes are
//! skipped. The first failure aborts the whole mapping.

use super::types::{DecodedRecord, DecodedValue};
use crate::document::{Node, NodeKind, NodeValue, Scalar};
use crate::error::{Error, Result};
use crate::shape::{Cardinality, FieldSpec, FieldType, Shape};
use tracing::trace;

/// Path used for errors raised against the document root
const ROOT_PATH: &str = "$";

/// Map the document root onto `shape`
pub(crate) fn map_root(root: &Node, shape: &Shape) -> Result<DecodedRecord> {
    map_record(root, shape, "")
}

fn map_record(node: &Node, shape: &Shape, path: &str) -> Result<DecodedRecord> {
    // An empty XML element is a record with no fields present
    let children: &[Node] = match &node.value {
        NodeValue::Object(children) => children,
        _ if node.is_empty_element() => &[],
        _ => {
            let at = if path.is_empty() { ROOT_PATH } else { path };
            return Err(Error::type_coercion(
                at,
                format!("record {}", shape.name()),
                node.value.describe(),
            ));
        }
    };

    for child in children {
        if child.kind != NodeKind::Text && shape.get(&child.name).is_none() {
            trace!("Ignoring undeclared field '{}' in {}", child.name, shape.name());
        }
    }

    let mut fields = Vec::with_capacity(shape.fields().len());
    for spec in shape.fields() {
        let field_path = join_path(path, &spec.name);
        let value = match spec.cardinality {
            Cardinality::One => map_single_field(node, spec, &field_path)?,
            Cardinality::Many => map_list_field(node, spec, &field_path)?,
        };
        fields.push((spec.name.clone(), value));
    }

    Ok(DecodedRecord::new(shape.name(), fields))
}

fn map_single_field(parent: &Node, spec: &FieldSpec, path: &str) -> Result<DecodedValue> {
    match parent.child(&spec.name) {
        Some(node) if !node.value.is_null() => map_value(node, &spec.field_type, path),
        _ if spec.required => Err(Error::missing_field(path)),
        _ => Ok(DecodedValue::Null),
    }
}

/// Collect list entries.
///
/// - several sibling nodes carrying the field name: one entry each (unwrapped XML)
/// - a single array node: one entry per item (JSON)
/// - a single object node holding fields of the record item type: one entry
/// - any other single object node: a wrapper, one entry per child element
///   whatever its name, attributes ignored (XML)
/// - absent, `null`, or empty text: no entries
/// - any other single scalar: one entry
fn map_list_field(parent: &Node, spec: &FieldSpec, path: &str) -> Result<DecodedValue> {
    let matches: Vec<&Node> = parent.children_named(&spec.name).collect();

    let entries: Vec<&Node> = match matches.as_slice() {
        [] => Vec::new(),
        [single] => match &single.value {
            NodeValue::Null => Vec::new(),
            NodeValue::Scalar(Scalar::Text(text)) if text.is_empty() => Vec::new(),
            NodeValue::Array(items) => items.iter().collect(),
            NodeValue::Object(_) if is_lone_entry(single, &spec.field_type) => vec![*single],
            NodeValue::Object(_) => single.members().collect(),
            NodeValue::Scalar(_) => vec![*single],
        },
        many => many.to_vec(),
    };

    let items = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let entry_path = format!("{path}[{index}]");
            if entry.value.is_null() {
                return Err(Error::missing_field(entry_path));
            }
            map_value(entry, &spec.field_type, &entry_path)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DecodedValue::List(items))
}

/// Whether a single list node is itself an entry rather than a wrapper.
///
/// Holds for a record item whose children name a field of the item shape, and
/// for an element with attributes and non-empty text but no child elements.
fn is_lone_entry(node: &Node, field_type: &FieldType) -> bool {
    if let FieldType::Record(item) = field_type {
        if node
            .children()
            .iter()
            .any(|c| c.kind != NodeKind::Text && item.get(&c.name).is_some())
        {
            return true;
        }
    }
    node.members().next().is_none()
        && node
            .scalar()
            .is_some_and(|scalar| !matches!(scalar, Scalar::Text(text) if text.is_empty()))
}

fn map_value(node: &Node, field_type: &FieldType, path: &str) -> Result<DecodedValue> {
    if let FieldType::Record(nested) = field_type {
        return map_record(node, nested, path).map(DecodedValue::Record);
    }

    let Some(scalar) = node.scalar() else {
        return Err(Error::type_coercion(
            path,
            field_type.describe(),
            node.value.describe(),
        ));
    };

    coerce_scalar(scalar, field_type).ok_or_else(|| {
        Error::type_coercion(path, field_type.describe(), scalar.raw_text())
    })
}

/// Coerce a scalar to a primitive type, `None` when it does not fit
fn coerce_scalar(scalar: &Scalar, field_type: &FieldType) -> Option<DecodedValue> {
    match field_type {
        FieldType::String => Some(DecodedValue::String(scalar.raw_text())),
        FieldType::Integer => match scalar {
            Scalar::Integer(n) => Some(DecodedValue::Integer(*n)),
            Scalar::Float(f) => float_to_integer(*f).map(DecodedValue::Integer),
            Scalar::Text(s) => s.trim().parse::<i64>().ok().map(DecodedValue::Integer),
            Scalar::Bool(_) => None,
        },
        FieldType::Float => match scalar {
            Scalar::Float(f) => Some(DecodedValue::Float(*f)),
            Scalar::Integer(n) => Some(DecodedValue::Float(*n as f64)),
            Scalar::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(DecodedValue::Float),
            Scalar::Bool(_) => None,
        },
        FieldType::Boolean => match scalar {
            Scalar::Bool(b) => Some(DecodedValue::Bool(*b)),
            Scalar::Text(s) => match s.trim() {
                "true" => Some(DecodedValue::Bool(true)),
                "false" => Some(DecodedValue::Bool(false)),
                _ => None,
            },
            Scalar::Integer(_) | Scalar::Float(_) => None,
        },
        FieldType::Record(_) => None,
    }
}

#[allow(clippy::cast_precision_loss)]
fn float_to_integer(f: f64) -> Option<i64> {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn join_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{parent}.{field}")
    }
}
