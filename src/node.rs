//! Raw document trees
//!
//! Documents are parsed once into `serde_json::Value` trees (object key order
//! preserved) and never mutated afterwards. The schema lets the same concept
//! appear as a scalar, a list or a keyed map, so normalizers dispatch on
//! [`NodeShape`] exactly once per boundary instead of probing types inline.

use serde_json::{Map, Value};

use crate::error::{CwlError, Result};

/// An opaque parsed document node
pub type RawNode = Value;

/// Structural kind of a raw node
#[derive(Debug, Clone, Copy)]
pub enum NodeShape<'a> {
    Map(&'a Map<String, Value>),
    List(&'a [Value]),
    Scalar(&'a Value),
}

impl<'a> NodeShape<'a> {
    pub fn of(node: &'a Value) -> Self {
        match node {
            Value::Object(map) => NodeShape::Map(map),
            Value::Array(items) => NodeShape::List(items),
            other => NodeShape::Scalar(other),
        }
    }
}

/// Text of a scalar node.
///
/// Strings are returned as-is, numbers and booleans in their canonical form.
/// Null and container nodes have no text.
pub fn scalar_text(node: &Value) -> Option<String> {
    match node {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Look up a field on an object node; any other node has no fields.
#[inline]
pub fn field<'a>(node: &'a Value, name: &str) -> Option<&'a Value> {
    node.as_object().and_then(|map| map.get(name))
}

/// Text of a scalar field
#[inline]
pub fn field_text(node: &Value, name: &str) -> Option<String> {
    field(node, name).and_then(scalar_text)
}

/// Parse YAML (or JSON, which YAML subsumes) into a raw tree.
///
/// `file` is only used to label the error.
pub fn parse_tree(text: &str, file: &str) -> Result<RawNode> {
    serde_yaml::from_str::<Value>(text).map_err(|source| CwlError::Parse {
        file: file.to_string(),
        source,
    })
}
