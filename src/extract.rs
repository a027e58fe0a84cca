//! Field extractors
//!
//! Stateless functions pulling one semantic value out of a single node while
//! absorbing dialect differences between schema generations (draft-2 dotted
//! sources, `description` instead of `doc`, `outputSource` vs `source`).
//! A missing node or field always yields `None`, never an error.

use serde_json::Value;

use crate::node::{field, field_text, scalar_text, NodeShape};

const ID: &str = "id";
const LABEL: &str = "label";
const DOC: &str = "doc";
const DESCRIPTION: &str = "description";
const DEFAULT: &str = "default";
const LOCATION: &str = "location";
const OUTPUT_SOURCE: &str = "outputSource";
const SOURCE: &str = "source";
const TYPE: &str = "type";
const ARRAY: &str = "array";
const ITEMS: &str = "items";
const NULL_TYPE: &str = "null";

/// Identifier of a node with one leading `#` stripped
pub fn extract_id(node: &Value) -> Option<String> {
    field_text(node, ID).and_then(|id| normalize_id(&id))
}

/// Strip one leading `#`; an id left empty is no id at all.
pub fn normalize_id(id: &str) -> Option<String> {
    let id = strip_hash(id);
    (!id.is_empty()).then(|| id.to_string())
}

pub fn extract_label(node: &Value) -> Option<String> {
    field_text(node, LABEL)
}

/// `doc`, or the legacy `description` when `doc` is absent.
///
/// Multi-line docs written as a list of strings are joined with newlines.
pub fn extract_doc(node: &Value) -> Option<String> {
    let doc = field(node, DOC).or_else(|| field(node, DESCRIPTION))?;
    match NodeShape::of(doc) {
        NodeShape::Scalar(value) => scalar_text(value),
        NodeShape::List(lines) => Some(
            lines
                .iter()
                .filter_map(scalar_text)
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        NodeShape::Map(_) => None,
    }
}

/// Rendered default value.
///
/// File and directory literals render as their location. Everything else is
/// wrapped in escaped quotes so it reads as a literal whatever its type.
/// Containers have no text and render as an empty literal; null renders as
/// `null`.
pub fn extract_default(node: &Value) -> Option<String> {
    let default = field(node, DEFAULT)?;
    if let Some(location) = field_text(default, LOCATION) {
        return Some(location);
    }
    let text = match default {
        Value::Null => "null".to_string(),
        other => scalar_text(other).unwrap_or_default(),
    };
    Some(format!("\\\"{}\\\"", text))
}

/// Step ids referenced by `outputSource` (preferred) or `source`.
///
/// `None` only when the node itself is absent; a node without any source
/// field yields an empty list.
pub fn extract_source(node: Option<&Value>) -> Option<Vec<String>> {
    let node = node?;
    let source = match field(node, OUTPUT_SOURCE).or_else(|| field(node, SOURCE)) {
        Some(source) => source,
        None => return Some(Vec::new()),
    };

    let sources = match NodeShape::of(source) {
        NodeShape::Scalar(value) => scalar_text(value)
            .map(|text| vec![step_id_from_source(&text)])
            .unwrap_or_default(),
        NodeShape::List(items) => items
            .iter()
            .filter_map(scalar_text)
            .map(|text| step_id_from_source(&text))
            .collect(),
        NodeShape::Map(_) => Vec::new(),
    };
    Some(sources)
}

/// A source reference split into its owning step and output port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    pub step: String,
    /// Output port on `step`; `None` for direct workflow-input references
    pub port: Option<String>,
}

impl SourceRef {
    /// Split `step/port` (draft-3 and later) or `step.port` (draft-2).
    ///
    /// The first separator wins; the slash form is checked before the dot form.
    pub fn parse(source: &str) -> Self {
        let source = strip_hash(source);
        let split = source.split_once('/').or_else(|| source.split_once('.'));
        match split {
            Some((step, port)) => SourceRef {
                step: step.to_string(),
                port: Some(port.to_string()),
            },
            None => SourceRef {
                step: source.to_string(),
                port: None,
            },
        }
    }
}

/// Step portion of a source reference, dropping the port name
pub fn step_id_from_source(source: &str) -> String {
    SourceRef::parse(source).step
}

/// Render a type node for display.
///
/// - `File` renders as `File`
/// - `[string, "null"]` renders as `string (Optional)`
/// - `{type: array, items: File}` renders as `File[]`
pub fn extract_types(type_node: &Value) -> Option<String> {
    match NodeShape::of(type_node) {
        NodeShape::Scalar(value) => scalar_text(value),
        NodeShape::List(types) => {
            let mut optional = false;
            let mut rendered = Vec::with_capacity(types.len());
            for entry in types {
                match entry {
                    Value::String(name) if name == NULL_TYPE => optional = true,
                    Value::Object(_) => rendered.extend(verbose_type(entry)),
                    other => rendered.extend(scalar_text(other)),
                }
            }

            let mut details = rendered.join(", ");
            if optional {
                details.push_str(" (Optional)");
            }
            Some(details)
        }
        NodeShape::Map(map) => map.get(ITEMS).map(array_of),
    }
}

/// Type entry written out as an object (`type:` plus parameters)
fn verbose_type(entry: &Value) -> Option<String> {
    let kind = field_text(entry, TYPE)?;
    if kind == ARRAY {
        Some(field(entry, ITEMS).map(array_of).unwrap_or_else(|| "[]".to_string()))
    } else {
        Some(kind)
    }
}

fn array_of(items: &Value) -> String {
    format!("{}[]", extract_types(items).unwrap_or_default())
}

#[inline]
fn strip_hash(text: &str) -> &str {
    text.strip_prefix('#').unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_strips_one_leading_hash() {
        assert_eq!(extract_id(&json!({"id": "#foo"})), Some("foo".to_string()));
        assert_eq!(extract_id(&json!({"id": "foo"})), Some("foo".to_string()));
        assert_eq!(extract_id(&json!({"id": "##foo"})), Some("#foo".to_string()));
        assert_eq!(extract_id(&json!({"label": "no id"})), None);
    }

    #[test]
    fn empty_id_is_absent() {
        assert_eq!(extract_id(&json!({"id": "#"})), None);
        assert_eq!(extract_id(&json!({"id": ""})), None);
    }

    #[test]
    fn doc_prefers_doc_over_description() {
        let node = json!({"doc": "modern", "description": "legacy"});
        assert_eq!(extract_doc(&node), Some("modern".to_string()));
        assert_eq!(extract_doc(&json!({"description": "legacy"})), Some("legacy".to_string()));
        assert_eq!(extract_doc(&json!({})), None);
    }

    #[test]
    fn doc_lines_are_joined() {
        let node = json!({"doc": ["first line", "second line"]});
        assert_eq!(extract_doc(&node), Some("first line\nsecond line".to_string()));
    }

    #[test]
    fn default_file_renders_location() {
        let node = json!({"default": {"class": "File", "location": "data/input.txt"}});
        assert_eq!(extract_default(&node), Some("data/input.txt".to_string()));
    }

    #[test]
    fn default_without_location_is_quoted_text() {
        // draft-3 File literals carry `path`, which is not a location
        let draft3 = json!({"default": {"class": "File", "path": "legacy.txt"}});
        assert_eq!(extract_default(&draft3), Some("\\\"\\\"".to_string()));
        assert_eq!(extract_default(&json!({"default": {"a": 1}})), Some("\\\"\\\"".to_string()));
        assert_eq!(extract_default(&json!({"default": null})), Some("\\\"null\\\"".to_string()));
    }

    #[test]
    fn default_literals_are_quoted() {
        assert_eq!(extract_default(&json!({"default": "abc"})), Some("\\\"abc\\\"".to_string()));
        assert_eq!(extract_default(&json!({"default": 42})), Some("\\\"42\\\"".to_string()));
        assert_eq!(extract_default(&json!({"default": false})), Some("\\\"false\\\"".to_string()));
        assert_eq!(extract_default(&json!({"default": [1, 2]})), Some("\\\"\\\"".to_string()));
        assert_eq!(extract_default(&json!({"type": "int"})), None);
    }

    #[test]
    fn source_prefers_output_source() {
        let node = json!({"outputSource": "#step1/out", "source": "other/out"});
        assert_eq!(extract_source(Some(&node)), Some(vec!["step1".to_string()]));
    }

    #[test]
    fn source_list_keeps_document_order() {
        let node = json!({"source": ["#b/out", "a.out", "x"]});
        assert_eq!(
            extract_source(Some(&node)),
            Some(vec!["b".to_string(), "a".to_string(), "x".to_string()])
        );
    }

    #[test]
    fn source_absent_field_vs_absent_node() {
        assert_eq!(extract_source(Some(&json!({"type": "File"}))), Some(Vec::new()));
        assert_eq!(extract_source(None), None);
    }

    #[test]
    fn step_id_from_source_forms() {
        assert_eq!(step_id_from_source("#step1/out1"), "step1");
        assert_eq!(step_id_from_source("step1.out1"), "step1");
        assert_eq!(step_id_from_source("step1"), "step1");
        assert_eq!(step_id_from_source("#input_file"), "input_file");
    }

    #[test]
    fn slash_wins_over_dot() {
        assert_eq!(step_id_from_source("step.v2/out"), "step.v2");
    }

    #[test]
    fn source_ref_keeps_port() {
        assert_eq!(
            SourceRef::parse("#step1/out1"),
            SourceRef {
                step: "step1".to_string(),
                port: Some("out1".to_string())
            }
        );
        assert_eq!(SourceRef::parse("reads").port, None);
    }

    #[test]
    fn types_scalar_and_optional() {
        assert_eq!(extract_types(&json!("string")), Some("string".to_string()));
        assert_eq!(extract_types(&json!(["string", "null"])), Some("string (Optional)".to_string()));
        assert_eq!(extract_types(&json!(["null", "File", "Directory"])), Some("File, Directory (Optional)".to_string()));
    }

    #[test]
    fn types_array_object() {
        assert_eq!(extract_types(&json!({"type": "array", "items": "File"})), Some("File[]".to_string()));
        assert_eq!(
            extract_types(&json!(["null", {"type": "array", "items": "string"}])),
            Some("string[] (Optional)".to_string())
        );
        assert_eq!(
            extract_types(&json!({"type": "array", "items": {"type": "array", "items": "int"}})),
            Some("int[][]".to_string())
        );
    }

    #[test]
    fn types_verbose_non_array_entry() {
        assert_eq!(
            extract_types(&json!([{"type": "enum", "symbols": ["a", "b"]}, "string"])),
            Some("enum, string".to_string())
        );
    }

    #[test]
    fn types_unrenderable() {
        assert_eq!(extract_types(&json!({"type": "record", "fields": []})), None);
        assert_eq!(extract_types(&Value::Null), None);
    }
}
