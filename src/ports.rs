//! Port normalization
//!
//! Two port dialects exist:
//! - `inputs`/`outputs` (workflows, draft-2/3 steps): full port records, as a
//!   list with explicit `id`s or as a map keyed by id, with `id: type` shorthand
//! - `in`/`out` (v1.0 steps): source bindings, as a list of records/ids or as a
//!   map whose values are a record, a list of sources or a single source
//!
//! The workflow-style field is checked first.

use serde_json::Value;

use crate::extract::{
    extract_default, extract_doc, extract_id, extract_label, extract_source, extract_types,
    normalize_id, step_id_from_source,
};
use crate::model::{Port, PortMap};
use crate::node::{field, scalar_text, NodeShape};

const TYPE: &str = "type";

/// Which side of a workflow or step to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Inputs,
    Outputs,
}

impl PortDirection {
    /// Field name used by workflows and pre-1.0 steps
    pub fn workflow_field(self) -> &'static str {
        match self {
            PortDirection::Inputs => "inputs",
            PortDirection::Outputs => "outputs",
        }
    }

    /// Field name used by v1.0 steps
    pub fn step_field(self) -> &'static str {
        match self {
            PortDirection::Inputs => "in",
            PortDirection::Outputs => "out",
        }
    }
}

/// Ports on one side of `node`, or `None` when neither dialect's field exists
pub fn get_ports(node: &Value, direction: PortDirection) -> Option<PortMap> {
    if let Some(ports) = field(node, direction.workflow_field()) {
        return Some(workflow_ports(ports));
    }
    field(node, direction.step_field()).map(step_ports)
}

/// Normalize an `inputs`/`outputs` node
pub fn workflow_ports(ports: &Value) -> PortMap {
    match NodeShape::of(ports) {
        NodeShape::List(items) => items
            .iter()
            .filter_map(|item| extract_id(item).map(|id| (id, port_details(item))))
            .collect(),
        NodeShape::Map(map) => map
            .iter()
            .filter(|(id, _)| !id.is_empty())
            .map(|(id, value)| (id.clone(), port_details(value)))
            .collect(),
        NodeShape::Scalar(_) => PortMap::new(),
    }
}

/// Normalize an `in`/`out` node
pub fn step_ports(ports: &Value) -> PortMap {
    let mut result = PortMap::new();

    match NodeShape::of(ports) {
        NodeShape::List(items) => {
            for item in items {
                match NodeShape::of(item) {
                    NodeShape::Map(_) => {
                        if let Some(id) = extract_id(item) {
                            result.insert(id, bound_port(item));
                        }
                    }
                    // `out: [reads, report]`
                    NodeShape::Scalar(value) => {
                        if let Some(id) = scalar_text(value).and_then(|text| normalize_id(&text)) {
                            result.insert(id, Port::default());
                        }
                    }
                    NodeShape::List(_) => {}
                }
            }
        }
        NodeShape::Map(map) => {
            for (id, value) in map.iter().filter(|(id, _)| !id.is_empty()) {
                let port = match NodeShape::of(value) {
                    NodeShape::Map(_) => bound_port(value),
                    NodeShape::List(sources) => Port {
                        source_ids: sources
                            .iter()
                            .filter_map(scalar_text)
                            .map(|text| step_id_from_source(&text))
                            .collect(),
                        ..Port::default()
                    },
                    NodeShape::Scalar(source) => Port {
                        source_ids: scalar_text(source)
                            .map(|text| vec![step_id_from_source(&text)])
                            .unwrap_or_default(),
                        ..Port::default()
                    },
                };
                result.insert(id.clone(), port);
            }
        }
        NodeShape::Scalar(_) => {}
    }

    result
}

/// Full port record from a workflow-style entry
fn port_details(value: &Value) -> Port {
    match NodeShape::of(value) {
        NodeShape::Map(_) => Port {
            label: extract_label(value),
            doc: extract_doc(value),
            port_type: field(value, TYPE).and_then(extract_types),
            default_value: extract_default(value),
            source_ids: extract_source(Some(value)).unwrap_or_default(),
        },
        // `id: [string, "null"]`
        NodeShape::List(_) => Port {
            port_type: extract_types(value),
            ..Port::default()
        },
        // `id: type`
        NodeShape::Scalar(value) => scalar_text(value).map(Port::typed).unwrap_or_default(),
    }
}

/// Step port record: its sources when bound, otherwise its default
fn bound_port(value: &Value) -> Port {
    let sources = extract_source(Some(value)).unwrap_or_default();
    if sources.is_empty() {
        Port {
            default_value: extract_default(value),
            ..Port::default()
        }
    } else {
        Port {
            source_ids: sources,
            ..Port::default()
        }
    }
}
