//! Normalized workflow model
//!
//! Value objects produced by the normalizers. Maps keep document order so
//! renderers list ports and steps the way the author wrote them.

use indexmap::IndexMap;
use serde::Serialize;

/// Port id -> port
pub type PortMap = IndexMap<String, Port>;

/// Step id -> step
pub type StepMap = IndexMap<String, Step>;

/// Input or output slot on a workflow or step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Port {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub port_type: Option<String>,
    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Steps (or workflow inputs) feeding this port, in document order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_ids: Vec<String>,
}

impl Port {
    /// Port declared with the `id: type` shorthand
    pub fn typed(port_type: impl Into<String>) -> Self {
        Self {
            port_type: Some(port_type.into()),
            ..Self::default()
        }
    }

    pub fn add_source_id(&mut self, source_id: impl Into<String>) {
        self.source_ids.push(source_id.into());
    }
}

/// One invocation of a tool or sub-workflow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Step {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<PortMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<PortMap>,
}

/// The entry workflow of a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workflow {
    /// Declared label, or the entry document id
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<PortMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<PortMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<StepMap>,
}

impl Workflow {
    pub fn input_count(&self) -> usize {
        self.inputs.as_ref().map_or(0, IndexMap::len)
    }

    pub fn output_count(&self) -> usize {
        self.outputs.as_ref().map_or(0, IndexMap::len)
    }

    pub fn step_count(&self) -> usize {
        self.steps.as_ref().map_or(0, IndexMap::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_port_has_only_type() {
        let port = Port::typed("File");
        assert_eq!(port.port_type.as_deref(), Some("File"));
        assert!(port.label.is_none());
        assert!(port.default_value.is_none());
        assert!(port.source_ids.is_empty());
    }

    #[test]
    fn port_json_skips_absent_fields() {
        let mut port = Port::typed("File");
        port.add_source_id("step1");
        let json = serde_json::to_value(&port).unwrap();
        assert_eq!(json, serde_json::json!({"type": "File", "source_ids": ["step1"]}));
    }

    #[test]
    fn counts_treat_absent_maps_as_empty() {
        let workflow = Workflow {
            label: "wf".to_string(),
            doc: None,
            inputs: Some(PortMap::from([("x".to_string(), Port::typed("File"))])),
            outputs: None,
            steps: None,
        };
        assert_eq!(workflow.input_count(), 1);
        assert_eq!(workflow.output_count(), 0);
        assert_eq!(workflow.step_count(), 0);
    }
}
