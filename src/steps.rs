//! Step normalization

use serde_json::Value;

use crate::extract::{extract_doc, extract_id, extract_label, extract_types};
use crate::model::{Step, StepMap};
use crate::node::{field, NodeShape};
use crate::ports::{get_ports, PortDirection};

const STEPS: &str = "steps";

/// Steps of a document, or `None` when it has no `steps` field.
///
/// Accepts a list of step records with explicit ids or a map keyed by id.
pub fn get_steps(doc: &Value) -> Option<StepMap> {
    let steps = field(doc, STEPS)?;

    let normalized = match NodeShape::of(steps) {
        NodeShape::List(items) => items
            .iter()
            .filter_map(|step| extract_id(step).map(|id| (id, step_details(step))))
            .collect(),
        NodeShape::Map(map) => map
            .iter()
            .filter(|(id, _)| !id.is_empty())
            .map(|(id, step)| (id.clone(), step_details(step)))
            .collect(),
        NodeShape::Scalar(_) => StepMap::new(),
    };
    Some(normalized)
}

fn step_details(step: &Value) -> Step {
    Step {
        label: extract_label(step),
        doc: extract_doc(step),
        types: extract_types(step),
        inputs: get_ports(step, PortDirection::Inputs),
        outputs: get_ports(step, PortDirection::Outputs),
    }
}
