//! Entry workflow selection
//!
//! A collection may hold several `class: Workflow` documents (a top-level
//! workflow plus sub-workflows it runs). [`EntryStrategy`] decides which one
//! is presented to the caller.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CwlError;
use crate::node::{field, field_text, NodeShape};

const CLASS: &str = "class";
const WORKFLOW: &str = "Workflow";
const STEPS: &str = "steps";
const RUN: &str = "run";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStrategy {
    /// First workflow document in discovery order
    #[default]
    First,
    /// First workflow document no step `run:` field points at, falling back
    /// to [`EntryStrategy::First`] when every workflow is referenced
    Root,
}

impl EntryStrategy {
    /// Id of the selected document, if any document is a workflow
    pub fn select(self, docs: &IndexMap<String, Value>) -> Option<String> {
        let mut workflows = docs.iter().filter(|(_, doc)| is_workflow(doc)).map(|(id, _)| id);

        match self {
            EntryStrategy::First => workflows.next().cloned(),
            EntryStrategy::Root => {
                let referenced = run_targets(docs);
                let candidates: Vec<&String> = workflows.collect();
                candidates
                    .iter()
                    .find(|id| !referenced.contains(id.as_str()))
                    .or_else(|| candidates.first())
                    .map(|id| (*id).clone())
            }
        }
    }
}

impl fmt::Display for EntryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStrategy::First => write!(f, "first"),
            EntryStrategy::Root => write!(f, "root"),
        }
    }
}

impl FromStr for EntryStrategy {
    type Err = CwlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(EntryStrategy::First),
            "root" => Ok(EntryStrategy::Root),
            other => Err(CwlError::Config {
                reason: format!("unknown entry strategy '{}' (expected 'first' or 'root')", other),
            }),
        }
    }
}

pub fn is_workflow(doc: &Value) -> bool {
    field_text(doc, CLASS).as_deref() == Some(WORKFLOW)
}

/// Document ids referenced by any step's `run:` field
fn run_targets(docs: &IndexMap<String, Value>) -> HashSet<String> {
    let mut targets = HashSet::new();
    for doc in docs.values() {
        let Some(steps) = field(doc, STEPS) else {
            continue;
        };
        let runs: Vec<&Value> = match NodeShape::of(steps) {
            NodeShape::List(items) => items.iter().filter_map(|step| field(step, RUN)).collect(),
            NodeShape::Map(map) => map.values().filter_map(|step| field(step, RUN)).collect(),
            NodeShape::Scalar(_) => Vec::new(),
        };
        targets.extend(runs.into_iter().filter_map(Value::as_str).map(run_target_id));
    }
    targets
}

/// Document id a `run:` reference resolves to.
///
/// `#main` and `packed.cwl#main` name a bundled document; `tools/sort.cwl`
/// names a file, which collections key by file name.
fn run_target_id(run: &str) -> String {
    let target = match run.rsplit_once('#') {
        Some((_, fragment)) => fragment,
        None => run.rsplit('/').next().unwrap_or(run),
    };
    target.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn docs(entries: Vec<(&str, Value)>) -> IndexMap<String, Value> {
        entries.into_iter().map(|(id, doc)| (id.to_string(), doc)).collect()
    }

    #[test]
    fn first_takes_insertion_order() {
        let docs = docs(vec![
            ("tool.cwl", json!({"class": "CommandLineTool"})),
            ("zeta.cwl", json!({"class": "Workflow"})),
            ("alpha.cwl", json!({"class": "Workflow"})),
        ]);
        assert_eq!(EntryStrategy::First.select(&docs).as_deref(), Some("zeta.cwl"));
    }

    #[test]
    fn no_workflow_selects_nothing() {
        let docs = docs(vec![
            ("tool.cwl", json!({"class": "CommandLineTool"})),
            ("untyped.cwl", json!({"inputs": []})),
            ("scalar.cwl", json!("just text")),
        ]);
        assert_eq!(EntryStrategy::First.select(&docs), None);
        assert_eq!(EntryStrategy::Root.select(&docs), None);
    }

    #[test]
    fn root_skips_referenced_workflows() {
        let docs = docs(vec![
            ("sub", json!({"class": "Workflow", "steps": []})),
            ("main", json!({"class": "Workflow", "steps": {"inner": {"run": "#sub"}}})),
        ]);
        assert_eq!(EntryStrategy::First.select(&docs).as_deref(), Some("sub"));
        assert_eq!(EntryStrategy::Root.select(&docs).as_deref(), Some("main"));
    }

    #[test]
    fn root_resolves_file_references() {
        let docs = docs(vec![
            ("qc.cwl", json!({"class": "Workflow"})),
            ("pipeline.cwl", json!({"class": "Workflow", "steps": [{"id": "qc", "run": "subworkflows/qc.cwl"}]})),
        ]);
        assert_eq!(EntryStrategy::Root.select(&docs).as_deref(), Some("pipeline.cwl"));
    }

    #[test]
    fn root_falls_back_when_all_referenced() {
        let docs = docs(vec![
            ("a", json!({"class": "Workflow", "steps": {"s": {"run": "#b"}}})),
            ("b", json!({"class": "Workflow", "steps": {"s": {"run": "#a"}}})),
        ]);
        assert_eq!(EntryStrategy::Root.select(&docs).as_deref(), Some("a"));
    }

    #[test]
    fn run_targets_normalize() {
        assert_eq!(run_target_id("#main"), "main");
        assert_eq!(run_target_id("packed.cwl#main"), "main");
        assert_eq!(run_target_id("../tools/sort.cwl"), "sort.cwl");
        assert_eq!(run_target_id("sort.cwl"), "sort.cwl");
    }

    #[test]
    fn parses_strategy_names() {
        assert_eq!("first".parse::<EntryStrategy>().unwrap(), EntryStrategy::First);
        assert_eq!(" ROOT ".parse::<EntryStrategy>().unwrap(), EntryStrategy::Root);
        assert!("deepest".parse::<EntryStrategy>().is_err());
        assert_eq!(EntryStrategy::Root.to_string(), "root");
    }
}
