//! Document collection and workflow resolution
//!
//! A [`Collection`] holds every parsed document of a repository directory
//! tree, with `$graph` bundles split into their member documents. The entry
//! workflow is selected lazily and the [`Workflow`] model is assembled on
//! demand from its raw tree.

use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::ViewerConfig;
use crate::entry::EntryStrategy;
use crate::error::Result;
use crate::extract::{extract_doc, extract_id, extract_label};
use crate::location::RepoLocation;
use crate::model::Workflow;
use crate::node::{field, parse_tree, NodeShape, RawNode};
use crate::ports::{get_ports, PortDirection};
use crate::retrieval::{EntryKind, Repository};
use crate::steps::get_steps;

const DOC_GRAPH: &str = "$graph";

#[derive(Debug, Default)]
pub struct Collection {
    /// Document id -> raw tree, in discovery order
    docs: IndexMap<String, RawNode>,
    strategy: EntryStrategy,
    /// Selected entry document id, computed on first query
    entry: OnceCell<Option<String>>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(strategy: EntryStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Ingest every workflow file below `location` with default settings
    pub fn from_repository<R>(repo: &R, location: &RepoLocation, revision: &str) -> Result<Self>
    where
        R: Repository + ?Sized,
    {
        Self::from_repository_with(repo, location, revision, &ViewerConfig::default())
    }

    /// Ingest every file with the configured extension below `location`.
    ///
    /// Subdirectories are walked recursively. Any retrieval or parse failure
    /// aborts the whole build.
    #[instrument(skip_all, fields(location = %location, revision = %revision))]
    pub fn from_repository_with<R>(
        repo: &R,
        location: &RepoLocation,
        revision: &str,
        config: &ViewerConfig,
    ) -> Result<Self>
    where
        R: Repository + ?Sized,
    {
        let mut collection = Self::with_strategy(config.entry_strategy);
        collection.add_docs(repo, location, revision, &config.extension)?;
        info!(documents = collection.len(), "collection built");
        Ok(collection)
    }

    fn add_docs<R>(&mut self, repo: &R, location: &RepoLocation, revision: &str, extension: &str) -> Result<()>
    where
        R: Repository + ?Sized,
    {
        for entry in repo.list_directory(location)? {
            match entry.kind {
                EntryKind::Directory => {
                    self.add_docs(repo, &location.with_path(entry.path.as_str()), revision, extension)?;
                }
                EntryKind::File => {
                    if entry.extension() != Some(extension) {
                        continue;
                    }
                    debug!(path = %entry.path, "reading workflow file");
                    let content = repo.read_file(&location.with_path(entry.path.as_str()), revision)?;
                    let doc = parse_tree(&content, &entry.name)?;
                    self.add_document(doc, &entry.name);
                }
            }
        }
        Ok(())
    }

    /// Register one parsed document.
    ///
    /// A `$graph` bundle contributes each member under its own id; members
    /// without an id are dropped with a warning. Any other document is keyed
    /// by `file_name`. Later documents replace earlier ones with the same id.
    pub fn add_document(&mut self, doc: RawNode, file_name: &str) {
        self.entry = OnceCell::new();

        let members: Option<Vec<RawNode>> = field(&doc, DOC_GRAPH).map(|graph| match NodeShape::of(graph) {
            NodeShape::List(items) => items.to_vec(),
            NodeShape::Map(map) => map.values().cloned().collect(),
            NodeShape::Scalar(_) => Vec::new(),
        });
        let Some(members) = members else {
            self.insert(file_name.to_string(), doc);
            return;
        };

        for member in members {
            match extract_id(&member) {
                Some(id) => self.insert(id, member),
                None => warn!(file = file_name, "dropping $graph entry without an id"),
            }
        }
    }

    fn insert(&mut self, id: String, doc: RawNode) {
        debug!(id = %id, "registering document");
        if self.docs.insert(id.clone(), doc).is_some() {
            warn!(id = %id, "document id registered twice, keeping the later one");
        }
    }

    /// Id of the entry workflow, selected once per collection state
    pub fn find_entry_workflow(&self) -> Option<&str> {
        self.entry
            .get_or_init(|| {
                let selected = self.strategy.select(&self.docs);
                match &selected {
                    Some(id) => info!(entry = %id, strategy = %self.strategy, "entry workflow selected"),
                    None => debug!("no workflow document in collection"),
                }
                selected
            })
            .as_deref()
    }

    /// Assemble the entry workflow, or `None` when the collection has none
    pub fn get_workflow(&self) -> Option<Workflow> {
        let id = self.find_entry_workflow()?;
        let doc = self.docs.get(id)?;

        Some(Workflow {
            label: extract_label(doc).unwrap_or_else(|| id.to_string()),
            doc: extract_doc(doc),
            inputs: get_ports(doc, PortDirection::Inputs),
            outputs: get_ports(doc, PortDirection::Outputs),
            steps: get_steps(doc),
        })
    }

    pub fn strategy(&self) -> EntryStrategy {
        self.strategy
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Document ids in discovery order
    pub fn document_ids(&self) -> impl Iterator<Item = &str> {
        self.docs.keys().map(String::as_str)
    }

    pub fn document(&self, id: &str) -> Option<&Value> {
        self.docs.get(id)
    }
}
