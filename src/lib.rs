//! cwlview - normalizes CWL workflow documents into one graph model
//!
//! Repositories mix several generations of the Common Workflow Language
//! (draft-2, draft-3, v1.0) and packed `$graph` bundles. This crate loads
//! every workflow file of a directory tree into a [`Collection`], picks the
//! entry workflow and turns it into a single [`Workflow`] value with steps,
//! ports, types, defaults and step-level source links.
//!
//! ```rust
//! use cwlview::{Collection, MemoryRepository, RepoLocation};
//!
//! let repo = MemoryRepository::new().with_file(
//!     "main.cwl",
//!     "class: Workflow\ninputs:\n  x: File\nsteps:\n  s1:\n    in: {a: x}\n    out: [o]\n",
//! );
//! let collection = Collection::from_repository(&repo, &RepoLocation::local(""), "HEAD")?;
//! let workflow = collection.get_workflow().expect("main.cwl is a workflow");
//! assert_eq!(workflow.label, "main.cwl");
//! assert_eq!(workflow.step_count(), 1);
//! # Ok::<(), cwlview::CwlError>(())
//! ```

pub mod collection;
pub mod config;
pub mod entry;
pub mod error;
pub mod extract;
pub mod location;
pub mod model;
pub mod node;
pub mod ports;
pub mod retrieval;
pub mod steps;

pub use collection::Collection;
pub use config::ViewerConfig;
pub use entry::EntryStrategy;
pub use error::{CwlError, FixSuggestion, Result};
pub use extract::SourceRef;
pub use location::RepoLocation;
pub use model::{Port, PortMap, Step, StepMap, Workflow};
pub use node::RawNode;
pub use retrieval::{EntryKind, LocalRepository, MemoryRepository, RepoEntry, Repository};
