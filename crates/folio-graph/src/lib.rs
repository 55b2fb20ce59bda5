//! Commit-history graph reconstruction for folio workspaces.
//!
//! The backend reports history as one newest-first log per branch. This crate
//! turns those flat logs into an ordered list of graph construction ops that
//! a renderer can replay to draw one lane per branch, joined at fork points,
//! with every commit drawn exactly once.
//!
//! Pipeline:
//!
//! 1. [`link`](link::link) infers each entry's parent from its own branch log.
//! 2. [`dedupe`](dedup::dedupe) drops the copies of shared history that other
//!    branches carry.
//! 3. [`sequence`](sequence::sequence) walks depth-first from the root and
//!    emits [`GraphOp`]s, forks before the parent lane continues.
//!
//! [`build_graph_operations`] and [`HistoryGraph`] run the whole pipeline.
//! Ops are consumed through [`GraphSink`] and [`replay`].

pub mod dedup;
pub mod error;
pub mod graph;
pub mod link;
pub mod log;
pub mod op;
pub mod pending;
pub mod sequence;
pub mod sink;
pub mod types;

pub use error::GraphError;
pub use graph::{GraphBuild, GraphStats, HistoryGraph, build_graph_operations};
pub use link::LinkedEntry;
pub use log::{BranchLog, BranchLogs, LogEntry, subject_line};
pub use op::GraphOp;
pub use sink::{CommitNode, GraphSink, replay};
pub use types::{BranchName, CommitId, ValidationError};
