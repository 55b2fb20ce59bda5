//! folio library crate: snapshot loading, configuration, and rendering
//! around the `folio-graph` pipeline.
//!
//! The primary interface is the `folio` binary. This lib.rs exposes the
//! modules it is built from so integration tests and benchmarks can drive
//! them without going through the CLI.

pub mod config;
pub mod format;
pub mod render;
pub mod snapshot;
pub mod telemetry;

pub use folio_graph;

use anyhow::{Context as _, Result};
use folio_graph::{BranchName, GraphBuild, HistoryGraph, replay};

use crate::render::LaneRenderer;
use crate::snapshot::WorkspaceSnapshot;

/// Build the op sequence for a snapshot relative to `base_branch`.
///
/// # Errors
/// Returns the pipeline's [`folio_graph::GraphError`] with the workspace
/// name attached.
pub fn build_snapshot(snapshot: &WorkspaceSnapshot, base_branch: &BranchName) -> Result<GraphBuild> {
    let logs = snapshot.to_branch_logs();
    HistoryGraph::new(base_branch.clone())
        .build(&logs)
        .with_context(|| format!("cannot render history for workspace '{}'", snapshot.name()))
}

/// Replay a built graph into `renderer`.
///
/// # Errors
/// Returns an error if the renderer rejects an op.
pub fn draw(build: &GraphBuild, renderer: &mut LaneRenderer<'_>) -> Result<()> {
    replay(&build.ops, renderer).context("graph ops could not be drawn")
}
