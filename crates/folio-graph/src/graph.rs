//! The full pipeline: link, locate the root, deduplicate, sequence, and
//! check that nothing was left behind.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info_span, warn};

use crate::dedup::dedupe;
use crate::error::GraphError;
use crate::link::link;
use crate::log::BranchLogs;
use crate::op::GraphOp;
use crate::pending::Pending;
use crate::sequence::sequence;
use crate::types::{BranchName, CommitId};

/// Counters describing one build, for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    /// Branch logs in the input, duplicates included.
    pub branches: usize,
    /// Entries produced by the linker.
    pub linked_entries: usize,
    /// Entries discarded as inherited copies of shared history.
    pub duplicates_dropped: usize,
    /// `OpenBranch` ops emitted.
    pub lanes_opened: usize,
    /// `AppendCommit` ops emitted.
    pub commits_placed: usize,
}

/// A successfully built history graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphBuild {
    /// The op sequence, ready to replay into a sink.
    pub ops: Vec<GraphOp>,
    /// Build counters.
    pub stats: GraphStats,
}

/// Builds graph op sequences relative to a base branch.
///
/// ```
/// use folio_graph::{BranchLog, BranchLogs, BranchName, CommitId, HistoryGraph};
///
/// let master = BranchName::new("master").unwrap();
/// let logs: BranchLogs = [BranchLog::with_commits(
///     master.clone(),
///     [(CommitId::new("c2").unwrap(), "edit"), (CommitId::new("c1").unwrap(), "init")],
/// )]
/// .into_iter()
/// .collect();
///
/// let build = HistoryGraph::new(master).build(&logs).unwrap();
/// assert_eq!(build.stats.commits_placed, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryGraph {
    base_branch: BranchName,
}

impl HistoryGraph {
    /// A builder rooted at `base_branch`.
    #[must_use]
    pub const fn new(base_branch: BranchName) -> Self {
        Self { base_branch }
    }

    /// The base (trunk) branch.
    #[must_use]
    pub const fn base_branch(&self) -> &BranchName {
        &self.base_branch
    }

    /// Reconstruct the graph for `logs`.
    ///
    /// # Errors
    /// - [`GraphError::NoRootFound`] if the base branch has no parent-less
    ///   entry (missing or empty).
    /// - [`GraphError::AmbiguousRoot`] if it has several.
    /// - [`GraphError::OrphanedCommits`] if entries remain unreachable.
    pub fn build(&self, logs: &BranchLogs) -> Result<GraphBuild, GraphError> {
        let span = info_span!("build_graph", base = %self.base_branch);
        let _enter = span.enter();

        let base = &self.base_branch;
        let linked = link(logs);
        let mut stats = GraphStats {
            branches: logs.len(),
            linked_entries: linked.len(),
            ..GraphStats::default()
        };

        let mut pending = Pending::new(linked);
        let roots = pending.find_all(|e| &e.branch_name == base && e.is_branch_root());
        let root_slot = match roots.as_slice() {
            [] => {
                return Err(GraphError::NoRootFound {
                    branch: base.clone(),
                });
            }
            [slot] => *slot,
            slots => {
                let candidates = slots
                    .iter()
                    .filter_map(|slot| pending.get(*slot))
                    .map(|e| e.commit_id.clone())
                    .collect();
                return Err(GraphError::AmbiguousRoot {
                    branch: base.clone(),
                    candidates,
                });
            }
        };

        let Some(root) = pending.take(root_slot) else {
            return Err(GraphError::NoRootFound {
                branch: base.clone(),
            });
        };
        let mut dropped = dedupe(&mut pending, &root);
        dropped.extend(
            pending.remove_where(|e| &e.branch_name != base && e.commit_id == root.commit_id),
        );
        stats.duplicates_dropped = dropped.len();

        let (ops, leftover) = sequence(pending, root);
        if !leftover.is_empty() {
            let commits = distinct_commits(
                leftover
                    .into_remaining()
                    .into_iter()
                    .map(|e| e.commit_id),
            );
            warn!(count = commits.len(), "orphaned commits in history");
            return Err(GraphError::OrphanedCommits { commits });
        }

        stats.lanes_opened = ops.iter().filter(|op| !op.is_append()).count();
        stats.commits_placed = ops.len() - stats.lanes_opened;
        debug!(?stats, "history graph built");
        Ok(GraphBuild { ops, stats })
    }
}

fn distinct_commits(ids: impl IntoIterator<Item = CommitId>) -> Vec<CommitId> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

/// Reconstruct the graph for `logs` rooted at `base_branch` and return the
/// op sequence.
///
/// # Errors
/// See [`HistoryGraph::build`].
pub fn build_graph_operations(
    logs: &BranchLogs,
    base_branch: &BranchName,
) -> Result<Vec<GraphOp>, GraphError> {
    HistoryGraph::new(base_branch.clone())
        .build(logs)
        .map(|build| build.ops)
}
