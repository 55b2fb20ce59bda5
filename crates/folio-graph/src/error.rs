//! Error types for history graph reconstruction.
//!
//! [`GraphError`] is returned by every build entry point. It never carries a
//! partial graph: callers either get the complete op sequence or one of these.

use thiserror::Error;

use crate::types::{BranchName, CommitId};

/// Why a history graph could not be built.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphError {
    /// No entry of the base branch lacks a parent. The branch is missing, its
    /// log is empty, or the input is malformed.
    #[error("no root commit found on base branch `{branch}`")]
    NoRootFound {
        /// The configured base branch.
        branch: BranchName,
    },

    /// More than one parent-less entry on the base branch, which means the
    /// base branch was listed more than once.
    #[error(
        "ambiguous root on base branch `{branch}`: {} candidates ({})",
        .candidates.len(),
        join_ids(.candidates)
    )]
    AmbiguousRoot {
        /// The configured base branch.
        branch: BranchName,
        /// Commit ids of every candidate root, in input order.
        candidates: Vec<CommitId>,
    },

    /// Entries that could not be reached from the root, e.g. a branch whose
    /// oldest commit does not exist in any other log.
    #[error(
        "{} commit(s) unreachable from the root: {}",
        .commits.len(),
        join_ids(.commits)
    )]
    OrphanedCommits {
        /// Distinct commit ids left unplaced, in input order.
        commits: Vec<CommitId>,
    },
}

fn join_ids(ids: &[CommitId]) -> String {
    ids.iter()
        .map(CommitId::short)
        .collect::<Vec<_>>()
        .join(", ")
}
