//! Graph construction operations: the output contract of the pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::link::LinkedEntry;
use crate::log::subject_line;
use crate::types::{BranchName, CommitId};

/// One step of graph construction.
///
/// Replaying a sequence of ops in order builds the complete history picture:
/// every `AppendCommit` names a parent that was appended earlier (or none for
/// the root), and every `OpenBranch` forks from a commit that was appended
/// earlier (or from nothing for the base branch).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum GraphOp {
    /// Start a new lane for `branch_name`.
    OpenBranch {
        /// The branch the lane belongs to.
        branch_name: BranchName,
        /// The commit the lane forks from; `None` for the base branch.
        at_commit_id: Option<CommitId>,
    },
    /// Append a commit node to the end of `branch_name`'s lane.
    AppendCommit {
        /// The lane to append to.
        branch_name: BranchName,
        /// The commit being placed.
        commit_id: CommitId,
        /// The full commit message; [`Display`](fmt::Display) shows only
        /// its subject line.
        message: String,
        /// The commit this node connects back to.
        parent_commit_id: Option<CommitId>,
    },
}

impl GraphOp {
    /// The branch the op applies to.
    #[must_use]
    pub const fn branch_name(&self) -> &BranchName {
        match self {
            Self::OpenBranch { branch_name, .. } | Self::AppendCommit { branch_name, .. } => {
                branch_name
            }
        }
    }

    /// The placed commit, for `AppendCommit`.
    #[must_use]
    pub const fn commit_id(&self) -> Option<&CommitId> {
        match self {
            Self::AppendCommit { commit_id, .. } => Some(commit_id),
            Self::OpenBranch { .. } => None,
        }
    }

    /// Returns `true` for `AppendCommit`.
    #[must_use]
    pub const fn is_append(&self) -> bool {
        matches!(self, Self::AppendCommit { .. })
    }
}

impl From<LinkedEntry> for GraphOp {
    fn from(entry: LinkedEntry) -> Self {
        Self::AppendCommit {
            branch_name: entry.branch_name,
            commit_id: entry.commit_id,
            message: entry.message,
            parent_commit_id: entry.parent_commit_id,
        }
    }
}

impl fmt::Display for GraphOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenBranch {
                branch_name,
                at_commit_id: None,
            } => write!(f, "open {branch_name}"),
            Self::OpenBranch {
                branch_name,
                at_commit_id: Some(at),
            } => write!(f, "open {branch_name} at {}", at.short()),
            Self::AppendCommit {
                branch_name,
                commit_id,
                message,
                ..
            } => write!(
                f,
                "append {} on {branch_name}: {}",
                commit_id.short(),
                subject_line(message)
            ),
        }
    }
}
