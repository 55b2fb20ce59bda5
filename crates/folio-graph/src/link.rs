//! Dependency linking: derive each entry's parent from its own branch log.
//!
//! Linking is purely local. The oldest entry of every branch gets no parent,
//! even when its real parent lives in another branch's log; the deduplicator
//! sorts that out.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::log::{BranchLogs, LogEntry};
use crate::types::{BranchName, CommitId};

/// A log entry with its inferred in-branch parent.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkedEntry {
    /// The branch whose log listed this commit.
    pub branch_name: BranchName,
    /// The commit identifier.
    pub commit_id: CommitId,
    /// The full commit message.
    pub message: String,
    /// The next-older commit in the same branch log, or `None` for the
    /// oldest entry of that log.
    pub parent_commit_id: Option<CommitId>,
}

impl LinkedEntry {
    /// Returns `true` if this entry is the oldest one known in its branch.
    #[must_use]
    pub const fn is_branch_root(&self) -> bool {
        self.parent_commit_id.is_none()
    }

    /// Returns `true` if this entry's inferred parent is `commit_id`.
    #[must_use]
    pub fn has_parent(&self, commit_id: &CommitId) -> bool {
        self.parent_commit_id.as_ref() == Some(commit_id)
    }
}

/// Link every branch log, concatenating results in input order.
#[must_use]
pub fn link(logs: &BranchLogs) -> Vec<LinkedEntry> {
    let mut linked = Vec::with_capacity(logs.entry_count());
    for log in logs {
        link_branch(log.entries(), &mut linked);
    }
    debug!(
        branches = logs.len(),
        entries = linked.len(),
        "linked branch logs"
    );
    linked
}

fn link_branch(entries: &[LogEntry], out: &mut Vec<LinkedEntry>) {
    for (i, entry) in entries.iter().enumerate() {
        out.push(LinkedEntry {
            branch_name: entry.branch_name.clone(),
            commit_id: entry.commit_id.clone(),
            message: entry.message.clone(),
            parent_commit_id: entries.get(i + 1).map(|older| older.commit_id.clone()),
        });
    }
}
