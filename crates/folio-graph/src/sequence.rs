//! Topological sequencing: turn the deduplicated pending set into an ordered
//! list of [`GraphOp`]s.
//!
//! The walk is depth-first from the root. At every frontier all forks are
//! emitted first, each one fully, and only then does the frontier's own lane
//! continue. A renderer replaying the ops therefore finishes every nested
//! fork before it resumes the parent lane.
//!
//! Frames live on an explicit stack, one per open frontier. Every emission
//! takes an entry out of the pending set, so the walk ends after at most one
//! step per entry.

use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::link::LinkedEntry;
use crate::op::GraphOp;
use crate::pending::{Frontier, Pending};
use crate::types::CommitId;

/// Emit the graph ops for everything reachable from `root`.
///
/// `root` must already be out of `pending`. Returns the ops and whatever
/// could not be placed.
///
/// A candidate whose commit was already placed through another lane is never
/// emitted a second time; it stays pending so the caller can report it.
#[must_use]
pub fn sequence(mut pending: Pending, root: LinkedEntry) -> (Vec<GraphOp>, Pending) {
    let mut ops = Vec::with_capacity(pending.len() + 2);
    let mut placed: HashSet<CommitId> = HashSet::new();

    ops.push(GraphOp::OpenBranch {
        branch_name: root.branch_name.clone(),
        at_commit_id: None,
    });
    let mut stack = vec![Frontier::at(&root)];
    placed.insert(root.commit_id.clone());
    ops.push(root.into());

    while let Some(frontier) = stack.pop() {
        if let Some(slot) =
            pending.find(|e| frontier.is_forked_by(e) && !placed.contains(&e.commit_id))
        {
            let Some(fork) = pending.take(slot) else {
                continue;
            };
            trace!(
                branch = %fork.branch_name,
                at = %frontier.commit_id,
                "opening lane"
            );
            ops.push(GraphOp::OpenBranch {
                branch_name: fork.branch_name.clone(),
                at_commit_id: Some(frontier.commit_id.clone()),
            });
            let next = Frontier::at(&fork);
            placed.insert(fork.commit_id.clone());
            ops.push(fork.into());
            // Come back to this frontier for its remaining forks.
            stack.push(frontier);
            stack.push(next);
            continue;
        }

        if let Some(slot) =
            pending.find(|e| frontier.is_continued_by(e) && !placed.contains(&e.commit_id))
        {
            let Some(entry) = pending.take(slot) else {
                continue;
            };
            trace!(commit = %entry.commit_id, branch = %entry.branch_name, "appending");
            let next = Frontier::at(&entry);
            placed.insert(entry.commit_id.clone());
            ops.push(entry.into());
            stack.push(next);
        }
    }

    if pending.is_empty() {
        debug!(ops = ops.len(), commits = placed.len(), "sequenced history");
    } else {
        warn!(
            ops = ops.len(),
            unplaced = pending.len(),
            "history walk left entries unplaced"
        );
    }
    (ops, pending)
}
