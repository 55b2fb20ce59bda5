//! Cross-branch deduplication of shared history.
//!
//! A branch log lists every commit reachable from its tip, so anything at or
//! before a fork point shows up in several logs. Starting from the root, this
//! walk follows each lane and each fork and drops the copies other branches
//! carry of commits it has already attributed to a lane:
//!
//! - **continuation**: the frontier's own branch continues with commit `X`;
//!   every other branch's copy of `X` is inherited history and goes.
//! - **fork**: another branch `B` continues from the frontier commit with
//!   commit `Y`; copies of `Y` in branches other than the frontier's and
//!   `B` are redundant (they forked from `B` later) and go.
//!
//! Per frontier the continuation is resolved before the forks. The walk uses
//! an explicit task stack and visits each slot at most once, so it terminates
//! on any input, including logs that list a commit twice.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::link::LinkedEntry;
use crate::pending::{Frontier, Pending, SlotId};
use crate::types::BranchName;

enum Task {
    /// Expand an entry into its continuation and forks.
    Visit(SlotId),
    /// Resolve the same-branch continuation of a frontier.
    Continue(Frontier),
    /// Enumerate the forks of a frontier.
    Forks(Frontier),
    /// Resolve one fork candidate found under `parent_branch`.
    Fork {
        parent_branch: BranchName,
        slot: SlotId,
    },
}

/// Remove redundant shared-history entries reachable from `root`.
///
/// `root` must already be out of `pending`. Returns the dropped entries in
/// the order they were removed.
pub fn dedupe(pending: &mut Pending, root: &LinkedEntry) -> Vec<LinkedEntry> {
    let mut dropped = Vec::new();
    let mut visited = HashSet::new();
    let frontier = Frontier::at(root);
    let mut tasks = vec![Task::Forks(frontier.clone()), Task::Continue(frontier)];

    while let Some(task) = tasks.pop() {
        match task {
            Task::Visit(slot) => {
                if !visited.insert(slot) {
                    continue;
                }
                let Some(entry) = pending.get(slot) else {
                    continue;
                };
                let frontier = Frontier::at(entry);
                // Stack order: the continuation is resolved first.
                tasks.push(Task::Forks(frontier.clone()));
                tasks.push(Task::Continue(frontier));
            }
            Task::Continue(frontier) => {
                let Some(next) = pending.find(|e| frontier.is_continued_by(e)) else {
                    continue;
                };
                let Some(commit_id) = pending.get(next).map(|e| e.commit_id.clone()) else {
                    continue;
                };
                let removed = pending.remove_where(|e| {
                    e.branch_name != frontier.branch_name && e.commit_id == commit_id
                });
                record(&mut dropped, removed, &frontier.branch_name);
                tasks.push(Task::Visit(next));
            }
            Task::Forks(frontier) => {
                let forks = pending.find_all(|e| frontier.is_forked_by(e));
                for slot in forks.into_iter().rev() {
                    tasks.push(Task::Fork {
                        parent_branch: frontier.branch_name.clone(),
                        slot,
                    });
                }
            }
            Task::Fork {
                parent_branch,
                slot,
            } => {
                // An earlier fork of the same commit may already have
                // claimed this one as a duplicate.
                let Some(fork) = pending.get(slot).map(Frontier::at) else {
                    continue;
                };
                let removed = pending.remove_where(|e| {
                    e.branch_name != parent_branch
                        && e.branch_name != fork.branch_name
                        && e.commit_id == fork.commit_id
                });
                record(&mut dropped, removed, &fork.branch_name);
                tasks.push(Task::Visit(slot));
            }
        }
    }

    debug!(
        dropped = dropped.len(),
        remaining = pending.len(),
        "deduplicated shared history"
    );
    dropped
}

fn record(dropped: &mut Vec<LinkedEntry>, removed: Vec<LinkedEntry>, owner: &BranchName) {
    for entry in &removed {
        trace!(
            commit = %entry.commit_id,
            branch = %entry.branch_name,
            owner = %owner,
            "dropping inherited copy"
        );
    }
    dropped.extend(removed);
}
