//! Per-branch commit logs as supplied by the backend.
//!
//! Each branch log is an independent newest-first list. A commit shared by
//! two branches appears in both lists; nothing here tries to interpret that,
//! it is the linker's and deduplicator's job.

use serde::{Deserialize, Serialize};

use crate::types::{BranchName, CommitId};

/// One commit as it appears in one branch's log.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogEntry {
    /// The branch whose log listed this commit.
    pub branch_name: BranchName,
    /// The commit identifier.
    pub commit_id: CommitId,
    /// The full commit message as the backend reports it, body and
    /// trailing newline included.
    pub message: String,
}

impl LogEntry {
    /// The message's subject line.
    #[must_use]
    pub fn subject(&self) -> &str {
        subject_line(&self.message)
    }
}

/// The first non-blank line of a commit message, trimmed.
///
/// Backends return `git log` style messages: subject, blank line, body,
/// trailing newline. Anything drawn on a single row uses this.
#[must_use]
pub fn subject_line(message: &str) -> &str {
    message
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
}

/// One branch's log, ordered newest-first (index 0 is the branch tip).
///
/// Entries are created through the branch so every entry's `branch_name`
/// matches the log it lives in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchLog {
    name: BranchName,
    entries: Vec<LogEntry>,
}

impl BranchLog {
    /// Create an empty log for `name`.
    #[must_use]
    pub const fn new(name: BranchName) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    /// Create a log from newest-first `(commit, message)` pairs.
    pub fn with_commits<I, M>(name: BranchName, commits: I) -> Self
    where
        I: IntoIterator<Item = (CommitId, M)>,
        M: Into<String>,
    {
        let mut log = Self::new(name);
        for (commit_id, message) in commits {
            log.push(commit_id, message);
        }
        log
    }

    /// Append the next-older commit.
    pub fn push(&mut self, commit_id: CommitId, message: impl Into<String>) {
        self.entries.push(LogEntry {
            branch_name: self.name.clone(),
            commit_id,
            message: message.into(),
        });
    }

    /// The branch name.
    #[must_use]
    pub const fn name(&self) -> &BranchName {
        &self.name
    }

    /// Entries, newest first.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the branch has no commits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The complete input for one workspace: every branch log, in the order the
/// backend listed the branches.
///
/// The order matters: wherever the pipeline picks the first of several equal
/// candidates, it picks in this order. The same branch name may appear more
/// than once; that is malformed input which root detection reports.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BranchLogs {
    branches: Vec<BranchLog>,
}

impl BranchLogs {
    /// An empty set of logs.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            branches: Vec::new(),
        }
    }

    /// Group a flat list of entries by branch.
    ///
    /// Branches are ordered by first appearance; entries keep their relative
    /// order within each branch.
    pub fn from_entries(entries: impl IntoIterator<Item = LogEntry>) -> Self {
        let mut logs = Self::new();
        for entry in entries {
            let position = logs
                .branches
                .iter()
                .position(|log| log.name == entry.branch_name);
            match position {
                Some(i) => logs.branches[i].entries.push(entry),
                None => logs.branches.push(BranchLog {
                    name: entry.branch_name.clone(),
                    entries: vec![entry],
                }),
            }
        }
        logs
    }

    /// Append a branch log.
    pub fn push(&mut self, log: BranchLog) {
        self.branches.push(log);
    }

    /// Iterate branch logs in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, BranchLog> {
        self.branches.iter()
    }

    /// The first log listed for `name`, if any.
    #[must_use]
    pub fn branch(&self, name: &BranchName) -> Option<&BranchLog> {
        self.branches.iter().find(|log| &log.name == name)
    }

    /// Number of branch logs (duplicates included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    /// Returns `true` if there are no branch logs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Total number of entries across all branches.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.branches.iter().map(BranchLog::len).sum()
    }
}

impl FromIterator<BranchLog> for BranchLogs {
    fn from_iter<T: IntoIterator<Item = BranchLog>>(iter: T) -> Self {
        Self {
            branches: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a BranchLogs {
    type Item = &'a BranchLog;
    type IntoIter = std::slice::Iter<'a, BranchLog>;

    fn into_iter(self) -> Self::IntoIter {
        self.branches.iter()
    }
}

#[cfg(test)]
#[allow(clippy::all, clippy::pedantic, clippy::nursery)]
mod tests {
    use super::*;

    fn branch(name: &str) -> BranchName {
        BranchName::new(name).unwrap()
    }

    fn commit(id: &str) -> CommitId {
        CommitId::new(id).unwrap()
    }

    fn entry(b: &str, c: &str) -> LogEntry {
        LogEntry {
            branch_name: branch(b),
            commit_id: commit(c),
            message: format!("{c} on {b}"),
        }
    }

    #[test]
    fn subject_line_strips_body_and_newlines() {
        assert_eq!(subject_line("init\n"), "init");
        assert_eq!(subject_line("edit\n\nbody line\n"), "edit");
        assert_eq!(subject_line("\n  fix typo  \r\nmore"), "fix typo");
        assert_eq!(subject_line(""), "");
        assert_eq!(subject_line("\n\n"), "");
        assert_eq!(entry("master", "c1").subject(), "c1 on master");
    }

    #[test]
    fn push_stamps_branch_name() {
        let mut log = BranchLog::new(branch("master"));
        log.push(commit("c2"), "second");
        log.push(commit("c1"), "first");
        assert_eq!(log.len(), 2);
        assert!(log.entries().iter().all(|e| e.branch_name == branch("master")));
        assert_eq!(log.entries()[0].commit_id, commit("c2"));
    }

    #[test]
    fn from_entries_groups_by_first_appearance() {
        let logs = BranchLogs::from_entries([
            entry("master", "c2"),
            entry("feature", "c3"),
            entry("master", "c1"),
            entry("feature", "c1"),
        ]);
        let names: Vec<&str> = logs.iter().map(|l| l.name().as_str()).collect();
        assert_eq!(names, ["master", "feature"]);
        let master: Vec<&str> = logs
            .branch(&branch("master"))
            .unwrap()
            .entries()
            .iter()
            .map(|e| e.commit_id.as_str())
            .collect();
        assert_eq!(master, ["c2", "c1"]);
        assert_eq!(logs.entry_count(), 4);
    }

    #[test]
    fn duplicate_branch_logs_are_kept() {
        let logs: BranchLogs = [
            BranchLog::with_commits(branch("master"), [(commit("c1"), "a")]),
            BranchLog::with_commits(branch("master"), [(commit("c9"), "b")]),
        ]
        .into_iter()
        .collect();
        assert_eq!(logs.len(), 2);
    }

    #[test]
    fn empty_logs() {
        let logs = BranchLogs::new();
        assert!(logs.is_empty());
        assert_eq!(logs.entry_count(), 0);
        assert!(logs.branch(&branch("master")).is_none());
    }
}
