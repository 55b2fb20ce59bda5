//! Workspace snapshots: the backend's branch list and per-branch logs.
//!
//! The JSON shape mirrors the two backend endpoints a client calls, the
//! branch listing and one log listing per branch:
//!
//! ```json
//! {
//!   "workspace": "thesis",
//!   "branches": [{ "name": "master" }, { "name": "feature" }],
//!   "logs": {
//!     "master":  [{ "commit_uuid": "c2", "message": "edit" },
//!                 { "commit_uuid": "c1", "message": "init" }],
//!     "feature": [{ "commit_uuid": "c3", "message": "draft" },
//!                 { "commit_uuid": "c1", "message": "init" }]
//!   }
//! }
//! ```
//!
//! Logs are newest first. A listed branch without a log is empty; a log for
//! a branch that is not listed is ignored.

use std::collections::BTreeMap;
use std::io::Read as _;
use std::path::Path;

use anyhow::{Context as _, Result};
use folio_graph::{BranchLog, BranchLogs, BranchName, CommitId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Path argument meaning "read from stdin".
pub const STDIN: &str = "-";

/// One entry of the branch listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitBranch {
    /// Branch name.
    pub name: BranchName,
}

/// One entry of a branch log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitLog {
    /// Commit id.
    pub commit_uuid: CommitId,
    /// Full commit message, usually with a trailing newline.
    #[serde(default)]
    pub message: String,
}

/// Everything needed to draw one workspace's history.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceSnapshot {
    /// Workspace name, used in messages only.
    #[serde(default)]
    pub workspace: String,
    /// Branches in backend listing order.
    pub branches: Vec<GitBranch>,
    /// Newest-first log per branch.
    #[serde(default)]
    pub logs: BTreeMap<BranchName, Vec<GitLog>>,
}

impl WorkspaceSnapshot {
    /// Parse a snapshot from JSON text.
    ///
    /// # Errors
    /// Returns an error on malformed JSON, unknown fields, or invalid branch
    /// names and commit ids.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid workspace snapshot")
    }

    /// Read a snapshot from `path`, or from stdin when `path` is `-`.
    ///
    /// # Errors
    /// Returns an error if the source cannot be read or does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let json = if path.as_os_str() == STDIN {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read snapshot from stdin")?;
            buf
        } else {
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read snapshot {}", path.display()))?
        };
        Self::from_json(&json).with_context(|| format!("while loading {}", path.display()))
    }

    /// A display name for messages: the workspace name, or `<unnamed>`.
    #[must_use]
    pub fn name(&self) -> &str {
        if self.workspace.is_empty() {
            "<unnamed>"
        } else {
            &self.workspace
        }
    }

    /// Convert to pipeline input, keeping the branch listing order.
    #[must_use]
    pub fn to_branch_logs(&self) -> BranchLogs {
        for name in self.logs.keys() {
            if !self.branches.iter().any(|b| &b.name == name) {
                warn!(branch = %name, workspace = self.name(), "ignoring log for unlisted branch");
            }
        }

        let logs: BranchLogs = self
            .branches
            .iter()
            .map(|branch| {
                let entries = self.logs.get(&branch.name).map_or(&[][..], Vec::as_slice);
                BranchLog::with_commits(
                    branch.name.clone(),
                    entries
                        .iter()
                        .map(|log| (log.commit_uuid.clone(), log.message.as_str())),
                )
            })
            .collect();

        debug!(
            workspace = self.name(),
            branches = logs.len(),
            entries = logs.entry_count(),
            "snapshot loaded"
        );
        logs
    }
}
