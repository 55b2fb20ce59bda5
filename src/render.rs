//! Text lane renderer.
//!
//! Draws a replayed op sequence top to bottom, oldest commit first, one
//! column per lane:
//!
//! ```text
//! *   c1 init [master]
//! |\
//! | * c3 draft [feature]
//! *   c2 edit [master]
//! ```
//!
//! A lane is drawn from the row it opens on to the row of its last commit.
//! Fork rows join the parent lane to the new one. Selecting a commit maps it
//! to the branch that owns it and notifies the selection callback. Rows show
//! only a commit's subject line.

use std::collections::HashMap;
use std::fmt;

use folio_graph::{BranchName, CommitId, CommitNode, GraphSink, subject_line};
use thiserror::Error;
use tracing::{debug, trace};

/// Ops the renderer refuses because they break replay order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A lane was opened twice.
    #[error("lane `{branch}` is already open")]
    LaneAlreadyOpen {
        /// The branch whose lane was reopened.
        branch: BranchName,
    },
    /// A commit was appended to a lane that was never opened.
    #[error("no lane open for branch `{branch}`")]
    UnknownLane {
        /// The branch with no lane.
        branch: BranchName,
    },
    /// A fork point or parent refers to a commit not yet drawn.
    #[error("commit {} is not on the graph yet", .commit.short())]
    UnknownCommit {
        /// The missing commit.
        commit: CommitId,
    },
    /// The same commit was appended twice.
    #[error("commit {} is already on the graph", .commit.short())]
    DuplicateCommit {
        /// The repeated commit.
        commit: CommitId,
    },
}

struct Lane {
    branch: BranchName,
    first_row: usize,
    last_row: usize,
}

enum Row {
    Fork {
        parent: usize,
        lane: usize,
    },
    Commit {
        lane: usize,
        commit_id: CommitId,
        message: String,
    },
}

type SelectFn<'a> = Box<dyn FnMut(&BranchName) + 'a>;

/// A [`GraphSink`] that lays out lanes as text.
#[derive(Default)]
pub struct LaneRenderer<'a> {
    lanes: Vec<Lane>,
    rows: Vec<Row>,
    owners: HashMap<CommitId, usize>,
    on_select: Option<SelectFn<'a>>,
}

impl<'a> LaneRenderer<'a> {
    /// An empty renderer with no selection callback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `f` with the owning branch whenever a commit is selected.
    #[must_use]
    pub fn on_select(mut self, f: impl FnMut(&BranchName) + 'a) -> Self {
        self.on_select = Some(Box::new(f));
        self
    }

    /// Number of lanes opened so far.
    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Number of commits drawn so far.
    #[must_use]
    pub fn commit_count(&self) -> usize {
        self.owners.len()
    }

    /// The branch whose lane holds `commit`.
    #[must_use]
    pub fn owner(&self, commit: &CommitId) -> Option<&BranchName> {
        self.owners.get(commit).map(|&lane| &self.lanes[lane].branch)
    }

    /// Select `commit`: returns its owning branch and notifies the callback.
    ///
    /// Returns `None`, without calling back, for commits not on the graph.
    pub fn select(&mut self, commit: &CommitId) -> Option<BranchName> {
        let branch = self.owner(commit)?.clone();
        debug!(commit = %commit, branch = %branch, "commit selected");
        if let Some(f) = self.on_select.as_mut() {
            f(&branch);
        }
        Some(branch)
    }

    /// Render every row drawn so far.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (index, row) in self.rows.iter().enumerate() {
            out.push_str(&self.render_row(index, row));
            out.push('\n');
        }
        out
    }

    fn lane_index(&self, branch: &BranchName) -> Option<usize> {
        self.lanes.iter().position(|lane| &lane.branch == branch)
    }

    fn is_active(&self, lane: usize, row: usize) -> bool {
        let lane = &self.lanes[lane];
        lane.first_row <= row && row <= lane.last_row
    }

    fn render_row(&self, index: usize, row: &Row) -> String {
        match row {
            Row::Fork { parent, lane } => {
                let mut line = String::new();
                for col in 0..*lane {
                    line.push(if col < *parent {
                        if self.is_active(col, index) { '|' } else { ' ' }
                    } else if col == *parent {
                        '|'
                    } else {
                        '-'
                    });
                    line.push(if col + 1 == *lane {
                        '\\'
                    } else if col >= *parent {
                        '-'
                    } else {
                        ' '
                    });
                }
                line
            }
            Row::Commit {
                lane,
                commit_id,
                message,
            } => {
                let graph: Vec<&str> = (0..self.lanes.len())
                    .map(|col| {
                        if col == *lane {
                            "*"
                        } else if self.is_active(col, index) {
                            "|"
                        } else {
                            " "
                        }
                    })
                    .collect();
                let graph = graph.join(" ");
                let width = self.lanes.len() * 2 - 1;
                let branch = &self.lanes[*lane].branch;
                let mut line = format!("{:<width$} {}", graph.trim_end(), commit_id.short());
                if !message.is_empty() {
                    line.push(' ');
                    line.push_str(message);
                }
                line.push_str(&format!(" [{branch}]"));
                line
            }
        }
    }
}

impl GraphSink for LaneRenderer<'_> {
    type Error = RenderError;

    fn open_branch(
        &mut self,
        branch_name: &BranchName,
        at: Option<&CommitId>,
    ) -> Result<(), RenderError> {
        if self.lane_index(branch_name).is_some() {
            return Err(RenderError::LaneAlreadyOpen {
                branch: branch_name.clone(),
            });
        }
        let lane = self.lanes.len();
        let first_row = self.rows.len();
        if let Some(at) = at {
            let parent = *self
                .owners
                .get(at)
                .ok_or_else(|| RenderError::UnknownCommit { commit: at.clone() })?;
            self.rows.push(Row::Fork { parent, lane });
        }
        trace!(branch = %branch_name, lane, "lane opened");
        self.lanes.push(Lane {
            branch: branch_name.clone(),
            first_row,
            last_row: first_row,
        });
        Ok(())
    }

    fn append_commit(&mut self, node: CommitNode<'_>) -> Result<(), RenderError> {
        let lane = self
            .lane_index(node.branch_name)
            .ok_or_else(|| RenderError::UnknownLane {
                branch: node.branch_name.clone(),
            })?;
        if let Some(parent) = node.parent_commit_id
            && !self.owners.contains_key(parent)
        {
            return Err(RenderError::UnknownCommit {
                commit: parent.clone(),
            });
        }
        if self.owners.contains_key(node.commit_id) {
            return Err(RenderError::DuplicateCommit {
                commit: node.commit_id.clone(),
            });
        }

        let row = self.rows.len();
        self.lanes[lane].last_row = row;
        self.owners.insert(node.commit_id.clone(), lane);
        self.rows.push(Row::Commit {
            lane,
            commit_id: node.commit_id.clone(),
            message: subject_line(node.message).to_owned(),
        });
        Ok(())
    }
}

impl fmt::Display for LaneRenderer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
#[allow(clippy::all, clippy::pedantic, clippy::nursery)]
mod tests {
    use super::*;
    use folio_graph::{BranchLog, BranchLogs, GraphOp, build_graph_operations, replay};

    fn branch(name: &str) -> BranchName {
        BranchName::new(name).unwrap()
    }

    fn commit(id: &str) -> CommitId {
        CommitId::new(id).unwrap()
    }

    fn ops(branches: &[(&str, &[&str])]) -> Vec<GraphOp> {
        let logs: BranchLogs = branches
            .iter()
            .map(|(name, commits)| {
                BranchLog::with_commits(
                    branch(name),
                    commits.iter().map(|c| (commit(c), format!("msg {c}"))),
                )
            })
            .collect();
        build_graph_operations(&logs, &branch("master")).unwrap()
    }

    fn draw(branches: &[(&str, &[&str])]) -> LaneRenderer<'static> {
        let mut renderer = LaneRenderer::new();
        replay(&ops(branches), &mut renderer).unwrap();
        renderer
    }

    #[test]
    fn single_lane() {
        let r = draw(&[("master", &["c2", "c1"])]);
        assert_eq!(r.render(), "* c1 msg c1 [master]\n* c2 msg c2 [master]\n");
        assert_eq!(r.lane_count(), 1);
    }

    #[test]
    fn simple_fork() {
        let r = draw(&[("master", &["c2", "c1"]), ("feature", &["c3", "c1"])]);
        assert_eq!(
            r.render(),
            "*   c1 msg c1 [master]\n\
             |\\\n\
             | * c3 msg c3 [feature]\n\
             *   c2 msg c2 [master]\n"
        );
    }

    #[test]
    fn fork_across_a_lane() {
        // sub forks from master's c2 after feature's lane is already drawn.
        let r = draw(&[
            ("master", &["c3", "c2", "c1"]),
            ("feature", &["f1", "c1"]),
            ("sub", &["s1", "c2", "c1"]),
        ]);
        let text = r.render();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines.contains(&"|--\\"), "got:\n{text}");
        assert!(lines.contains(&"|   * s1 msg s1 [sub]"), "got:\n{text}");
    }

    #[test]
    fn abbreviates_commit_ids() {
        let r = draw(&[("master", &["0123456789abcdef"])]);
        assert_eq!(r.render(), "* 0123456 msg 0123456789abcdef [master]\n");
    }

    #[test]
    fn empty_message_has_no_gap() {
        let mut r = LaneRenderer::new();
        let master = branch("master");
        let c1 = commit("c1");
        r.open_branch(&master, None).unwrap();
        r.append_commit(CommitNode {
            branch_name: &master,
            commit_id: &c1,
            message: "",
            parent_commit_id: None,
        })
        .unwrap();
        assert_eq!(r.to_string(), "* c1 [master]\n");
    }

    #[test]
    fn multi_line_messages_stay_on_one_row() {
        let mut logs = BranchLogs::new();
        logs.push(BranchLog::with_commits(
            branch("master"),
            [(commit("c2"), "edit\n\nbody line\n"), (commit("c1"), "init\n")],
        ));
        logs.push(BranchLog::with_commits(
            branch("feature"),
            [(commit("c3"), "draft\n"), (commit("c1"), "init\n")],
        ));
        let ops = build_graph_operations(&logs, &branch("master")).unwrap();
        let mut r = LaneRenderer::new();
        replay(&ops, &mut r).unwrap();
        assert_eq!(
            r.render(),
            "*   c1 init [master]\n\
             |\\\n\
             | * c3 draft [feature]\n\
             *   c2 edit [master]\n"
        );
    }

    #[test]
    fn select_reports_owner_and_calls_back() {
        let mut picked = Vec::new();
        {
            let mut r = LaneRenderer::new().on_select(|b: &BranchName| picked.push(b.to_string()));
            replay(
                &ops(&[("master", &["c2", "c1"]), ("feature", &["c3", "c1"])]),
                &mut r,
            )
            .unwrap();
            assert_eq!(r.select(&commit("c3")), Some(branch("feature")));
            assert_eq!(r.select(&commit("c1")), Some(branch("master")));
            assert_eq!(r.select(&commit("zz")), None);
        }
        assert_eq!(picked, ["feature", "master"]);
    }

    #[test]
    fn rejects_out_of_order_ops() {
        let mut r = LaneRenderer::new();
        let master = branch("master");
        let feature = branch("feature");
        let c1 = commit("c1");
        assert_eq!(
            r.open_branch(&feature, Some(&c1)),
            Err(RenderError::UnknownCommit { commit: c1.clone() })
        );
        let node = CommitNode {
            branch_name: &master,
            commit_id: &c1,
            message: "init",
            parent_commit_id: None,
        };
        assert_eq!(
            r.append_commit(node),
            Err(RenderError::UnknownLane {
                branch: master.clone()
            })
        );
        r.open_branch(&master, None).unwrap();
        assert!(matches!(
            r.open_branch(&master, None),
            Err(RenderError::LaneAlreadyOpen { .. })
        ));
        r.append_commit(node).unwrap();
        assert_eq!(
            r.append_commit(node),
            Err(RenderError::DuplicateCommit { commit: c1 })
        );
    }

    #[test]
    fn error_messages_use_short_ids() {
        let err = RenderError::UnknownCommit {
            commit: commit("0123456789abcdef"),
        };
        assert_eq!(err.to_string(), "commit 0123456 is not on the graph yet");
    }
}
