//! The consumer side of the op sequence.
//!
//! A rendering surface needs exactly two primitives: start a lane (optionally
//! forking from an existing commit node) and append a commit node to a lane.
//! Anything implementing [`GraphSink`] can be driven by [`replay`].

use std::convert::Infallible;

use crate::op::GraphOp;
use crate::types::{BranchName, CommitId};

/// A commit node handed to [`GraphSink::append_commit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommitNode<'a> {
    /// The lane the node goes on.
    pub branch_name: &'a BranchName,
    /// The commit being drawn.
    pub commit_id: &'a CommitId,
    /// The full commit message.
    pub message: &'a str,
    /// The node this one connects back to.
    pub parent_commit_id: Option<&'a CommitId>,
}

/// A rendering surface that builds a picture from graph ops.
pub trait GraphSink {
    /// Error raised when the sink cannot apply an op.
    type Error;

    /// Start a lane for `branch_name`, forking from `at` when given.
    ///
    /// # Errors
    /// Implementation-defined.
    fn open_branch(
        &mut self,
        branch_name: &BranchName,
        at: Option<&CommitId>,
    ) -> Result<(), Self::Error>;

    /// Append a node to the end of its lane.
    ///
    /// # Errors
    /// Implementation-defined.
    fn append_commit(&mut self, node: CommitNode<'_>) -> Result<(), Self::Error>;
}

/// Apply `ops` to `sink` in order, stopping at the first error.
///
/// # Errors
/// Returns the sink's error for the first op it rejects.
pub fn replay<'a, S>(
    ops: impl IntoIterator<Item = &'a GraphOp>,
    sink: &mut S,
) -> Result<(), S::Error>
where
    S: GraphSink + ?Sized,
{
    for op in ops {
        match op {
            GraphOp::OpenBranch {
                branch_name,
                at_commit_id,
            } => sink.open_branch(branch_name, at_commit_id.as_ref())?,
            GraphOp::AppendCommit {
                branch_name,
                commit_id,
                message,
                parent_commit_id,
            } => sink.append_commit(CommitNode {
                branch_name,
                commit_id,
                message,
                parent_commit_id: parent_commit_id.as_ref(),
            })?,
        }
    }
    Ok(())
}

/// Recording sink: collects the ops it is given.
impl GraphSink for Vec<GraphOp> {
    type Error = Infallible;

    fn open_branch(
        &mut self,
        branch_name: &BranchName,
        at: Option<&CommitId>,
    ) -> Result<(), Self::Error> {
        self.push(GraphOp::OpenBranch {
            branch_name: branch_name.clone(),
            at_commit_id: at.cloned(),
        });
        Ok(())
    }

    fn append_commit(&mut self, node: CommitNode<'_>) -> Result<(), Self::Error> {
        self.push(GraphOp::AppendCommit {
            branch_name: node.branch_name.clone(),
            commit_id: node.commit_id.clone(),
            message: node.message.to_owned(),
            parent_commit_id: node.parent_commit_id.cloned(),
        });
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::all, clippy::pedantic, clippy::nursery)]
mod tests {
    use super::*;

    /// Sink that refuses to append to a lane it never opened.
    #[derive(Default)]
    struct StrictSink {
        lanes: Vec<BranchName>,
        nodes: usize,
    }

    impl GraphSink for StrictSink {
        type Error = String;

        fn open_branch(&mut self, b: &BranchName, _at: Option<&CommitId>) -> Result<(), String> {
            self.lanes.push(b.clone());
            Ok(())
        }

        fn append_commit(&mut self, node: CommitNode<'_>) -> Result<(), String> {
            if !self.lanes.contains(node.branch_name) {
                return Err(format!("no lane for {}", node.branch_name));
            }
            self.nodes += 1;
            Ok(())
        }
    }

    fn ops() -> Vec<GraphOp> {
        let master = BranchName::new("master").unwrap();
        vec![
            GraphOp::OpenBranch {
                branch_name: master.clone(),
                at_commit_id: None,
            },
            GraphOp::AppendCommit {
                branch_name: master,
                commit_id: CommitId::new("c1").unwrap(),
                message: "init".to_owned(),
                parent_commit_id: None,
            },
        ]
    }

    #[test]
    fn replay_into_recording_sink_reproduces_ops() {
        let source = ops();
        let mut recorded: Vec<GraphOp> = Vec::new();
        replay(&source, &mut recorded).unwrap();
        assert_eq!(recorded, source);
    }

    #[test]
    fn replay_stops_at_first_error() {
        let mut source = ops();
        source.remove(0);
        let mut sink = StrictSink::default();
        let err = replay(&source, &mut sink).unwrap_err();
        assert_eq!(err, "no lane for master");
        assert_eq!(sink.nodes, 0);
    }

    #[test]
    fn replay_counts_nodes() {
        let mut sink = StrictSink::default();
        replay(&ops(), &mut sink).unwrap();
        assert_eq!(sink.nodes, 1);
        assert_eq!(sink.lanes.len(), 1);
    }
}
