//! Processing result types.

use crate::issues::{BugFailure, BugStatus, RemoteIssue, ReplicatedBug};

/// Result of processing a single bug.
#[derive(Debug, Clone)]
pub enum ProcessingResult {
    /// The bug was replicated completely.
    Success {
        /// Bugzilla bug number.
        bug_id: String,
        /// The created issue.
        issue: RemoteIssue,
        /// Number of labels added.
        labels: usize,
        /// Number of comments added.
        comments: usize,
    },

    /// Replication stopped part way.
    Failed {
        /// Bugzilla bug number.
        bug_id: String,
        /// Issue created before the failure, if any.
        issue: Option<RemoteIssue>,
        /// Last state reached.
        reached: BugStatus,
        /// Labels added before the failure.
        labels: usize,
        /// Comments added before the failure.
        comments: usize,
        /// Error message.
        error: String,
    },
}

impl From<&ReplicatedBug> for ProcessingResult {
    fn from(bug: &ReplicatedBug) -> Self {
        Self::Success {
            bug_id: bug.bug_id.clone(),
            issue: bug.issue.clone(),
            labels: bug.labels.len(),
            comments: bug.comments_added,
        }
    }
}

impl From<&BugFailure> for ProcessingResult {
    fn from(failure: &BugFailure) -> Self {
        Self::Failed {
            bug_id: failure.bug_id.clone(),
            issue: failure.issue.clone(),
            reached: failure.reached,
            labels: failure.labels_added,
            comments: failure.comments_added,
            error: failure.source.to_string(),
        }
    }
}
