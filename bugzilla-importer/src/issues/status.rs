//! Per-bug replication state.

use std::fmt;

/// Progress of replicating a single bug.
///
/// A bug moves `Pending → IssueCreated → Labeled → Commented → Done`. A
/// failed step ends the bug as a [`BugFailure`](super::BugFailure), which
/// keeps the last state reached next to the error; the remaining steps are
/// skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BugStatus {
    /// Nothing sent yet.
    Pending,

    /// The issue exists remotely.
    IssueCreated,

    /// Every label has been added.
    Labeled,

    /// Every comment has been added.
    Commented,

    /// Replication finished.
    Done,
}

impl BugStatus {
    /// Returns the state as a snake_case string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::IssueCreated => "issue_created",
            Self::Labeled => "labeled",
            Self::Commented => "commented",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for BugStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
