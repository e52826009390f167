//! Remote issue handles and replication outcomes.

use std::fmt;

/// Identifier assigned by GitHub to a newly created issue.
///
/// Only meaningful while the bug it was created for is being replicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteIssue {
    number: String,
}

impl RemoteIssue {
    /// Wraps an issue number returned by the API.
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
        }
    }

    /// Returns the issue number.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }
}

impl fmt::Display for RemoteIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.number)
    }
}

/// A bug fully replicated as a GitHub issue.
#[derive(Debug, Clone)]
pub struct ReplicatedBug {
    /// Bugzilla bug number.
    pub bug_id: String,

    /// Title of the created issue.
    pub title: String,

    /// The created issue.
    pub issue: RemoteIssue,

    /// Labels added, in order.
    pub labels: Vec<String>,

    /// Number of comments added.
    pub comments_added: usize,
}
