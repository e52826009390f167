//! Run summary types.

use super::result::ProcessingResult;

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of bugs read from the export.
    pub bugs_read: usize,

    /// Number of issues successfully created.
    pub issues_created: usize,

    /// Number of labels added.
    pub labels_added: usize,

    /// Number of comments added.
    pub comments_added: usize,

    /// Ids of bugs that failed to replicate, in processing order.
    pub failed_bugs: Vec<String>,

    /// Id of the bug the run stopped at, if it was aborted.
    pub aborted_at: Option<String>,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with a processing result.
    pub fn record_result(&mut self, result: &ProcessingResult) {
        match result {
            ProcessingResult::Success {
                labels, comments, ..
            } => {
                self.issues_created += 1;
                self.labels_added += labels;
                self.comments_added += comments;
            }
            ProcessingResult::Failed {
                bug_id,
                issue,
                labels,
                comments,
                ..
            } => {
                if issue.is_some() {
                    self.issues_created += 1;
                }
                self.labels_added += labels;
                self.comments_added += comments;
                self.failed_bugs.push(bug_id.clone());
            }
        }
    }

    /// Returns true if any failures occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed_bugs.is_empty()
    }

    /// Returns true if all bugs were replicated.
    #[must_use]
    pub fn all_success(&self) -> bool {
        self.failed_bugs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::{BugStatus, RemoteIssue};

    #[test]
    fn can_record_result() {
        let mut summary = RunSummary::new(false);

        summary.record_result(&ProcessingResult::Success {
            bug_id: "42".to_string(),
            issue: RemoteIssue::new("1"),
            labels: 3,
            comments: 2,
        });

        assert_eq!(summary.issues_created, 1);
        assert_eq!(summary.labels_added, 3);
        assert_eq!(summary.comments_added, 2);
        assert!(summary.all_success());
    }

    #[test]
    fn partial_failure_counts_created_issue() {
        let mut summary = RunSummary::new(false);

        summary.record_result(&ProcessingResult::Failed {
            bug_id: "43".to_string(),
            issue: Some(RemoteIssue::new("2")),
            reached: BugStatus::IssueCreated,
            labels: 2,
            comments: 0,
            error: "HTTP 500".to_string(),
        });
        summary.record_result(&ProcessingResult::Failed {
            bug_id: "44".to_string(),
            issue: None,
            reached: BugStatus::Pending,
            labels: 0,
            comments: 0,
            error: "HTTP 500".to_string(),
        });

        assert_eq!(summary.issues_created, 1);
        assert_eq!(summary.labels_added, 2);
        assert_eq!(summary.comments_added, 0);
        assert_eq!(summary.failed_bugs, ["43", "44"]);
        assert!(summary.has_failures());
    }
}
