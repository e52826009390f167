//! Bug record types read from a Bugzilla export.

use serde::Serialize;

/// One post in a bug's thread.
///
/// The first entry of a bug is its original report; every following entry is
/// a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptionEntry {
    /// Display name of the author (`who/@name`).
    pub author_name: String,

    /// Email address of the author (`who` text).
    pub author_email: String,

    /// When the entry was posted (`bug_when`), carried verbatim.
    pub timestamp: String,

    /// Body text (`thetext`), preserved byte-for-byte.
    pub text: String,
}

/// A single bug from a Bugzilla export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BugRecord {
    /// Bugzilla bug number (`bug_id`).
    pub id: String,

    /// One-line summary (`short_desc`).
    pub short_description: String,

    /// Display name of the reporter (`reporter/@name`).
    pub reporter_name: String,

    /// Email address of the reporter (`reporter` text).
    pub reporter_email: String,

    /// When the bug was filed (`creation_ts`), carried verbatim.
    pub creation_timestamp: String,

    /// Product component (`component`).
    pub component: String,

    /// Severity (`bug_severity`).
    pub severity: String,

    /// The first description entry, used as the issue body.
    pub report: DescriptionEntry,

    /// Remaining description entries in document order.
    pub comments: Vec<DescriptionEntry>,
}

impl BugRecord {
    /// Iterates over every description entry, report first, in document order.
    pub fn descriptions(&self) -> impl Iterator<Item = &DescriptionEntry> {
        std::iter::once(&self.report).chain(self.comments.iter())
    }
}
