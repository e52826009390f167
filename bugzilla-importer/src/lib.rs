#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod client;
pub mod export;
pub mod issues;
pub mod rate_limit;
pub mod runner;
pub mod summary;
pub mod templates;

#[cfg(test)]
mod test_support;

pub use client::{GitHubV2Client, IssuesApi, TransportError, DEFAULT_API_URL};
pub use export::{load_export, parse_export, BugRecord, DescriptionEntry, ExportError};
pub use issues::{
    add_comment, add_label, create_issue, derive_labels, normalize_label, parse_issue_number,
    replicate_bug, BugFailure, BugStatus, RemoteIssue, ReplicatedBug, ReplicationError,
    ResponseParseError, ORIGIN_LABEL,
};
pub use rate_limit::RequestThrottle;
pub use runner::{ConfigError, FailurePolicy, Runner, RunnerConfig, RunnerError, DEFAULT_TIMEOUT};
pub use summary::{ProcessingResult, RunSummary};
pub use templates::{generate_issue_title, BodyRenderer, TemplateError};
