//! Issue replication error types.

use super::{BugStatus, RemoteIssue};
use crate::client::TransportError;
use crate::templates::TemplateError;
use thiserror::Error;

/// The issue creation response did not carry an issue number.
#[derive(Debug, Error)]
pub enum ResponseParseError {
    /// No `number: ` line in the response.
    #[error("Issue creation response has no 'number: ' line: {body:?}")]
    MissingMarker { body: String },

    /// The `number: ` line carries no value.
    #[error("Issue creation response has an empty issue number: {body:?}")]
    EmptyNumber { body: String },
}

/// Errors that can occur while replaying one step of a bug.
#[derive(Debug, Error)]
pub enum ReplicationError {
    /// The remote call failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The creation response could not be understood.
    #[error(transparent)]
    ResponseParse(#[from] ResponseParseError),

    /// A body could not be rendered.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// A bug whose replication stopped part way.
///
/// This is the failed outcome of the per-bug state machine: `reached` is the
/// last state completed and `source` the step that failed.
#[derive(Debug, Error)]
#[error("Bug {bug_id} failed after reaching '{reached}': {source}")]
pub struct BugFailure {
    /// Bugzilla bug number.
    pub bug_id: String,

    /// The issue created before the failure, if any.
    pub issue: Option<RemoteIssue>,

    /// Last state reached before the failing step.
    pub reached: BugStatus,

    /// Labels added before the failure.
    pub labels_added: usize,

    /// Comments added before the failure.
    pub comments_added: usize,

    /// The failing step's error.
    #[source]
    pub source: ReplicationError,
}
