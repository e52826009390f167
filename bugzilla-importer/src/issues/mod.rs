//! GitHub issue replication.
//!
//! This module replays one Bugzilla bug as one GitHub issue: the issue is
//! created from the bug's report, labelled with its origin, component and
//! severity, then every later description entry is added as a comment in
//! its original order.

mod error;
mod labels;
mod replicated_bug;
mod response;
mod status;

pub use error::{BugFailure, ReplicationError, ResponseParseError};
pub use labels::{derive_labels, normalize_label, ORIGIN_LABEL};
pub use replicated_bug::{RemoteIssue, ReplicatedBug};
pub use response::parse_issue_number;
pub use status::BugStatus;

use crate::client::IssuesApi;
use crate::export::{BugRecord, DescriptionEntry};
use crate::templates::{generate_issue_title, BodyRenderer};
use tracing::{debug, info, info_span, Instrument};
use url::form_urlencoded;

/// Replicates a bug as an issue with its labels and comments.
///
/// This function:
/// 1. Creates the issue from the bug's report
/// 2. Adds the derived labels
/// 3. Adds one comment per later description entry, in order
///
/// Every remote call is attempted once; the first failure stops the bug.
///
/// # Arguments
///
/// * `api` - Remote issue tracker
/// * `repository` - Target repository (`owner/name`)
/// * `renderer` - Body renderer
/// * `bug` - Bug to replicate
///
/// # Errors
///
/// Returns [`BugFailure`] with the last state reached if any step fails.
pub async fn replicate_bug<A: IssuesApi>(
    api: &A,
    repository: &str,
    renderer: &BodyRenderer,
    bug: &BugRecord,
) -> Result<ReplicatedBug, BugFailure> {
    let span = info_span!("replicate_bug", bug_id = %bug.id);

    async {
        let failure =
            |issue: Option<&RemoteIssue>, reached, labels_added, comments_added, source| BugFailure {
                bug_id: bug.id.clone(),
                issue: issue.cloned(),
                reached,
                labels_added,
                comments_added,
                source,
            };
        let mut status = BugStatus::Pending;

        let issue = create_issue(api, repository, renderer, bug)
            .await
            .map_err(|e| failure(None, status, 0, 0, e))?;
        advance(&mut status, BugStatus::IssueCreated);

        let labels = derive_labels(bug);
        for (added, label) in labels.iter().enumerate() {
            add_label(api, repository, &issue, label)
                .await
                .map_err(|e| failure(Some(&issue), status, added, 0, e))?;
        }
        advance(&mut status, BugStatus::Labeled);

        for (added, entry) in bug.comments.iter().enumerate() {
            add_comment(api, repository, renderer, &issue, entry)
                .await
                .map_err(|e| failure(Some(&issue), status, labels.len(), added, e))?;
        }
        advance(&mut status, BugStatus::Commented);
        advance(&mut status, BugStatus::Done);

        info!(issue = %issue, "Bug replicated");
        Ok(ReplicatedBug {
            bug_id: bug.id.clone(),
            title: generate_issue_title(bug),
            issue,
            labels,
            comments_added: bug.comments.len(),
        })
    }
    .instrument(span)
    .await
}

fn advance(status: &mut BugStatus, next: BugStatus) {
    debug!(from = %status, to = %next, "Bug state changed");
    *status = next;
}

/// Creates the issue for a bug.
///
/// The title is `#<id>: <summary>` and the body embeds the reporter, the
/// creation time and the verbatim report text.
///
/// # Errors
///
/// Returns [`ReplicationError`] if rendering or the remote call fails, or if
/// the response carries no issue number.
pub async fn create_issue<A: IssuesApi>(
    api: &A,
    repository: &str,
    renderer: &BodyRenderer,
    bug: &BugRecord,
) -> Result<RemoteIssue, ReplicationError> {
    let title = generate_issue_title(bug);
    let body = renderer.render_issue_body(bug)?;

    info!(title = %title, "Creating issue");
    let response = api
        .post(
            &format!("issues/open/{repository}"),
            &[("title", title.as_str()), ("body", body.as_str())],
        )
        .await?;

    let issue = RemoteIssue::new(parse_issue_number(&response)?);
    info!(issue = %issue, "Issue created");
    Ok(issue)
}

/// Adds a label to an issue.
///
/// # Errors
///
/// Returns [`ReplicationError`] if the remote call fails.
pub async fn add_label<A: IssuesApi>(
    api: &A,
    repository: &str,
    issue: &RemoteIssue,
    label: &str,
) -> Result<(), ReplicationError> {
    info!(label, issue = %issue, "Adding label");

    let encoded: String = form_urlencoded::byte_serialize(label.as_bytes()).collect();
    api.post(
        &format!("issues/label/add/{repository}/{encoded}/{}", issue.number()),
        &[],
    )
    .await?;
    Ok(())
}

/// Adds a description entry to an issue as a comment.
///
/// # Errors
///
/// Returns [`ReplicationError`] if rendering or the remote call fails.
pub async fn add_comment<A: IssuesApi>(
    api: &A,
    repository: &str,
    renderer: &BodyRenderer,
    issue: &RemoteIssue,
    entry: &DescriptionEntry,
) -> Result<(), ReplicationError> {
    let comment = renderer.render_comment_body(entry)?;

    info!(issue = %issue, author = %entry.author_email, "Adding comment");
    api.post(
        &format!("issues/comment/{repository}/{}", issue.number()),
        &[("comment", comment.as_str())],
    )
    .await?;
    Ok(())
}
