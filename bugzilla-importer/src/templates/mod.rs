//! Issue title generation and body rendering using Handlebars.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{
    create_handlebars_registry, BodyRenderer, COMMENT_BODY_TEMPLATE, ISSUE_BODY_TEMPLATE,
};

use crate::export::BugRecord;

/// Generates the issue title for a bug.
///
/// Format: "#{id}: {short_description}". The `#<id>:` prefix is the only
/// link back to the Bugzilla bug number once imported.
#[must_use]
pub fn generate_issue_title(bug: &BugRecord) -> String {
    format!("#{}: {}", bug.id, bug.short_description)
}
