//! Issue and comment body renderer.

use crate::export::{BugRecord, DescriptionEntry};
use handlebars::{no_escape, Handlebars};
use serde::Serialize;

/// Body of a newly created issue. The report text is wrapped in `<pre>` so
/// GitHub keeps its line breaks and does not interpret embedded markup.
pub const ISSUE_BODY_TEMPLATE: &str =
    "{{reporter_name}} ({{reporter_email}}) reported on {{creation_timestamp}}\n\n<pre>{{report.text}}</pre>";

/// Body of a comment replayed from a later description entry.
pub const COMMENT_BODY_TEMPLATE: &str =
    "{{author_name}} ({{author_email}}) wrote on {{timestamp}}\n\n<pre>{{text}}</pre>";

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (bodies are sent verbatim)
/// - Strict mode (catches missing variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs
}

/// Renders issue and comment bodies from export records.
pub struct BodyRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for BodyRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl BodyRenderer {
    /// Creates a new body renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
        }
    }

    /// Renders the body of the issue created for `bug`.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_issue_body(&self, bug: &BugRecord) -> Result<String, super::TemplateError> {
        self.render_template(ISSUE_BODY_TEMPLATE, bug)
    }

    /// Renders the body of the comment replayed for `entry`.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_comment_body(
        &self,
        entry: &DescriptionEntry,
    ) -> Result<String, super::TemplateError> {
        self.render_template(COMMENT_BODY_TEMPLATE, entry)
    }

    fn render_template<T: Serialize>(
        &self,
        template: &str,
        data: &T,
    ) -> Result<String, super::TemplateError> {
        Ok(self.handlebars.render_template(template, data)?)
    }
}
