//! Bugzilla XML export reading.
//!
//! This module turns a Bugzilla `xml.cgi` style bug dump into an ordered list
//! of [`BugRecord`]s. Only the fixed export shape is understood:
//!
//! ```text
//! bugzilla
//! └── bug*
//!     ├── bug_id, short_desc, creation_ts, component, bug_severity
//!     ├── reporter (@name)
//!     └── long_desc+
//!         ├── who (@name)
//!         ├── bug_when
//!         └── thetext
//! ```
//!
//! Every field the importer relies on must be present; nothing is defaulted.

mod bug;
mod error;

pub use bug::{BugRecord, DescriptionEntry};
pub use error::ExportError;

use roxmltree::{Document, Node, ParsingOptions};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Name of the document root element.
const ROOT_ELEMENT: &str = "bugzilla";

/// Reads and parses a Bugzilla export file.
///
/// # Arguments
///
/// * `path` - Path to the XML export
///
/// # Returns
///
/// Bugs in document order, each with its description entries in document order.
///
/// # Errors
///
/// Returns [`ExportError`] if the file is missing or unreadable, is not
/// well-formed UTF-8 XML, or lacks a required field.
pub fn load_export(path: &Path) -> Result<Vec<BugRecord>, ExportError> {
    info!(path = %path.display(), "Reading Bugzilla export");

    if !path.is_file() {
        return Err(ExportError::NotFound {
            path: path.display().to_string(),
        });
    }

    let mut file = File::open(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => ExportError::NotFound {
            path: path.display().to_string(),
        },
        _ => ExportError::Unreadable {
            path: path.display().to_string(),
            source,
        },
    })?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|source| ExportError::Io {
            path: path.display().to_string(),
            source,
        })?;

    let xml = String::from_utf8(bytes).map_err(|source| ExportError::Encoding {
        path: path.display().to_string(),
        source,
    })?;

    let bugs = parse_export(&xml)?;
    info!(count = bugs.len(), "Loaded bugs");
    Ok(bugs)
}

/// Parses the text of a Bugzilla export.
///
/// A `DOCTYPE` declaration is accepted, since Bugzilla emits one referencing
/// its `bugzilla.dtd`.
///
/// # Errors
///
/// Returns [`ExportError`] if the text is not well-formed XML or does not
/// carry the expected bug fields.
pub fn parse_export(xml: &str) -> Result<Vec<BugRecord>, ExportError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let document = Document::parse_with_options(xml, options)?;

    let root = document.root_element();
    if !root.has_tag_name(ROOT_ELEMENT) {
        return Err(ExportError::UnexpectedRoot {
            found: root.tag_name().name().to_string(),
        });
    }

    root.children()
        .filter(|node| node.has_tag_name("bug"))
        .enumerate()
        .map(|(index, node)| read_bug(node, index))
        .collect()
}

/// Maps one `bug` element to a [`BugRecord`].
fn read_bug(node: Node<'_, '_>, index: usize) -> Result<BugRecord, ExportError> {
    let position = format!("at position {}", index + 1);
    let id = required_text(node, "bug_id", &position)?;
    if id.trim().is_empty() {
        return Err(ExportError::EmptyField {
            bug: position,
            field: "bug_id",
        });
    }

    let reporter = required_child(node, "reporter", &id)?;
    let mut descriptions = node
        .children()
        .filter(|child| child.has_tag_name("long_desc"))
        .map(|child| read_description(child, &id))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter();

    let Some(report) = descriptions.next() else {
        return Err(ExportError::NoDescriptions { bug: id });
    };

    let bug = BugRecord {
        short_description: required_text(node, "short_desc", &id)?,
        reporter_name: required_attribute(reporter, "name", "reporter/@name", &id)?,
        reporter_email: text_of(reporter),
        creation_timestamp: required_text(node, "creation_ts", &id)?,
        component: required_non_empty(node, "component", &id)?,
        severity: required_non_empty(node, "bug_severity", &id)?,
        report,
        comments: descriptions.collect(),
        id,
    };

    debug!(
        bug_id = %bug.id,
        comments = bug.comments.len(),
        "Read bug"
    );
    Ok(bug)
}

/// Maps one `long_desc` element to a [`DescriptionEntry`].
fn read_description(node: Node<'_, '_>, bug: &str) -> Result<DescriptionEntry, ExportError> {
    let who = required_child(node, "who", bug)?;
    Ok(DescriptionEntry {
        author_name: required_attribute(who, "name", "long_desc/who/@name", bug)?,
        author_email: text_of(who),
        timestamp: required_text(node, "bug_when", bug)?,
        text: required_text(node, "thetext", bug)?,
    })
}

fn required_child<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
    bug: &str,
) -> Result<Node<'a, 'input>, ExportError> {
    node.children()
        .find(|child| child.has_tag_name(name))
        .ok_or_else(|| ExportError::MissingField {
            bug: bug.to_string(),
            field: name,
        })
}

/// Text of a required child element. An empty element reads as "".
fn required_text(node: Node<'_, '_>, name: &'static str, bug: &str) -> Result<String, ExportError> {
    required_child(node, name, bug).map(text_of)
}

fn required_non_empty(
    node: Node<'_, '_>,
    name: &'static str,
    bug: &str,
) -> Result<String, ExportError> {
    let text = required_text(node, name, bug)?;
    if text.trim().is_empty() {
        return Err(ExportError::EmptyField {
            bug: bug.to_string(),
            field: name,
        });
    }
    Ok(text)
}

fn required_attribute(
    node: Node<'_, '_>,
    name: &str,
    field: &'static str,
    bug: &str,
) -> Result<String, ExportError> {
    node.attribute(name)
        .map(str::to_string)
        .ok_or_else(|| ExportError::MissingField {
            bug: bug.to_string(),
            field,
        })
}

/// Concatenates every text node under `node`, so comments and processing
/// instructions inside an element do not cut its text short.
fn text_of(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}
