//! Export reading error types.

use thiserror::Error;

/// Errors that can occur while reading a Bugzilla export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The export file does not exist or is not a regular file.
    #[error("Export file not found: {path}")]
    NotFound { path: String },

    /// The export file exists but could not be opened.
    #[error("Export file '{path}' is not readable: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading an opened export file failed.
    #[error("Failed to read export file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The export is not valid UTF-8.
    #[error("Export file '{path}' is not valid UTF-8: {source}")]
    Encoding {
        path: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// The export is not well-formed XML.
    #[error("Failed to parse XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The document root is not a `bugzilla` element.
    #[error("Expected a <bugzilla> root element, found <{found}>")]
    UnexpectedRoot { found: String },

    /// A required element or attribute is absent.
    #[error("Bug {bug}: missing required field '{field}'")]
    MissingField { bug: String, field: &'static str },

    /// A required element is present but empty.
    #[error("Bug {bug}: required field '{field}' is empty")]
    EmptyField { bug: String, field: &'static str },

    /// A bug carries no `long_desc` entries.
    #[error("Bug {bug}: no description entries")]
    NoDescriptions { bug: String },
}

impl ExportError {
    /// Returns true if the export could not be opened at all.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Unreadable { .. })
    }

    /// Returns true if the export is not parseable as XML.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Encoding { .. } | Self::Xml(_))
    }

    /// Returns true if the export is valid XML but lacks required data.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedRoot { .. }
                | Self::MissingField { .. }
                | Self::EmptyField { .. }
                | Self::NoDescriptions { .. }
        )
    }
}
