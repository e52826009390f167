//! Runner error types.

use thiserror::Error;

/// Errors in the run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The target repository is not `owner/name`.
    #[error("Invalid repository '{repository}', expected 'owner/name'")]
    InvalidRepository { repository: String },

    /// The API base URL does not parse.
    #[error("Invalid API URL '{url}': {source}")]
    InvalidApiUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The API base URL cannot carry a path.
    #[error("Unsupported API URL '{url}'")]
    UnsupportedApiUrl { url: String },
}

/// Errors that stop a run before any bug is replicated.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The export could not be read.
    #[error(transparent)]
    Export(#[from] crate::export::ExportError),

    /// The HTTP client could not be initialised.
    #[error(transparent)]
    Client(#[from] crate::client::TransportError),
}
