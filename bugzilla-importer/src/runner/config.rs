//! Runner configuration.

use super::ConfigError;
use crate::client::DEFAULT_API_URL;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// What to do when a bug fails to replicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the run at the first failed bug.
    #[default]
    Abort,
    /// Record the failure and continue with the next bug.
    Continue,
}

/// Configuration for an import run.
///
/// Built once at startup and only read afterwards.
#[derive(Clone)]
pub struct RunnerConfig {
    /// Path to the Bugzilla XML export.
    export_path: PathBuf,
    /// Target repository as `owner/name`.
    repository: String,
    /// GitHub login sent with every request.
    user: String,
    /// GitHub API token sent with every request.
    token: String,
    /// Base URL of the v2 API, always ending in `/`.
    api_url: Url,
    /// Per-request timeout.
    timeout: Duration,
    /// Minimum delay between consecutive remote calls.
    request_delay: Duration,
    /// Whether to preview the import without calling the API.
    dry_run: bool,
    /// Behaviour on a failed bug.
    failure_policy: FailurePolicy,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRepository`] if `repository` is not of
    /// the form `owner/name`.
    pub fn new(
        export_path: PathBuf,
        repository: String,
        user: String,
        token: String,
    ) -> Result<Self, ConfigError> {
        validate_repository(&repository)?;
        Ok(Self {
            export_path,
            repository,
            user,
            token,
            api_url: parse_api_url(DEFAULT_API_URL)?,
            timeout: DEFAULT_TIMEOUT,
            request_delay: Duration::ZERO,
            dry_run: false,
            failure_policy: FailurePolicy::default(),
        })
    }

    /// Sets a custom API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the URL does not parse or cannot carry a path.
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self, ConfigError> {
        self.api_url = parse_api_url(api_url)?;
        Ok(self)
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the minimum delay between consecutive remote calls.
    pub fn with_request_delay(mut self, request_delay: Duration) -> Self {
        self.request_delay = request_delay;
        self
    }

    /// Enables or disables dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sets the behaviour on a failed bug.
    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Returns the export file path.
    pub fn export_path(&self) -> &Path {
        &self.export_path
    }

    /// Returns the target repository.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Returns the GitHub login.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the GitHub API token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the API base URL.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the minimum delay between remote calls.
    pub fn request_delay(&self) -> Duration {
        self.request_delay
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the failure policy.
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }
}

impl fmt::Debug for RunnerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunnerConfig")
            .field("export_path", &self.export_path)
            .field("repository", &self.repository)
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url.as_str())
            .field("timeout", &self.timeout)
            .field("request_delay", &self.request_delay)
            .field("dry_run", &self.dry_run)
            .field("failure_policy", &self.failure_policy)
            .finish()
    }
}

/// Owner and name are limited to GitHub's `[A-Za-z0-9._-]`, and may not be
/// `.` or `..`, so the repository joins onto the API URL as two plain path
/// segments.
fn validate_repository(repository: &str) -> Result<(), ConfigError> {
    let valid = match repository.split_once('/') {
        Some((owner, name)) => is_repository_segment(owner) && is_repository_segment(name),
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidRepository {
            repository: repository.to_string(),
        })
    }
}

fn is_repository_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// Parses an API base URL, appending a trailing `/` so that relative
/// endpoint paths join beneath it.
fn parse_api_url(api_url: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(api_url).map_err(|source| ConfigError::InvalidApiUrl {
        url: api_url.to_string(),
        source,
    })?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::UnsupportedApiUrl {
            url: api_url.to_string(),
        });
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
