//! HTTP access to the GitHub Issues v2 API.
//!
//! The v2 API takes form-encoded `POST`s under a fixed base path, with the
//! caller's `login` and `token` sent as form fields on every request. The
//! importer only ever needs that one primitive, exposed as [`IssuesApi`].

mod error;

pub use error::TransportError;

use crate::rate_limit::RequestThrottle;
use crate::runner::RunnerConfig;
use reqwest::Client;
use std::future::Future;
use tracing::{debug, warn};
use url::Url;

/// Default base URL of the GitHub v2 (YAML) API.
pub const DEFAULT_API_URL: &str = "http://github.com/api/v2/yaml/";

/// Form-encoded `POST` access to the remote issue tracker.
pub trait IssuesApi {
    /// Submits `fields` to `path` (relative to the API base) and returns the
    /// raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the request cannot be sent or its
    /// response cannot be read. The status code is not inspected; callers
    /// judge the body.
    fn post(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// [`IssuesApi`] implementation backed by `reqwest`.
pub struct GitHubV2Client {
    client: Client,
    base_url: Url,
    login: String,
    token: String,
    throttle: RequestThrottle,
}

impl GitHubV2Client {
    /// Builds a client from the run configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &RunnerConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("bugzilla-importer/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self {
            client,
            base_url: config.api_url().clone(),
            login: config.user().to_string(),
            token: config.token().to_string(),
            throttle: RequestThrottle::new(config.request_delay()),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path)
            .map_err(|source| TransportError::InvalidPath {
                path: path.to_string(),
                source,
            })
    }
}

impl IssuesApi for GitHubV2Client {
    async fn post(&self, path: &str, fields: &[(&str, &str)]) -> Result<String, TransportError> {
        let url = self.endpoint(path)?;

        let mut form = fields.to_vec();
        form.push(("login", self.login.as_str()));
        form.push(("token", self.token.as_str()));

        self.throttle.wait().await;
        debug!(url = %url, "POST");

        let response = self
            .client
            .post(url.clone())
            .form(&form)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;

        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), body = %body, "API answered with an error status");
        }

        Ok(body)
    }
}
