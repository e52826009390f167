//! Shared fixtures for unit tests.

use crate::client::{IssuesApi, TransportError};
use crate::export::{BugRecord, DescriptionEntry};
use std::sync::Mutex;

/// A bug with one report and one comment.
pub(crate) fn sample_bug(id: &str, summary: &str) -> BugRecord {
    BugRecord {
        id: id.to_string(),
        short_description: summary.to_string(),
        reporter_name: "Jane Doe".to_string(),
        reporter_email: "jane@example.com".to_string(),
        creation_timestamp: "2010-03-01 12:00".to_string(),
        component: "UI/Widgets!".to_string(),
        severity: "critical".to_string(),
        report: DescriptionEntry {
            author_name: "Jane Doe".to_string(),
            author_email: "jane@example.com".to_string(),
            timestamp: "2010-03-01 12:00".to_string(),
            text: format!("Report for bug {id}"),
        },
        comments: vec![DescriptionEntry {
            author_name: "John Roe".to_string(),
            author_email: "john@example.com".to_string(),
            timestamp: "2010-03-02 08:30".to_string(),
            text: format!("Comment 1 on bug {id}"),
        }],
    }
}

/// A request seen by [`RecordingApi`].
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub path: String,
    pub fields: Vec<(String, String)>,
}

impl RecordedCall {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A real `reqwest` error: building a request to an unparseable URL.
fn transport_failure(path: &str) -> TransportError {
    let source = reqwest::Client::new()
        .post(format!("not a url/{path}"))
        .build()
        .unwrap_err();
    TransportError::Request {
        url: path.to_string(),
        source,
    }
}

type FailurePredicate = Box<dyn Fn(&str, &[(&str, &str)]) -> bool + Send + Sync>;

/// In-memory [`IssuesApi`] that records every call.
///
/// Issue creation answers with a v2-style body numbering issues from 1.
pub(crate) struct RecordingApi {
    calls: Mutex<Vec<RecordedCall>>,
    create_response: Option<String>,
    fail_when: Option<FailurePredicate>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            create_response: None,
            fail_when: None,
        }
    }

    /// Answers every issue creation with `body`.
    pub fn with_create_response(mut self, body: &str) -> Self {
        self.create_response = Some(body.to_string());
        self
    }

    /// Fails every call matching `predicate` as if the request never went out.
    pub fn failing_on(
        mut self,
        predicate: impl Fn(&str, &[(&str, &str)]) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.fail_when = Some(Box::new(predicate));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn created_issues(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.path.starts_with("issues/open/"))
            .count()
    }
}

impl IssuesApi for RecordingApi {
    async fn post(&self, path: &str, fields: &[(&str, &str)]) -> Result<String, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            path: path.to_string(),
            fields: fields
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        });

        if self.fail_when.as_ref().is_some_and(|fail| fail(path, fields)) {
            return Err(transport_failure(path));
        }

        if !path.starts_with("issues/open/") {
            return Ok("---\nlabels: []\n".to_string());
        }

        Ok(match &self.create_response {
            Some(body) => body.clone(),
            None => format!(
                "---\nissue:\n  number: {}\n  votes: 0\n  state: open\n",
                self.created_issues()
            ),
        })
    }
}
