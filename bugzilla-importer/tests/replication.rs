use std::fs;
use std::path::PathBuf;

use bugzilla_importer::{Runner, RunnerConfig};
use tempfile::TempDir;
use url::form_urlencoded;
use wiremock::matchers::{body_string, body_string_contains, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const SINGLE_BUG: &str = r#"<?xml version="1.0"?>
<bugzilla>
  <bug>
    <bug_id>42</bug_id>
    <creation_ts>2010-03-01 12:00</creation_ts>
    <short_desc>Crash on save</short_desc>
    <component>UI/Widgets!</component>
    <bug_severity>critical</bug_severity>
    <reporter name="Jane Doe">jane@example.com</reporter>
    <long_desc>
      <who name="Jane Doe">jane@example.com</who>
      <bug_when>2010-03-01 12:00</bug_when>
      <thetext>Saving crashes.
  trace: &lt;none&gt;</thetext>
    </long_desc>
    <long_desc>
      <who name="John Roe">john@example.com</who>
      <bug_when>2010-03-02 08:30</bug_when>
      <thetext>Confirmed &amp; reproducible.</thetext>
    </long_desc>
  </bug>
</bugzilla>
"#;

fn write_export(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("bugs.xml");
    fs::write(&path, SINGLE_BUG).unwrap();
    path
}

fn config(export: PathBuf, server: &MockServer) -> RunnerConfig {
    RunnerConfig::new(
        export,
        "acme/widgets".to_string(),
        "octocat".to_string(),
        "secret".to_string(),
    )
    .unwrap()
    .with_api_url(&format!("{}/api/v2/yaml", server.uri()))
    .unwrap()
}

fn form_field(request: &Request, name: &str) -> Option<String> {
    form_urlencoded::parse(&request.body)
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

#[tokio::test]
async fn imports_bug_as_issue_with_labels_and_comment() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/yaml/issues/open/acme/widgets"))
        .and(body_string_contains("title=%2342%3A+Crash+on+save"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("---\nissue:\n  number: 17\n  votes: 0\n  state: open\n"),
        )
        .expect(1)
        .mount(&server)
        .await;

    for label in ["Bugzilla", "UIWidgets", "critical"] {
        Mock::given(method("POST"))
            .and(path(format!(
                "/api/v2/yaml/issues/label/add/acme/widgets/{label}/17"
            )))
            .and(body_string("login=octocat&token=secret"))
            .respond_with(ResponseTemplate::new(200).set_body_string("---\nlabels: []\n"))
            .expect(1)
            .mount(&server)
            .await;
    }

    Mock::given(method("POST"))
        .and(path("/api/v2/yaml/issues/comment/acme/widgets/17"))
        .respond_with(ResponseTemplate::new(200).set_body_string("---\ncomment: {}\n"))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let runner = Runner::new(config(write_export(&temp), &server)).unwrap();
    let summary = runner.run().await.unwrap();

    assert_eq!(summary.issues_created, 1);
    assert_eq!(summary.labels_added, 3);
    assert_eq!(summary.comments_added, 1);
    assert!(summary.all_success());

    let requests = server.received_requests().await.unwrap();
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(
        paths,
        [
            "/api/v2/yaml/issues/open/acme/widgets",
            "/api/v2/yaml/issues/label/add/acme/widgets/Bugzilla/17",
            "/api/v2/yaml/issues/label/add/acme/widgets/UIWidgets/17",
            "/api/v2/yaml/issues/label/add/acme/widgets/critical/17",
            "/api/v2/yaml/issues/comment/acme/widgets/17",
        ]
    );

    assert_eq!(
        form_field(&requests[0], "body").as_deref(),
        Some("Jane Doe (jane@example.com) reported on 2010-03-01 12:00\n\n<pre>Saving crashes.\n  trace: <none></pre>")
    );
    assert_eq!(
        form_field(&requests[4], "comment").as_deref(),
        Some("John Roe (john@example.com) wrote on 2010-03-02 08:30\n\n<pre>Confirmed & reproducible.</pre>")
    );
    for request in &requests {
        assert_eq!(form_field(request, "login").as_deref(), Some("octocat"));
        assert_eq!(form_field(request, "token").as_deref(), Some("secret"));
    }
}

#[tokio::test]
async fn missing_issue_number_stops_bug() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/yaml/issues/open/acme/widgets"))
        .respond_with(ResponseTemplate::new(200).set_body_string("---\nerror: api route not recognized\n"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path_regex("^/api/v2/yaml/issues/(label|comment)/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let runner = Runner::new(config(write_export(&temp), &server)).unwrap();
    let summary = runner.run().await.unwrap();

    assert_eq!(summary.issues_created, 0);
    assert_eq!(summary.failed_bugs, ["42"]);
    assert_eq!(summary.aborted_at.as_deref(), Some("42"));
}

#[tokio::test]
async fn error_status_on_label_does_not_stop_bug() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/yaml/issues/open/acme/widgets"))
        .respond_with(ResponseTemplate::new(200).set_body_string("issue:\n  number: 3\n"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v2/yaml/issues/label/add/acme/widgets/Bugzilla/3"))
        .respond_with(ResponseTemplate::new(422).set_body_string("error: label exists"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path_regex(
            "^/api/v2/yaml/issues/(label/add/acme/widgets/(UIWidgets|critical)|comment/acme/widgets)/3$",
        ))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let runner = Runner::new(config(write_export(&temp), &server)).unwrap();
    let summary = runner.run().await.unwrap();

    assert_eq!(summary.issues_created, 1);
    assert_eq!(summary.labels_added, 3);
    assert_eq!(summary.comments_added, 1);
    assert!(summary.all_success());
    assert_eq!(server.received_requests().await.unwrap().len(), 5);
}

#[tokio::test]
async fn error_status_on_creation_stops_bug() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/yaml/issues/open/acme/widgets"))
        .respond_with(ResponseTemplate::new(401).set_body_string("error: not authorized"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path_regex("^/api/v2/yaml/issues/(label|comment)/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let runner = Runner::new(config(write_export(&temp), &server)).unwrap();
    let summary = runner.run().await.unwrap();

    assert_eq!(summary.issues_created, 0);
    assert_eq!(summary.failed_bugs, ["42"]);
}
