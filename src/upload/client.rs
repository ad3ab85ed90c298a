use std::fs;
use std::path::Path;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub token: String,
    pub filename: String,
    pub content: String,
    pub channels: Vec<String>,
}

impl UploadRequest {
    pub fn from_file(path: &Path, token: String, channels: Vec<String>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        Ok(Self {
            token,
            filename,
            content,
            channels,
        })
    }

    fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("token", self.token.clone()),
            ("filename", self.filename.clone()),
            ("content", self.content.clone()),
            ("channels", self.channels.join(",")),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// Server answered 200. The body is kept as JSON when it parses.
    Delivered(Body),
    Rejected { status: u16, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(serde_json::Value),
    Text(String),
}

impl UploadOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, UploadOutcome::Delivered(_))
    }

    pub fn render(&self) -> String {
        match self {
            UploadOutcome::Delivered(Body::Json(v)) => {
                serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
            }
            UploadOutcome::Delivered(Body::Text(t)) => t.clone(),
            UploadOutcome::Rejected { status, reason } => format!("Error: {} {}", status, reason),
        }
    }
}

/// One-shot form POST of a report; no retry and no validation of the fields.
pub struct Uploader {
    endpoint: String,
    client: Client,
}

impl Uploader {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("warnsum/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Transport failures are errors; any HTTP status is an outcome.
    pub fn send(&self, request: &UploadRequest) -> Result<UploadOutcome> {
        tracing::info!(
            "uploading {} ({} bytes) to {}",
            request.filename,
            request.content.len(),
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .form(&request.form_fields())
            .send()?;

        let status = response.status();
        tracing::debug!("upload response status {}", status);

        if status != StatusCode::OK {
            return Ok(UploadOutcome::Rejected {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let text = response.text()?;
        let body = match serde_json::from_str(&text) {
            Ok(v) => Body::Json(v),
            Err(_) => Body::Text(text),
        };
        Ok(UploadOutcome::Delivered(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> UploadRequest {
        UploadRequest {
            token: "xoxb-test".to_string(),
            filename: "report.txt".to_string(),
            content: "3 warnings".to_string(),
            channels: vec!["ci".to_string(), "web".to_string()],
        }
    }

    async fn send_blocking(endpoint: String, req: UploadRequest) -> UploadOutcome {
        tokio::task::spawn_blocking(move || {
            Uploader::new(endpoint)
                .expect("client")
                .send(&req)
                .expect("send")
        })
        .await
        .expect("join")
    }

    #[test]
    fn from_file_uses_file_name_component() {
        let td = tempdir().expect("tempdir");
        let p = td.path().join("lint-report.txt");
        std::fs::write(&p, "hello\n").expect("write");

        let req = UploadRequest::from_file(&p, "t".to_string(), vec!["a".to_string()]).expect("read");
        assert_eq!(req.filename, "lint-report.txt");
        assert_eq!(req.content, "hello\n");
    }

    #[test]
    fn from_file_missing_is_an_error() {
        let td = tempdir().expect("tempdir");
        assert!(UploadRequest::from_file(&td.path().join("missing.txt"), String::new(), Vec::new()).is_err());
    }

    #[test]
    fn rejected_renders_status_and_reason() {
        let outcome = UploadOutcome::Rejected {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(outcome.render(), "Error: 404 Not Found");
        assert!(!outcome.is_delivered());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn ok_response_is_delivered_as_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/files.upload"))
            .and(body_string_contains("token=xoxb-test"))
            .and(body_string_contains("filename=report.txt"))
            .and(body_string_contains("channels=ci%2Cweb"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true,"file":{"id":"F1"}}"#))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = send_blocking(format!("{}/api/files.upload", server.uri()), request()).await;

        assert_eq!(
            outcome,
            UploadOutcome::Delivered(Body::Json(serde_json::json!({"ok": true, "file": {"id": "F1"}})))
        );
        assert!(outcome.render().contains("\"ok\": true"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn ok_response_with_plain_body_is_kept_as_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("accepted"))
            .mount(&server)
            .await;

        let outcome = send_blocking(server.uri(), request()).await;
        assert_eq!(outcome, UploadOutcome::Delivered(Body::Text("accepted".to_string())));
        assert_eq!(outcome.render(), "accepted");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn non_ok_status_is_rejected_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let outcome = send_blocking(server.uri(), request()).await;
        assert_eq!(
            outcome,
            UploadOutcome::Rejected {
                status: 403,
                reason: "Forbidden".to_string()
            }
        );
    }
}
