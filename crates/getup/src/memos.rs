//! Posts memos to a Memos server.

use anyhow::{Context as _, Result};
use reqwest::StatusCode;
use serde::Serialize;

use crate::config::Credentials;
use crate::message::Message;
use crate::version::user_agent;

/// Path of the memo creation endpoint.
pub const MEMOS_API_PATH: &str = "/api/v1/memos";

/// Outcome of a publish attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishResult {
    /// Credentials were not configured; nothing was sent.
    Skipped,
    Success,
    /// `status` is `None` when the request never got a response.
    Failure {
        status: Option<u16>,
        detail: String,
    },
}

#[derive(Serialize)]
struct CreateMemoRequest<'a> {
    content: &'a str,
}

pub struct MemosClient {
    http_client: reqwest::Client,
}

impl MemosClient {
    pub fn new() -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(user_agent())
            .build()
            .context("Failed to create HTTP client for Memos")?;

        Ok(Self { http_client })
    }

    /// Creates a memo holding `message`.
    ///
    /// Never fails; every outcome is reported through [`PublishResult`].
    pub async fn publish(
        &self,
        credentials: Option<&Credentials>,
        message: &Message,
    ) -> PublishResult {
        let Some(credentials) = credentials else {
            return PublishResult::Skipped;
        };

        let url = normalize_memos_url(&credentials.url);
        tracing::debug!(url = %url, "Posting memo");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&credentials.token)
            .json(&CreateMemoRequest {
                content: message.as_str(),
            })
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                return PublishResult::Failure {
                    status: None,
                    detail: e.to_string(),
                };
            }
        };

        let status = response.status();
        if status == StatusCode::OK {
            return PublishResult::Success;
        }

        let detail = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read body: {e}>"));

        PublishResult::Failure {
            status: Some(status.as_u16()),
            detail,
        }
    }
}

/// Makes sure `url` points at the memo creation endpoint.
pub fn normalize_memos_url(url: &str) -> String {
    if url.ends_with(MEMOS_API_PATH) {
        url.to_string()
    } else {
        format!("{}{}", url.trim_end_matches('/'), MEMOS_API_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::ProgressBar;
    use crate::message::{MessageParts, compose};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_message() -> Message {
        compose(&MessageParts {
            timestamp: "2025-04-10 06:30:00",
            day_of_year: 100,
            progress_bar: ProgressBar::new(100, 365),
            quote: "春眠不觉晓",
        })
    }

    fn credentials_for(url: String) -> Credentials {
        Credentials {
            url,
            token: "test-token".to_string(),
        }
    }

    #[test]
    fn normalize_appends_api_path() {
        assert_eq!(
            normalize_memos_url("https://host.example"),
            "https://host.example/api/v1/memos"
        );
    }

    #[test]
    fn normalize_keeps_existing_api_path() {
        assert_eq!(
            normalize_memos_url("https://host.example/api/v1/memos"),
            "https://host.example/api/v1/memos"
        );
    }

    #[test]
    fn normalize_strips_trailing_slash() {
        assert_eq!(
            normalize_memos_url("https://host.example/"),
            "https://host.example/api/v1/memos"
        );
        assert_eq!(
            normalize_memos_url("https://host.example/memos//"),
            "https://host.example/memos/api/v1/memos"
        );
    }

    #[tokio::test]
    async fn skips_without_credentials() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = MemosClient::new().unwrap();
        let result = client.publish(None, &sample_message()).await;

        assert_eq!(result, PublishResult::Skipped);
    }

    #[tokio::test]
    async fn posts_content_with_bearer_token() {
        let mock_server = MockServer::start().await;
        let message = sample_message();

        Mock::given(method("POST"))
            .and(path("/api/v1/memos"))
            .and(header("authorization", "Bearer test-token"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "content": message.as_str() })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "memos/1"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = MemosClient::new().unwrap();
        let credentials = credentials_for(mock_server.uri());
        let result = client.publish(Some(&credentials), &message).await;

        assert_eq!(result, PublishResult::Success);
    }

    #[tokio::test]
    async fn already_normalized_url_is_used_as_is() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/memos"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = MemosClient::new().unwrap();
        let credentials = credentials_for(format!("{}/api/v1/memos", mock_server.uri()));
        let result = client.publish(Some(&credentials), &sample_message()).await;

        assert_eq!(result, PublishResult::Success);
    }

    #[tokio::test]
    async fn error_status_is_reported_with_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthenticated"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = MemosClient::new().unwrap();
        let credentials = credentials_for(mock_server.uri());
        let result = client.publish(Some(&credentials), &sample_message()).await;

        assert_eq!(
            result,
            PublishResult::Failure {
                status: Some(401),
                detail: "unauthenticated".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn only_200_counts_as_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&mock_server)
            .await;

        let client = MemosClient::new().unwrap();
        let credentials = credentials_for(mock_server.uri());
        let result = client.publish(Some(&credentials), &sample_message()).await;

        assert!(matches!(
            result,
            PublishResult::Failure {
                status: Some(201),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn transport_error_is_reported() {
        let client = MemosClient::new().unwrap();
        // Nothing listens on the discard port.
        let credentials = credentials_for("http://127.0.0.1:9".to_string());
        let result = client.publish(Some(&credentials), &sample_message()).await;

        assert!(matches!(
            result,
            PublishResult::Failure { status: None, .. }
        ));
    }
}
