use async_trait::async_trait;
use eyre::{eyre, Result};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};
use url::Url;

use crate::config::AppConfig;

/// Path of the chat endpoint, joined onto the configured base URL.
pub const CHAT_ENDPOINT_PATH: &str = "/api/chat";

/// Failure of a single question/answer exchange.
///
/// Every kind carries a human-diagnosable detail. The detail is for logs and
/// the diagnostic side channel only; it is never shown verbatim in the
/// conversation.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to reach chat endpoint: {0}")]
    Network(reqwest::Error),
    #[error("chat endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed chat response: {0}")]
    MalformedResponse(String),
}

/// The one seam through which questions leave the process.
#[async_trait]
pub trait QuestionTransport {
    /// Send one question and await one reply.
    ///
    /// Callers pass text that is already trimmed and non-empty; the session
    /// controller enforces that before dispatching.
    async fn send_question(&self, question: &str) -> Result<String, TransportError>;
}

#[derive(Deserialize)]
struct ChatReply {
    answer: String,
}

/// HTTP client for the NyayaSahaya chat API.
pub struct ChatClient {
    endpoint: Url,
    client: reqwest::Client,
}

impl ChatClient {
    /// Build a client against the configured base URL.
    ///
    /// Policy: one attempt per question, no retries. A timeout applies only
    /// when `request_timeout` is configured; otherwise the underlying
    /// transport's defaults are left alone.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let base = Url::parse(&config.chat_api_url)
            .map_err(|e| eyre!("invalid chat API URL {:?}: {}", config.chat_api_url, e))?;
        let endpoint = base
            .join(CHAT_ENDPOINT_PATH)
            .map_err(|e| eyre!("cannot build chat endpoint from {}: {}", base, e))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| eyre!("failed to build HTTP client: {}", e))?;

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl QuestionTransport for ChatClient {
    async fn send_question(&self, question: &str) -> Result<String, TransportError> {
        debug!("Sending question to {}", self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&json!({ "question": question }))
            .send()
            .await
            .map_err(TransportError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Chat endpoint returned {}: {}", status, body);
            return Err(TransportError::Status { status, body });
        }

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| TransportError::MalformedResponse(e.to_string()))?;

        debug!("Received answer ({} bytes)", reply.answer.len());
        Ok(reply.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CHAT_API_URL;

    fn config_with_url(url: &str) -> AppConfig {
        AppConfig {
            chat_api_url: url.to_string(),
            doc_generator_url: String::new(),
            doc_summariser_url: String::new(),
            request_timeout: None,
        }
    }

    #[test]
    fn endpoint_is_joined_onto_base_url() {
        let client = ChatClient::new(&config_with_url(DEFAULT_CHAT_API_URL)).unwrap();
        assert_eq!(client.endpoint().as_str(), "http://localhost:8000/api/chat");

        let client = ChatClient::new(&config_with_url("https://chat.nyayasahaya.example")).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://chat.nyayasahaya.example/api/chat"
        );
    }

    #[test]
    fn malformed_base_url_fails_construction() {
        assert!(ChatClient::new(&config_with_url("not a url")).is_err());
    }

    #[test]
    fn reply_decodes_answer_field() {
        let reply: ChatReply = serde_json::from_str(r#"{"answer": "Bail is..."}"#).unwrap();
        assert_eq!(reply.answer, "Bail is...");

        assert!(serde_json::from_str::<ChatReply>(r#"{"reply": "nope"}"#).is_err());
        assert!(serde_json::from_str::<ChatReply>("not json").is_err());
    }

    #[test]
    fn errors_render_diagnosable_detail() {
        let err = TransportError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("boom"));

        let err = TransportError::MalformedResponse("missing field `answer`".to_string());
        assert!(err.to_string().contains("answer"));
    }
}
