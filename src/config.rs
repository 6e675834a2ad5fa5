//! Application configuration.
//!
//! All externally supplied values are gathered here once, after `dotenv`,
//! and injected into the components that need them. Nothing else in the
//! crate reads the process environment.

use std::env;
use std::time::Duration;

/// Fallback for the chat API when `CHATBOT_API_URL` is unset.
pub const DEFAULT_CHAT_API_URL: &str = "http://localhost:8000";

/// Fallback for the document generator when `DOC_GENERATOR_URL` is unset.
pub const DEFAULT_DOC_GENERATOR_URL: &str = "http://localhost:8501";

/// Fallback for the document summariser when `DOC_SUMMARISER_URL` is unset.
pub const DEFAULT_DOC_SUMMARISER_URL: &str = "https://example.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the chat API; the client appends `/api/chat`.
    pub chat_api_url: String,
    /// Companion document-generator tool, shown by `/links`.
    pub doc_generator_url: String,
    /// Companion document-summariser tool, shown by `/links`.
    pub doc_summariser_url: String,
    /// Per-request timeout. `None` (the default) means the transport waits
    /// indefinitely on the one attempt it makes.
    pub request_timeout: Option<Duration>,
}

impl AppConfig {
    /// Load configuration from environment variables with fallbacks.
    pub fn from_env() -> Self {
        Self {
            chat_api_url: env::var("CHATBOT_API_URL")
                .unwrap_or_else(|_| DEFAULT_CHAT_API_URL.to_string()),
            doc_generator_url: env::var("DOC_GENERATOR_URL")
                .unwrap_or_else(|_| DEFAULT_DOC_GENERATOR_URL.to_string()),
            doc_summariser_url: env::var("DOC_SUMMARISER_URL")
                .unwrap_or_else(|_| DEFAULT_DOC_SUMMARISER_URL.to_string()),
            request_timeout: env::var("CHAT_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .map(Duration::from_secs),
        }
    }
}
