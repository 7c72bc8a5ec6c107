//! Reqwest clients for the OpenAI embeddings and chat completions endpoints.
//!
//! Both clients speak the stock OpenAI wire format, so any compatible server
//! works through `with_base_url`. HTTP 429 maps to the rate-limit error
//! variants; everything else non-2xx maps to a provider error carrying the
//! message from the error body when one decodes.

mod chat;
mod embedding;

use std::time::Duration;

use reqwest::header::HeaderMap;
use serde::Deserialize;

pub use chat::OpenAiChat;
pub use embedding::OpenAiEmbedding;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorDetail {
    message: String,
}

/// Seconds-valued `Retry-After` as sent by the OpenAI endpoints. The
/// HTTP-date form is rare enough there that we do not bother with it.
pub(crate) fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get("Retry-After")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
        .map(Duration::from_secs)
}

pub(crate) fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiErrorResponse>(body)
        .map(|decoded| decoded.error.message)
        .unwrap_or_else(|_| format!("HTTP {status}: {body}"))
}
