use std::{error::Error as StdError, fmt, time::Duration};

use thiserror::Error;

/// Failure modes of a remote embedding provider. `RateLimited` is the only
/// kind the caller may treat as transient.
#[derive(Debug)]
pub enum EmbeddingError {
    InvalidResponse(String),
    RateLimited { retry_after: Option<Duration> },
    Timeout(Duration),
    Provider(String),
    Other(Box<dyn StdError + Send + Sync>),
}

impl fmt::Display for EmbeddingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingError::InvalidResponse(message) => {
                write!(f, "embedding invalid response: {message}")
            }
            EmbeddingError::RateLimited { retry_after } => match retry_after {
                Some(duration) => write!(f, "embedding rate limited (retry_after={duration:?})"),
                None => write!(f, "embedding rate limited (retry_after=unknown)"),
            },
            EmbeddingError::Timeout(duration) => write!(f, "embedding timeout after {duration:?}"),
            EmbeddingError::Provider(message) => write!(f, "embedding provider error: {message}"),
            EmbeddingError::Other(error) => write!(f, "embedding error: {error}"),
        }
    }
}

impl StdError for EmbeddingError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            EmbeddingError::Other(error) => Some(error.as_ref()),
            _ => None,
        }
    }
}

/// Failure modes of a hosted chat model, same taxonomy as [`EmbeddingError`]
/// so both remote hops classify rate limiting the same way.
#[derive(Debug)]
pub enum LlmError {
    InvalidResponse(String),
    RateLimited { retry_after: Option<Duration> },
    Timeout(Duration),
    Provider(String),
    Other(Box<dyn StdError + Send + Sync>),
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::InvalidResponse(message) => {
                write!(f, "llm invalid response: {message}")
            }
            LlmError::RateLimited { retry_after } => match retry_after {
                Some(duration) => write!(f, "llm rate limited (retry_after={duration:?})"),
                None => write!(f, "llm rate limited (retry_after=unknown)"),
            },
            LlmError::Timeout(duration) => write!(f, "llm timeout after {duration:?}"),
            LlmError::Provider(message) => write!(f, "llm provider error: {message}"),
            LlmError::Other(error) => write!(f, "llm error: {error}"),
        }
    }
}

impl StdError for LlmError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            LlmError::Other(error) => Some(error.as_ref()),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("invalid document id: {0}")]
    InvalidId(String),
    #[error("document '{id}' has no embedding")]
    MissingEmbedding { id: String },
}
