use ventabot_rag::{ChainError, Responder};

use crate::catalog::Catalog;
use crate::rules;

/// Session-ending keywords, matched case-insensitively against the whole
/// trimmed line.
pub const FAREWELL_KEYWORDS: [&str; 3] = ["salir", "exit", "quit"];

#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    /// Session over; print the goodbye and stop reading.
    Farewell,
    /// Blank input; re-prompt without answering.
    Empty,
    /// Answered from the catalog, no remote call made.
    Local(String),
    /// Answered by the retrieval chain.
    Remote(String),
    /// The chain was rate limited; warn and keep the session alive.
    RateLimited,
}

/// Resolves one line of input at a time. Farewell and blank lines are
/// handled first, then the local rules, then the chain.
pub struct ChatSession {
    catalog: Catalog,
    responder: Box<dyn Responder>,
}

impl ChatSession {
    pub fn new(catalog: Catalog, responder: impl Responder + 'static) -> Self {
        Self {
            catalog,
            responder: Box::new(responder),
        }
    }

    /// Rate limits are recoverable and become [`Reply::RateLimited`]; any
    /// other chain failure is returned to the caller, which by policy ends
    /// the session.
    pub async fn handle(&self, line: &str) -> Result<Reply, ChainError> {
        let question = line.trim();
        if question.is_empty() {
            return Ok(Reply::Empty);
        }
        if FAREWELL_KEYWORDS
            .iter()
            .any(|keyword| question.eq_ignore_ascii_case(keyword))
        {
            return Ok(Reply::Farewell);
        }

        if let Some(answer) = rules::resolve(question, &self.catalog) {
            return Ok(Reply::Local(answer));
        }

        match self.responder.respond(question).await {
            Ok(answer) => Ok(Reply::Remote(answer)),
            Err(err) if err.is_rate_limited() => {
                tracing::warn!(error = %err, "chain rate limited, dropping this question");
                Ok(Reply::RateLimited)
            }
            Err(err) => Err(err),
        }
    }
}
