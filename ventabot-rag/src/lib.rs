//! Retrieval-augmented question answering.
//!
//! [`RetrievalQa`] wires a [`Retriever`] and a [`ChatLlm`] together: the
//! question is embedded, the closest documents are stuffed into a prompt,
//! and the model answers from that context alone.

mod prompt;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use ventabot_core::{ChatLlm, EmbeddingError, LlmError, LlmRequest, Message, Role, Value};
use ventabot_retrieval::{RetrievalError, Retriever};

pub use prompt::{PromptError, PromptTemplate};

/// System message sent with every question.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an assistant for a sales team. \
Answer using only the provided sales records. \
If the records do not contain the answer, say you do not know.";

/// Stuff-style user prompt. Expects `{{context}}` and `{{question}}`.
pub const DEFAULT_QA_PROMPT: &str = "\
Use the following sales records to answer the question at the end.

{{context}}

Question: {{question}}
Answer:";

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("chain config error: {0}")]
    Config(String),
    #[error("prompt error: {0}")]
    Prompt(#[from] PromptError),
    #[error("retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),
    #[error("llm error: {0}")]
    Llm(#[from] LlmError),
}

impl ChainError {
    /// True when the underlying failure was a provider rate limit, on
    /// either the query-embedding hop or the completion hop.
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            ChainError::Llm(LlmError::RateLimited { .. })
                | ChainError::Retrieval(RetrievalError::Embedding(
                    EmbeddingError::RateLimited { .. }
                ))
        )
    }
}

/// Anything that can answer a free-form question.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, question: &str) -> Result<String, ChainError>;
}

pub struct RetrievalQa {
    retriever: Retriever,
    llm: Arc<dyn ChatLlm>,
    prompt: PromptTemplate,
    system_prompt: String,
}

impl std::fmt::Debug for RetrievalQa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievalQa")
            .field("prompt", &self.prompt)
            .field("system_prompt", &self.system_prompt)
            .finish_non_exhaustive()
    }
}

impl RetrievalQa {
    pub fn builder() -> RetrievalQaBuilder {
        RetrievalQaBuilder::default()
    }
}

#[async_trait]
impl Responder for RetrievalQa {
    async fn respond(&self, question: &str) -> Result<String, ChainError> {
        let results = self.retriever.retrieve(question).await?;
        let sources: Vec<&str> = results
            .iter()
            .map(|result| result.document.id.as_str())
            .collect();
        let scores: Vec<f32> = results.iter().map(|result| result.score).collect();
        tracing::debug!(?sources, ?scores, "retrieved context documents");

        let context = results
            .iter()
            .map(|result| result.document.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let mut vars = HashMap::new();
        vars.insert("context".to_string(), Value::from(context));
        vars.insert("question".to_string(), Value::from(question));
        let rendered = self.prompt.render(&vars)?;

        let request = LlmRequest {
            model: String::new(),
            messages: vec![
                Message {
                    role: Role::System,
                    content: self.system_prompt.clone(),
                },
                Message {
                    role: Role::User,
                    content: rendered,
                },
            ],
            temperature: Some(0.0),
            max_tokens: None,
        };
        let response = self.llm.complete(request).await?;
        Ok(response.content.trim().to_string())
    }
}

#[derive(Default)]
pub struct RetrievalQaBuilder {
    retriever: Option<Retriever>,
    llm: Option<Arc<dyn ChatLlm>>,
    prompt: Option<PromptTemplate>,
    system_prompt: Option<String>,
}

impl RetrievalQaBuilder {
    pub fn retriever(mut self, retriever: Retriever) -> Self {
        self.retriever = Some(retriever);
        self
    }

    pub fn llm<L: ChatLlm + 'static>(mut self, llm: L) -> Self {
        self.llm = Some(Arc::new(llm));
        self
    }

    pub fn prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = Some(prompt);
        self
    }

    pub fn system_prompt(mut self, value: impl Into<String>) -> Self {
        self.system_prompt = Some(value.into());
        self
    }

    pub fn build(self) -> Result<RetrievalQa, ChainError> {
        let retriever = self
            .retriever
            .ok_or_else(|| ChainError::Config("retriever is required".to_string()))?;
        let llm = self
            .llm
            .ok_or_else(|| ChainError::Config("llm is required".to_string()))?;
        let prompt = self
            .prompt
            .unwrap_or_else(|| PromptTemplate::new(DEFAULT_QA_PROMPT));
        let placeholders = prompt.placeholders()?;
        for required in ["context", "question"] {
            if !placeholders.iter().any(|name| name == required) {
                return Err(ChainError::Config(format!(
                    "prompt is missing required placeholder {required:?}"
                )));
            }
        }

        Ok(RetrievalQa {
            retriever,
            llm,
            prompt,
            system_prompt: self
                .system_prompt
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        })
    }
}
