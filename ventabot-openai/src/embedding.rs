use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use ventabot_core::{Embedding, EmbeddingError};

use crate::{error_message, retry_after, OPENAI_BASE_URL, REQUEST_TIMEOUT};

#[derive(Clone)]
pub struct OpenAiEmbedding {
    base_url: String,
    api_key: SecretString,
    model: String,
    dimension: usize,
    http: Client,
}

impl OpenAiEmbedding {
    pub fn new(
        api_key: SecretString,
        model: impl Into<String>,
        dimension: usize,
    ) -> Result<Self, EmbeddingError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| EmbeddingError::Other(Box::new(err)))?;
        Ok(Self {
            base_url: OPENAI_BASE_URL.to_string(),
            api_key,
            model: model.into(),
            dimension,
            http,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn embeddings_url(&self) -> String {
        format!("{}/embeddings", self.base_url.trim_end_matches('/'))
    }

    async fn request_embeddings(&self, inputs: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let expected = inputs.len();
        let request = EmbeddingsRequest {
            model: &self.model,
            input: inputs,
        };

        let response = self
            .http
            .post(self.embeddings_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    EmbeddingError::Timeout(REQUEST_TIMEOUT)
                } else {
                    EmbeddingError::Provider(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(EmbeddingError::RateLimited {
                    retry_after: retry_after(response.headers()),
                });
            }
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Provider(error_message(status, &body)));
        }

        let decoded = response
            .json::<EmbeddingsResponse>()
            .await
            .map_err(|err| EmbeddingError::InvalidResponse(err.to_string()))?;

        if decoded.data.len() != expected {
            return Err(EmbeddingError::InvalidResponse(format!(
                "expected {} embeddings, got {}",
                expected,
                decoded.data.len()
            )));
        }

        let mut output = Vec::with_capacity(decoded.data.len());
        for item in decoded.data {
            if item.embedding.len() != self.dimension {
                return Err(EmbeddingError::InvalidResponse(format!(
                    "expected embedding dimension {}, got {}",
                    self.dimension,
                    item.embedding.len()
                )));
            }
            output.push(item.embedding);
        }
        Ok(output)
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    embedding: Vec<f32>,
}

#[async_trait]
impl Embedding for OpenAiEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vectors = self.request_embeddings(vec![text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| EmbeddingError::InvalidResponse("missing embedding".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request_embeddings(texts.to_vec()).await
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
