use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use ventabot_core::{ChatLlm, LlmError, LlmRequest, LlmResponse};

use crate::{error_message, retry_after, OPENAI_BASE_URL, REQUEST_TIMEOUT};

#[derive(Clone)]
pub struct OpenAiChat {
    base_url: String,
    api_key: SecretString,
    model: String,
    http: Client,
}

impl OpenAiChat {
    pub fn new(api_key: SecretString, model: impl Into<String>) -> Result<Self, LlmError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| LlmError::Other(Box::new(err)))?;
        Ok(Self {
            base_url: OPENAI_BASE_URL.to_string(),
            api_key,
            model: model.into(),
            http,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl ChatLlm for OpenAiChat {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let mut request = request;
        if request.model.is_empty() {
            request.model = self.model.clone();
        }

        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    LlmError::Timeout(REQUEST_TIMEOUT)
                } else {
                    LlmError::Provider(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(LlmError::RateLimited {
                    retry_after: retry_after(response.headers()),
                });
            }
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Provider(error_message(status, &body)));
        }

        let decoded = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|err| LlmError::InvalidResponse(err.to_string()))?;

        let choice = decoded
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("missing choices".to_string()))?;

        Ok(LlmResponse {
            content: choice.message.content.unwrap_or_default(),
        })
    }
}
