/// LLM Client — the single point of entry for model calls in PathPilot.
///
/// ARCHITECTURAL RULE: No other module may call the model service directly.
/// One request per analysis: no retries, no streaming.
///
/// Model: mistralai/mistral-7b-instruct:free via OpenRouter (hardcoded to prevent drift)
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{AnalysisError, Upstream};

const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
/// The model used for all analysis calls.
pub const MODEL: &str = "mistralai/mistral-7b-instruct:free";

/// A text-generation backend. `LlmClient` is the production implementation;
/// tests substitute canned replies.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Sends `prompt` as a single user message and returns the reply text.
    async fn complete(&self, prompt: &str) -> Result<String, AnalysisError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Wraps the OpenRouter chat-completions API.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl LlmClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build model HTTP client")?;
        Ok(Self {
            client,
            api_key,
            endpoint: OPENROUTER_API_URL.to_string(),
        })
    }

    /// Points the client at a local server, bypassing any system proxy.
    #[cfg(test)]
    fn with_endpoint(endpoint: String, api_key: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .unwrap();
        Self {
            client,
            api_key: api_key.to_string(),
            endpoint,
        }
    }
}

#[async_trait]
impl CompletionModel for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, AnalysisError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AnalysisError::transport(Upstream::Model, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::transport(Upstream::Model, e))?;

        if !status.is_success() {
            return Err(AnalysisError::UpstreamApi {
                upstream: Upstream::Model,
                status: Some(status.as_u16()),
                message: error_message(&body),
            });
        }

        let text = first_message_text(&body)?;
        debug!(
            model = MODEL,
            reply_len = text.len(),
            "Model call succeeded"
        );
        Ok(text)
    }
}

/// Pulls the readable message out of an error body, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

/// Extracts `choices[0].message.content` from a chat-completions body.
fn first_message_text(body: &str) -> Result<String, AnalysisError> {
    let malformed = |message: String| AnalysisError::UpstreamApi {
        upstream: Upstream::Model,
        status: None,
        message,
    };

    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| malformed(format!("undecodable response envelope: {e}")))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| malformed("response envelope has no message content".to_string()))
}
