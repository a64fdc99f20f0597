//! Answer generation through an OpenAI-compatible chat-completion endpoint.

use crate::config::LlmSettings;
use crate::error::Result;
use crate::openai::create_http_client;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Prefix on every user-facing failure message.
pub const WARNING_MARKER: &str = "⚠";

/// One message of a chat-completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Why an answer could not be produced.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnswerError {
    /// Transport failure, timeout or non-success HTTP status.
    #[error("Network error: {0}")]
    Network(String),

    /// The endpoint answered, but not with `choices[0].message.content`.
    #[error("API response error: {0}")]
    MalformedResponse(String),

    #[error("Error calling the language model: {0}")]
    Other(String),
}

impl AnswerError {
    /// Text shown to the user in place of an answer.
    pub fn user_message(&self) -> String {
        format!("{} {}", WARNING_MARKER, self)
    }

    fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AnswerError::Network(format!("request timed out: {}", e))
        } else {
            AnswerError::Network(e.to_string())
        }
    }
}

/// The user message for a question and its retrieved context.
pub fn user_message(question: &str, context: &str) -> String {
    format!("Question: {}\n\nContext:\n{}", question, context)
}

/// Persona system message followed by the question/context message.
pub fn build_messages(system_prompt: &str, question: &str, context: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt),
        ChatMessage::user(user_message(question, context)),
    ]
}

/// Pull `choices[0].message.content` out of a completion response body.
fn extract_content(body: &str) -> std::result::Result<String, AnswerError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| AnswerError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let missing = |key: &str| AnswerError::MalformedResponse(format!("Missing key '{}'", key));

    let choices = value
        .get("choices")
        .and_then(Value::as_array)
        .ok_or_else(|| missing("choices"))?;
    let first = choices.first().ok_or_else(|| missing("choices[0]"))?;
    let message = first.get("message").ok_or_else(|| missing("message"))?;
    message
        .get("content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| missing("content"))
}

/// Anything that can answer a question given a context string.
#[async_trait]
pub trait Answerer: Send + Sync {
    async fn answer(&self, question: &str, context: &str) -> std::result::Result<String, AnswerError>;
}

/// Stateless chat-completion client: each call carries only the current question.
pub struct AnswerService {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    api_key_env: String,
    model: String,
    max_tokens: u32,
    temperature: Option<f32>,
    system_prompt: String,
}

impl AnswerService {
    /// Create a service from settings, reading the API key from the environment.
    pub fn new(settings: &LlmSettings, system_prompt: &str) -> Result<Self> {
        let client = create_http_client(Duration::from_secs(settings.timeout_secs))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", settings.api_base.trim_end_matches('/')),
            api_key: settings.api_key(),
            api_key_env: settings.api_key_env.clone(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            system_prompt: system_prompt.to_string(),
        })
    }

    /// Override the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Answerer for AnswerService {
    /// Send one completion request. No retries.
    #[instrument(skip(self, context), fields(model = %self.model, context_len = context.len()))]
    async fn answer(&self, question: &str, context: &str) -> std::result::Result<String, AnswerError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AnswerError::Other(format!("API key not configured (set {})", self.api_key_env))
        })?;

        let messages = build_messages(&self.system_prompt, question, context);
        let request = CompletionRequest {
            model: &self.model,
            messages: &messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        info!("Requesting completion from {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(AnswerError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Completion endpoint returned {}: {}", status, body);
            return Err(AnswerError::Network(format!(
                "{} from {}",
                status, self.endpoint
            )));
        }

        let body = response.text().await.map_err(AnswerError::from_reqwest)?;
        let answer = extract_content(&body)?;

        debug!("Received answer of {} chars", answer.len());
        Ok(answer)
    }
}
