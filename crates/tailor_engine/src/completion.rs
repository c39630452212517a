use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::CompletionSettings;

#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the trimmed text generated for `prompt`.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct CompletionError {
    pub kind: CompletionFailure,
    pub message: String,
}

impl CompletionError {
    pub(crate) fn new(kind: CompletionFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionFailure {
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedResponse,
    EmptyResponse,
}

impl fmt::Display for CompletionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionFailure::HttpStatus(code) => write!(f, "http status {code}"),
            CompletionFailure::Timeout => write!(f, "timeout"),
            CompletionFailure::Network => write!(f, "network error"),
            CompletionFailure::MalformedResponse => write!(f, "malformed response"),
            CompletionFailure::EmptyResponse => write!(f, "empty response"),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenAiCompletionClient {
    settings: CompletionSettings,
    client: reqwest::Client,
}

const ERROR_BODY_LIMIT: usize = 300;

impl OpenAiCompletionClient {
    pub fn new(settings: CompletionSettings) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| CompletionError::new(CompletionFailure::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let body = ChatRequest {
            model: &self.settings.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.settings.temperature,
        };

        let response = self
            .client
            .post(&self.settings.endpoint)
            .bearer_auth(self.settings.api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(CompletionError::new(
                CompletionFailure::HttpStatus(status.as_u16()),
                truncate(detail.trim(), ERROR_BODY_LIMIT),
            ));
        }

        let parsed: ChatResponse = response.json().await.map_err(|err| {
            if err.is_timeout() {
                map_reqwest_error(err)
            } else {
                CompletionError::new(CompletionFailure::MalformedResponse, err.to_string())
            }
        })?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();
        if text.is_empty() {
            return Err(CompletionError::new(
                CompletionFailure::EmptyResponse,
                "model returned no text",
            ));
        }
        Ok(text)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        return CompletionError::new(CompletionFailure::Timeout, err.to_string());
    }
    CompletionError::new(CompletionFailure::Network, err.to_string())
}

fn truncate(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        return text.to_string();
    }
    let mut end = limit;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
