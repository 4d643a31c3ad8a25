use async_trait::async_trait;
use std::error::Error as StdError;
use std::fmt;

use crate::api::{ChatMessage, ChatRequest, ChatResponse};
use crate::core::credentials::Credential;

/// Failures of a single completion round trip.
#[derive(Debug)]
pub enum CompletionError {
    /// The request never produced an HTTP response.
    Transport(reqwest::Error),
    /// The service answered with a non-success status.
    Status { status: u16, detail: String },
    /// The response body was not a chat completion.
    Decode(String),
    /// The response carried no choice with content.
    EmptyResponse,
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::Transport(err) => write!(f, "request failed: {err}"),
            CompletionError::Status { status, detail } => {
                write!(f, "API request failed with status {status}: {detail}")
            }
            CompletionError::Decode(detail) => write!(f, "unexpected API response: {detail}"),
            CompletionError::EmptyResponse => write!(f, "API response contained no reply"),
        }
    }
}

impl StdError for CompletionError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CompletionError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

/// The remote completion capability: maps a model identifier and an ordered
/// conversation to one assistant reply.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        credential: &Credential,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, CompletionError>;
}

/// `CompletionClient` speaking the OpenAI chat completions protocol.
pub struct HttpCompletionClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCompletionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(
        &self,
        credential: &Credential,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: model.to_string(),
            messages: messages.to_vec(),
            stream: false,
        };

        let url = self.endpoint();
        tracing::debug!(%url, model, messages = messages.len(), "sending completion request");

        let response = self
            .client
            .post(url.as_str())
            .header("Content-Type", "application/json")
            .bearer_auth(&credential.api_key)
            .json(&request)
            .send()
            .await
            .map_err(CompletionError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(CompletionError::Transport)?;

        if !status.is_success() {
            return Err(CompletionError::Status {
                status: status.as_u16(),
                detail: summarize_error_body(&body),
            });
        }

        extract_reply(&body)
    }
}

/// Pull the first choice's content out of a completion body.
pub(crate) fn extract_reply(body: &str) -> Result<String, CompletionError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|err| CompletionError::Decode(err.to_string()))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(CompletionError::EmptyResponse)
}

/// One-line description of an error body: the `error.message` field when
/// the body is a JSON error object, otherwise the collapsed raw text.
pub(crate) fn summarize_error_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let summary = serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .or_else(|| value.get("error").filter(|v| v.is_string()))
                .or_else(|| value.get("message"))
                .and_then(|v| v.as_str())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| trimmed.to_string());

    summary.split_whitespace().collect::<Vec<_>>().join(" ")
}
