//! Backends, one per wire protocol.
//!
//! The client turns every resolved [`ProviderRequestConfig`] into a boxed
//! [`ProviderBackend`] and tries them in order.

pub mod gemini;
pub mod openai;

pub use gemini::{GeminiBackend, GeminiChatResponse};
pub use openai::{OpenAiChatResponse, OpenAiCompatibleBackend};

use super::config::{Provider, ProviderFamily, ProviderRequestConfig};
use super::prompt::Conversation;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Why a single provider attempt failed.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("{0}")]
    Reported(String),

    #[error("AI response came back empty")]
    EmptyResponse,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[async_trait]
pub trait ProviderBackend: Send + Sync {
    fn provider(&self) -> Provider;

    /// One request, one reply. No retries.
    async fn complete(&self, http: &Client, conversation: &Conversation) -> ProviderResult<String>;
}

pub fn backend_for(target: ProviderRequestConfig) -> Box<dyn ProviderBackend> {
    match target.provider.family() {
        ProviderFamily::Gemini => Box::new(GeminiBackend::new(target)),
        ProviderFamily::OpenAiCompatible => Box::new(OpenAiCompatibleBackend::new(target)),
    }
}

/// Successful payload, tagged by protocol family.
#[derive(Debug)]
pub enum ProviderReply {
    OpenAi(OpenAiChatResponse),
    Gemini(GeminiChatResponse),
}

impl ProviderReply {
    /// Plain reply text, or `None` when nothing usable came back.
    pub fn into_text(self) -> Option<String> {
        match self {
            ProviderReply::OpenAi(response) => openai::extract_text(response),
            ProviderReply::Gemini(response) => gemini::extract_text(response),
        }
    }
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ApiErrorDetail>,
}

fn reported_error(body: &str) -> Option<Option<String>> {
    let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok()?;
    envelope.error.map(|detail| detail.message)
}

/// Sends the request and decodes a successful body.
///
/// Non-2xx statuses and `{"error": ...}` payloads become errors carrying the
/// provider's own message when it has one.
pub(crate) async fn send_json<R: DeserializeOwned>(request: RequestBuilder) -> ProviderResult<R> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = reported_error(&body)
            .flatten()
            .unwrap_or_else(|| format!("AI request failed ({})", status.as_u16()));
        return Err(ProviderError::Http {
            status: status.as_u16(),
            message,
        });
    }

    if let Some(message) = reported_error(&body) {
        return Err(ProviderError::Reported(message.unwrap_or_else(|| {
            "AI provider reported an error".to_string()
        })));
    }

    Ok(serde_json::from_str(&body)?)
}

/// Trims each piece, drops empty ones and joins the rest with newlines.
pub(crate) fn join_text_parts<I>(parts: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    let text = parts
        .into_iter()
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    (!text.is_empty()).then_some(text)
}
