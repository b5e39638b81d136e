//! Reasoning service client
//!
//! The verification pipeline only needs "prompt in, text out". [`TextReasoner`] is that
//! capability; [`GatewayReasoner`] implements it against an OpenAI-compatible
//! chat-completions endpoint.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::service::prompts::ReasoningPrompt;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ReasonerError {
    #[error("Reasoning service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No content in reasoning service response")]
    EmptyReply,

    #[error("Invalid API key header: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

/// Text generation capability used for cross-referencing
#[async_trait]
pub trait TextReasoner: Send + Sync {
    async fn generate(&self, prompt: &ReasoningPrompt) -> Result<String, ReasonerError>;

    /// Model identifier, for logging
    fn model(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions client for an OpenAI-compatible AI gateway
#[derive(Clone)]
pub struct GatewayReasoner {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GatewayReasoner {
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        tracing::info!(model = %model, "Reasoning client initialized");
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    fn headers(&self) -> Result<HeaderMap, ReasonerError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    fn request_body<'a>(&'a self, prompt: &'a ReasoningPrompt) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
        }
    }
}

/// First choice's message content, if the reply has any
fn reply_content(response: ChatResponse) -> Result<String, ReasonerError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|content| !content.is_empty())
        .ok_or(ReasonerError::EmptyReply)
}

#[async_trait]
impl TextReasoner for GatewayReasoner {
    async fn generate(&self, prompt: &ReasoningPrompt) -> Result<String, ReasonerError> {
        let url = format!("{}/chat/completions", self.base_url);

        tracing::debug!(
            model = %self.model,
            prompt_length = prompt.user.len(),
            "Sending verification request to reasoning service"
        );

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status, body = %body, "Reasoning service error");
            return Err(ReasonerError::Status { status, body });
        }

        let chat: ChatResponse = response.json().await?;
        tracing::debug!(choices = chat.choices.len(), "Reasoning response received");

        reply_content(chat)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
