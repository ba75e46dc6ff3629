//! Chat client for the local generative model service.
//!
//! This crate provides a Rust client to call an Ollama server over HTTP.
//! It handles:
//! - Building the two-message (system + user) chat request
//! - Sending it with streaming disabled and a bounded timeout
//! - Extracting the reply text from the response body
//!
//! Everything downstream talks to the [`ChatModel`] trait, so the analysis
//! crate can be tested with an in-process fake.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

/// Errors that can occur when talking to the model service
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Model service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Model service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from model service: {0}")]
    InvalidResponse(String),
}

/// A text model that answers a single system + user exchange.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send one exchange and return the raw reply text.
    ///
    /// # Arguments
    /// * `system` - Instructions framing the model's role
    /// * `user` - The request itself
    async fn chat(&self, system: &str, user: &str) -> Result<String, LlmError>;

    /// Model identifier, for logging
    fn model_name(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: String,
}

/// Client for an Ollama `/api/chat` endpoint.
#[derive(Clone)]
pub struct OllamaClient {
    http_client: HttpClient,
    base_url: String,
    model: String,
}

impl OllamaClient {
    /// Build a client for the given server and model.
    ///
    /// # Arguments
    /// * `base_url` - Server root (e.g., "http://localhost:11434")
    /// * `model` - Model tag (e.g., "deepseek-r1")
    /// * `timeout` - Upper bound for one exchange; reasoning models are slow
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        info!("Using model {} at {}", model, base_url);

        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            model,
        })
    }

    /// Get the address of the model server this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ChatModel for OllamaClient {
    async fn chat(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            stream: false,
        };

        debug!("POST {} (prompt {} chars)", url, user.len());
        let response = self.http_client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Model service returned {}: {}", status, body);
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let reply: ChatResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        debug!("Model replied with {} chars", reply.message.content.len());
        Ok(reply.message.content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
