//! # rn-llm
//!
//! Summaries through an OpenAI-compatible chat-completion endpoint.
//!
//! [`ChatClient`] sends one system prompt plus the text to condense and
//! returns the first choice, trimmed. It implements [`rn_core::Summarizer`].

mod error;
mod prompts;

pub use error::LlmError;
pub use prompts::Prompts;

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use rn_config::{ModelConfig, ReleaseConfig};
use rn_core::{PromptKind, Summarizer};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completion client bound to one model and one release.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    url: String,
    model: String,
    prompts: Prompts,
}

impl ChatClient {
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] when no key is configured,
    /// [`LlmError::Settings`] when the key is not a valid header value and
    /// [`LlmError::Http`] if the underlying client fails to build.
    pub fn new(model: &ModelConfig, release: &ReleaseConfig) -> Result<Self, LlmError> {
        let key = model.api_key.trim();
        if key.is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|e| LlmError::Settings(format!("invalid API key header: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .user_agent("relnotes/0.1")
            .default_headers(headers)
            .timeout(Duration::from_secs(model.timeout_secs.max(1)))
            .build()?;

        Ok(Self {
            http,
            url: chat_completions_url(&model.base_url),
            model: model.model.clone(),
            prompts: Prompts::new(&release.name, &release.brief),
        })
    }

    /// Send `text` under the system prompt for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError`] on transport failure, a non-success status, or
    /// a response without choices.
    pub async fn complete(&self, kind: PromptKind, text: &str) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: self.prompts.system(kind),
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
        };

        let resp = self.http.post(&self.url).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        let data: ChatResponse = resp.json().await?;
        let answer = data
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyResponse)?
            .message
            .content
            .unwrap_or_default();
        tracing::debug!(%kind, chars = answer.len(), "summary received");
        Ok(answer.trim().to_string())
    }
}

impl Summarizer for ChatClient {
    type Error = LlmError;

    async fn summarize(&self, kind: PromptKind, text: &str) -> Result<String, LlmError> {
        self.complete(kind, text).await
    }
}

fn chat_completions_url(base: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.ends_with("/chat/completions") {
        return base.to_string();
    }
    format!("{base}/chat/completions")
}
