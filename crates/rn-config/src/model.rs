//! Chat-completion model configuration for summaries.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    String::from("https://api.openai.com/v1")
}

fn default_model() -> String {
    String::from("gpt-4o")
}

const fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// OpenAI-compatible API base; `/chat/completions` is appended.
    #[serde(default = "default_base_url", deserialize_with = "crate::de::text")]
    pub base_url: String,

    #[serde(default = "default_model", deserialize_with = "crate::de::text")]
    pub model: String,

    #[serde(default, deserialize_with = "crate::de::text")]
    pub api_key: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ModelConfig {
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("base_url", &self.base_url),
            ("model", &self.model),
            ("api_key", &self.api_key),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
