//! General run configuration.

use rn_core::WorkItemKind;
use serde::{Deserialize, Serialize};

fn default_desired_types() -> String {
    WorkItemKind::default_sections()
        .iter()
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

const fn default_summarize() -> bool {
    true
}

fn default_log_level() -> String {
    String::from("warn")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Comma-separated parent kinds, in section order.
    #[serde(default = "default_desired_types", deserialize_with = "crate::de::text")]
    pub desired_types: String,

    /// Summarize each work item with the model.
    #[serde(default = "default_summarize")]
    pub summarize: bool,

    /// Default tracing filter when `RELNOTES_LOG` is unset.
    #[serde(default = "default_log_level", deserialize_with = "crate::de::text")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            desired_types: default_desired_types(),
            summarize: default_summarize(),
            log_level: default_log_level(),
        }
    }
}

impl GeneralConfig {
    /// Section kinds in order, deduplicated, always ending with `Other`
    /// unless it was listed explicitly.
    #[must_use]
    pub fn sections(&self) -> Vec<String> {
        let mut sections: Vec<String> = Vec::new();
        for kind in self.desired_types.split(',').map(str::trim) {
            if !kind.is_empty() && !sections.iter().any(|s| s == kind) {
                sections.push(kind.to_string());
            }
        }
        let other = WorkItemKind::Other.as_str();
        if !sections.iter().any(|s| s == other) {
            sections.push(other.to_string());
        }
        sections
    }
}
