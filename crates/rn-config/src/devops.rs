//! Work-item tracker (Azure DevOps) configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    String::from("https://dev.azure.com")
}

fn default_api_version() -> String {
    String::from("6.0")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DevOpsConfig {
    /// Tracker base URL, without organization.
    #[serde(default = "default_base_url", deserialize_with = "crate::de::text")]
    pub base_url: String,

    /// REST API version sent as `api-version`.
    #[serde(default = "default_api_version", deserialize_with = "crate::de::text")]
    pub api_version: String,

    /// Organization name.
    #[serde(default, deserialize_with = "crate::de::text")]
    pub org: String,

    /// Project name.
    #[serde(default, deserialize_with = "crate::de::text")]
    pub project: String,

    /// Id of the saved query listing the release's work items.
    #[serde(default, deserialize_with = "crate::de::text")]
    pub query: String,

    /// Personal access token.
    #[serde(default, deserialize_with = "crate::de::text")]
    pub pat: String,
}

impl Default for DevOpsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_api_version(),
            org: String::new(),
            project: String::new(),
            query: String::new(),
            pat: String::new(),
        }
    }
}

impl DevOpsConfig {
    /// Names of required fields that are still empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("base_url", &self.base_url),
            ("api_version", &self.api_version),
            ("org", &self.org),
            ("project", &self.project),
            ("query", &self.query),
            ("pat", &self.pat),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = DevOpsConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.base_url, "https://dev.azure.com");
        assert_eq!(config.api_version, "6.0");
        assert_eq!(
            config.missing_fields(),
            vec!["org", "project", "query", "pat"]
        );
    }

    #[test]
    fn configured_when_all_fields_set() {
        let config = DevOpsConfig {
            org: "contoso".into(),
            project: "Web Shop".into(),
            query: "6b4c1f2e".into(),
            pat: "secret".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }

    #[test]
    fn whitespace_counts_as_missing() {
        let config = DevOpsConfig {
            org: "contoso".into(),
            project: "  ".into(),
            query: "q".into(),
            pat: "p".into(),
            ..Default::default()
        };
        assert_eq!(config.missing_fields(), vec!["project"]);
    }
}
