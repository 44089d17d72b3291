//! Release identity.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReleaseConfig {
    /// Software (solution) name used in the document title and file name.
    #[serde(default, deserialize_with = "crate::de::text")]
    pub name: String,

    /// Release version, without the leading `v`.
    #[serde(default, deserialize_with = "crate::de::text")]
    pub version: String,

    /// Short description of the software, fed to the release overview prompt.
    #[serde(default, deserialize_with = "crate::de::text")]
    pub brief: String,
}

impl ReleaseConfig {
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [("name", &self.name), ("version", &self.version)]
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    /// Base name of the output files, e.g. `Shop-v1.4.0`.
    #[must_use]
    pub fn file_stem(&self) -> String {
        format!("{}-v{}", self.name.trim(), self.version.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stem_joins_name_and_version() {
        let release = ReleaseConfig {
            name: "Shop".into(),
            version: "1.4.0".into(),
            brief: String::new(),
        };
        assert_eq!(release.file_stem(), "Shop-v1.4.0");
        assert!(release.missing_fields().is_empty());
    }

    #[test]
    fn brief_is_optional() {
        let release = ReleaseConfig {
            name: "Shop".into(),
            ..Default::default()
        };
        assert_eq!(release.missing_fields(), vec!["version"]);
    }
}
