//! # rn-config
//!
//! Layered configuration loading for relnotes using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`RELNOTES_*` prefix, `__` as separator)
//! 2. An explicit `--config` file, else project-level `relnotes.toml`
//! 3. User-level `~/.config/relnotes/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `RELNOTES_DEVOPS__PAT` -> `devops.pat`,
//! `RELNOTES_RELEASE__VERSION` -> `release.version`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use rn_config::RelnotesConfig;
//!
//! let config = RelnotesConfig::load(None).expect("config");
//! config.validate(config.general.summarize).expect("required settings");
//! println!("writing {}", config.release.file_stem());
//! ```

mod de;
mod devops;
mod error;
mod general;
mod model;
mod output;
mod release;

pub use devops::DevOpsConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use model::ModelConfig;
pub use output::OutputConfig;
pub use release::ReleaseConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "relnotes.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "RELNOTES_";

/// `.env` template written by `relnotes init`.
pub const ENV_TEMPLATE: &str = "\
# relnotes configuration
# Any key may also live in relnotes.toml under the matching [section].

# Work-item tracker
RELNOTES_DEVOPS__BASE_URL=https://dev.azure.com
RELNOTES_DEVOPS__API_VERSION=6.0
RELNOTES_DEVOPS__ORG=
RELNOTES_DEVOPS__PROJECT=
RELNOTES_DEVOPS__QUERY=
RELNOTES_DEVOPS__PAT=

# Summaries
RELNOTES_MODEL__BASE_URL=https://api.openai.com/v1
RELNOTES_MODEL__MODEL=gpt-4o
RELNOTES_MODEL__API_KEY=

# Release
RELNOTES_RELEASE__NAME=
RELNOTES_RELEASE__VERSION=
RELNOTES_RELEASE__BRIEF=

# Output
RELNOTES_OUTPUT__FOLDER=Releases
RELNOTES_OUTPUT__HTML=true

# Behaviour
RELNOTES_GENERAL__DESIRED_TYPES=Epic,Feature,Other
RELNOTES_GENERAL__SUMMARIZE=true
RELNOTES_GENERAL__LOG_LEVEL=warn
";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RelnotesConfig {
    #[serde(default)]
    pub devops: DevOpsConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub release: ReleaseConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl RelnotesConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does not read `.env` files; the binary loads those into the process
    /// environment first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(explicit).extract().map_err(ConfigError::from)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    #[must_use]
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: explicit file, else project-local config
        match explicit {
            Some(path) => figment = figment.merge(Toml::file_exact(path)),
            None => {
                let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
                if local_path.exists() {
                    figment = figment.merge(Toml::file(local_path));
                }
            }
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check that every setting the run needs is present.
    ///
    /// The model section is only required when `summarize` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] for the first incomplete
    /// section, or [`ConfigError::InvalidValue`] for an unusable value.
    pub fn validate(&self, summarize: bool) -> Result<(), ConfigError> {
        let release = self.release.missing_fields();
        if !release.is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "release",
                fields: release,
            });
        }

        let devops = self.devops.missing_fields();
        if !devops.is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "devops",
                fields: devops,
            });
        }

        if summarize {
            let model = self.model.missing_fields();
            if !model.is_empty() {
                return Err(ConfigError::NotConfigured {
                    section: "model",
                    fields: model,
                });
            }
        }

        if self.output.folder.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "output.folder".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("relnotes").join("config.toml"))
    }
}
