//! Output location and formats.

use serde::{Deserialize, Serialize};

fn default_folder() -> String {
    String::from("Releases")
}

const fn default_html() -> bool {
    true
}

fn default_renderer_url() -> String {
    String::from("https://api.github.com/markdown")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Folder receiving the generated files, relative to the working directory.
    #[serde(default = "default_folder", deserialize_with = "crate::de::text")]
    pub folder: String,

    /// Whether to also render an HTML copy of the notes.
    #[serde(default = "default_html")]
    pub html: bool,

    /// Markdown-to-HTML endpoint (GitHub markdown API shape).
    #[serde(default = "default_renderer_url", deserialize_with = "crate::de::text")]
    pub renderer_url: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            folder: default_folder(),
            html: default_html(),
            renderer_url: default_renderer_url(),
        }
    }
}
