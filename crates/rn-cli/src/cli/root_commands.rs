use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate release notes for the configured release (default)
    Generate(GenerateArgs),

    /// Write a .env template listing every setting
    Init(InitArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Self::Generate(GenerateArgs::default())
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Saved query id, overriding `devops.query`
    #[arg(long)]
    pub query: Option<String>,

    /// Use cleaned descriptions instead of model summaries
    #[arg(long)]
    pub no_summary: bool,

    /// Skip the HTML rendering
    #[arg(long)]
    pub no_html: bool,

    /// Output folder, overriding `output.folder`
    #[arg(short, long)]
    pub output: Option<String>,

    /// Also write types.json and work_items.json
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct InitArgs {
    /// Where to write the template
    #[arg(long, default_value = ".env")]
    pub path: PathBuf,
}
