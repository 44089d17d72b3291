use anyhow::{Context, bail};
use rn_config::RelnotesConfig;

use crate::cli::{GenerateArgs, GlobalFlags};

/// Read `.env` from the working directory, then the layered config.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<RelnotesConfig> {
    load_dotenv()?;

    if let Some(path) = &flags.config {
        if !path.is_file() {
            bail!("config file not found: {}", path.display());
        }
    }

    RelnotesConfig::load(flags.config.as_deref()).context("failed to load relnotes configuration")
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}

/// Command-line flags win over every config source.
pub fn apply_overrides(config: &mut RelnotesConfig, args: &GenerateArgs) {
    if let Some(query) = &args.query {
        config.devops.query.clone_from(query);
    }
    if let Some(folder) = &args.output {
        config.output.folder.clone_from(folder);
    }
    if args.no_summary {
        config.general.summarize = false;
    }
    if args.no_html {
        config.output.html = false;
    }
}
