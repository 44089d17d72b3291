use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::GlobalFlags;
pub use root_commands::{Commands, GenerateArgs, InitArgs};

/// Top-level CLI parser for the `relnotes` binary.
#[derive(Debug, Parser)]
#[command(
    name = "relnotes",
    version,
    about = "Release notes from tracker work items"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (errors only, no progress spinner)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of ./relnotes.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_generates() {
        let cli = Cli::try_parse_from(["relnotes"]).expect("cli should parse");
        assert!(cli.command.is_none());
        assert!(matches!(cli.command.unwrap_or_default(), Commands::Generate(_)));
    }

    #[test]
    fn generate_flags_parse() {
        let cli = Cli::try_parse_from([
            "relnotes",
            "generate",
            "--query",
            "6b4c1f2e",
            "--no-summary",
            "--no-html",
            "--output",
            "out",
            "--json",
        ])
        .expect("cli should parse");

        let Some(Commands::Generate(args)) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.query.as_deref(), Some("6b4c1f2e"));
        assert!(args.no_summary);
        assert!(args.no_html);
        assert_eq!(args.output.as_deref(), Some("out"));
        assert!(args.json);
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["relnotes", "generate", "--quiet", "--config", "ci.toml"])
            .expect("cli should parse");

        let flags = cli.global_flags();
        assert!(flags.quiet);
        assert!(!flags.verbose);
        assert_eq!(flags.config.as_deref(), Some(Path::new("ci.toml")));
    }

    #[test]
    fn init_defaults_to_dotenv() {
        let cli = Cli::try_parse_from(["relnotes", "--verbose", "init"]).expect("cli should parse");

        assert!(cli.verbose);
        let Some(Commands::Init(args)) = cli.command else {
            panic!("expected init");
        };
        assert_eq!(args.path, Path::new(".env"));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["relnotes", "generate", "--summary"]).is_err());
    }
}
