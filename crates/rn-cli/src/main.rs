use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod export;
mod orchestrator;
mod progress;
mod render;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("relnotes error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();
    ui::init(&flags);

    match cli.command.unwrap_or_default() {
        cli::Commands::Init(args) => {
            init_tracing(flags.quiet, flags.verbose, "warn")?;
            commands::init::handle(&args)
        }
        cli::Commands::Generate(args) => {
            let mut config = bootstrap::load_config(&flags)?;
            init_tracing(flags.quiet, flags.verbose, &config.general.log_level)?;
            bootstrap::apply_overrides(&mut config, &args);
            commands::generate::handle(&args, &config).await
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool, default_level: &str) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        default_level
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("RELNOTES_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
