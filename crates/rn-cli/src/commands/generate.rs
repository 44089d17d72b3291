use anyhow::Context;
use rn_config::RelnotesConfig;
use rn_devops::DevOpsClient;
use rn_llm::ChatClient;
use rn_notes::NoSummary;

use crate::cli::GenerateArgs;
use crate::orchestrator::{Orchestrator, RunReport};
use crate::render::HtmlRenderer;

/// Handle `relnotes generate`.
///
/// Settings are validated before any client is built, so an incomplete
/// configuration never reaches the network.
pub async fn handle(args: &GenerateArgs, config: &RelnotesConfig) -> anyhow::Result<()> {
    let summarize = config.general.summarize;
    config
        .validate(summarize)
        .context("relnotes is not fully configured; run `relnotes init` for a template")?;

    let tracker = DevOpsClient::new(&config.devops).context("failed to build tracker client")?;
    let renderer = if config.output.html {
        Some(HtmlRenderer::new(&config.output.renderer_url)?)
    } else {
        None
    };

    let report = if summarize {
        let model =
            ChatClient::new(&config.model, &config.release).context("failed to build model client")?;
        Orchestrator::new(config, &tracker, Some(&model))
            .with_renderer(renderer.as_ref())
            .with_json_export(args.json)
            .run()
            .await?
    } else {
        Orchestrator::<_, NoSummary>::new(config, &tracker, None)
            .with_renderer(renderer.as_ref())
            .with_json_export(args.json)
            .run()
            .await?
    };

    print_report(&report);
    Ok(())
}

fn print_report(report: &RunReport) {
    println!("{}", report.markdown.display());
    if let Some(html) = &report.html {
        println!("{}", html.display());
    }
    for path in &report.json {
        println!("{}", path.display());
    }
    tracing::info!(
        items = report.items,
        sections = report.sections,
        "release notes generated"
    );
}
