//! One release-notes run, as a linear sequence of stages.
//!
//! Any failure aborts the run and leaves the partially written Markdown on
//! disk. Summaries and the HTML copy degrade instead of failing. Discussion
//! comments are only fetched when items are going to be summarized.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use rn_config::RelnotesConfig;
use rn_core::{ParentRecord, PromptKind, Summarizer, WorkItem, WorkItemSource};
use rn_notes::{Assembler, MarkdownFile, ParentGroups, ParentRecords, group_by_parent};

use crate::export;
use crate::progress::Progress;
use crate::render::HtmlRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Init,
    IconsFetched,
    ItemsFetched,
    HierarchyResolved,
    ParentsFetched,
    Processed,
    Finalized,
    Done,
}

impl RunStage {
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Init => Some(Self::IconsFetched),
            Self::IconsFetched => Some(Self::ItemsFetched),
            Self::ItemsFetched => Some(Self::HierarchyResolved),
            Self::HierarchyResolved => Some(Self::ParentsFetched),
            Self::ParentsFetched => Some(Self::Processed),
            Self::Processed => Some(Self::Finalized),
            Self::Finalized => Some(Self::Done),
            Self::Done => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::IconsFetched => "icons_fetched",
            Self::ItemsFetched => "items_fetched",
            Self::HierarchyResolved => "hierarchy_resolved",
            Self::ParentsFetched => "parents_fetched",
            Self::Processed => "processed",
            Self::Finalized => "finalized",
            Self::Done => "done",
        }
    }

    /// Spinner text for the work that follows this stage.
    const fn next_step(self) -> &'static str {
        match self {
            Self::Init => "Fetching work item types",
            Self::IconsFetched => "Running work item query",
            Self::ItemsFetched => "Grouping work items",
            Self::HierarchyResolved => "Fetching parent work items",
            Self::ParentsFetched => "Writing release notes",
            Self::Processed => "Finalizing",
            Self::Finalized => "Writing extra outputs",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Files written and counts seen by a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub markdown: PathBuf,
    pub html: Option<PathBuf>,
    pub json: Vec<PathBuf>,
    pub items: usize,
    pub sections: usize,
}

pub struct Orchestrator<'a, T, S> {
    config: &'a RelnotesConfig,
    source: &'a T,
    summarizer: Option<&'a S>,
    renderer: Option<&'a HtmlRenderer>,
    export_json: bool,
    stage: RunStage,
}

impl<'a, T, S> Orchestrator<'a, T, S>
where
    T: WorkItemSource + Sync,
    S: Summarizer + Sync,
{
    pub const fn new(config: &'a RelnotesConfig, source: &'a T, summarizer: Option<&'a S>) -> Self {
        Self {
            config,
            source,
            summarizer,
            renderer: None,
            export_json: false,
            stage: RunStage::Init,
        }
    }

    #[must_use]
    pub const fn with_renderer(mut self, renderer: Option<&'a HtmlRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    #[must_use]
    pub const fn with_json_export(mut self, enabled: bool) -> Self {
        self.export_json = enabled;
        self
    }

    #[must_use]
    pub const fn stage(&self) -> RunStage {
        self.stage
    }

    pub async fn run(&mut self) -> anyhow::Result<RunReport> {
        let progress = Progress::spinner("Creating release notes");
        let result = self.execute(&progress).await;
        match &result {
            Ok(report) => progress.finish_ok(&format!("Wrote {}", report.markdown.display())),
            Err(_) => progress.finish_err(&format!("Failed after stage {}", self.stage())),
        }
        result
    }

    fn advance(&mut self, progress: &Progress) {
        if let Some(next) = self.stage.next() {
            self.stage = next;
            tracing::info!(stage = %next, "run stage reached");
            progress.set_message(next.next_step());
        }
    }

    async fn execute(&mut self, progress: &Progress) -> anyhow::Result<RunReport> {
        let config = self.config;
        let release = &config.release;
        let folder = PathBuf::from(&config.output.folder);

        let mut file = MarkdownFile::create(&folder, release.name.trim(), release.version.trim())
            .context("failed to create release notes file")?;
        tracing::info!(stage = %self.stage, path = %file.path().display(), "run stage reached");
        progress.set_message(self.stage.next_step());

        let icons = self
            .source
            .fetch_icons()
            .await
            .context("failed to fetch work item types")?;
        self.advance(progress);

        let query = config.devops.query.as_str();
        let mut items = self
            .source
            .fetch_by_query(query)
            .await
            .with_context(|| format!("failed to run work item query {query}"))?;
        if self.summarizer.is_some() {
            self.load_comments(&mut items).await?;
        }
        self.advance(progress);

        let groups = group_by_parent(&items);
        self.advance(progress);

        let parents = self.fetch_parents(&groups).await?;
        self.advance(progress);

        let sections = config.general.sections();
        let assembly = Assembler::new(&sections, &icons, self.summarizer)
            .assemble(&parents, &groups, &mut file)
            .await
            .context("failed to assemble release notes")?;
        self.advance(progress);

        let summary = self.release_summary(&assembly.digest).await;
        let markdown = file
            .finalize(&summary, &assembly.contents)
            .context("failed to finalize release notes")?;
        self.advance(progress);

        let mut report = RunReport {
            markdown: file.path().to_path_buf(),
            html: None,
            json: Vec::new(),
            items: items.len(),
            sections: assembly.contents.len(),
        };
        report.html = self.render_html(&markdown, file.path()).await;
        if self.export_json {
            report.json = export::write_json(&folder, &icons, &groups)
                .context("failed to export JSON snapshot")?;
        }
        self.advance(progress);

        Ok(report)
    }

    async fn load_comments(&self, items: &mut [WorkItem]) -> anyhow::Result<()> {
        for item in items.iter_mut().filter(|item| item.comment_count > 0) {
            let id = item.id;
            item.comments = self
                .source
                .fetch_comments(id)
                .await
                .with_context(|| format!("failed to fetch comments of work item {id}"))?;
        }
        Ok(())
    }

    /// Fetch every real parent, one request at a time, in bucket order.
    async fn fetch_parents(&self, groups: &ParentGroups) -> anyhow::Result<ParentRecords> {
        let mut fetched = Vec::new();
        for id in groups.parent_ids() {
            let parent = self
                .source
                .fetch_by_id(id)
                .await
                .with_context(|| format!("failed to fetch parent work item {id}"))?;
            tracing::debug!(id, kind = %parent.kind, "fetched parent");
            fetched.push(ParentRecord::from(parent));
        }
        Ok(ParentRecords::from_fetched(fetched))
    }

    /// The digest, headed by a model-written overview when summaries are on.
    async fn release_summary(&self, digest: &str) -> String {
        let Some(summarizer) = self.summarizer else {
            return digest.to_string();
        };
        if digest.is_empty() {
            return String::new();
        }
        match summarizer.summarize(PromptKind::Release, digest).await {
            Ok(overview) if !overview.trim().is_empty() => {
                format!("{}\n\n{digest}", overview.trim())
            }
            Ok(_) => digest.to_string(),
            Err(error) => {
                tracing::warn!(%error, "release overview failed, using digest only");
                digest.to_string()
            }
        }
    }

    async fn render_html(&self, markdown: &str, markdown_path: &Path) -> Option<PathBuf> {
        let renderer = self.renderer?;
        let html_path = markdown_path.with_extension("html");
        let html = match renderer.render(markdown).await {
            Ok(html) => html,
            Err(error) => {
                tracing::error!("HTML rendering failed, keeping Markdown only: {error:#}");
                return None;
            }
        };
        match std::fs::write(&html_path, html) {
            Ok(()) => Some(html_path),
            Err(error) => {
                tracing::error!(path = %html_path.display(), %error, "failed to write HTML");
                None
            }
        }
    }
}
