//! Renders grouped work items into release-notes sections.
//!
//! Sections follow the desired kind list. Within a kind, parents follow
//! [`ParentRecords`] order, and each parent's children are bucketed by their
//! own kind in first-seen order. Every rendered parent also contributes a
//! digest bullet and, when it has children, a table-of-contents entry.

use std::convert::Infallible;
use std::fmt::Write as _;

use rn_core::{IconMap, OTHER_PARENT_ID, ParentRecord, PromptKind, Summarizer, WorkItem};

use crate::document::DocumentSink;
use crate::error::NotesError;
use crate::hierarchy::{ParentGroups, ParentRecords};
use crate::text::{clean_text, clean_title};
use crate::toc::TableOfContents;

/// Output of a run besides the document body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    /// One `- <title>` bullet per section parent.
    pub digest: String,
    pub contents: TableOfContents,
}

/// Summarizer for runs with summaries turned off. Never called.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSummary;

impl Summarizer for NoSummary {
    type Error = Infallible;

    async fn summarize(&self, _kind: PromptKind, _text: &str) -> Result<String, Infallible> {
        Ok(String::new())
    }
}

pub struct Assembler<'a, S> {
    sections: &'a [String],
    icons: &'a IconMap,
    summarizer: Option<&'a S>,
}

impl<'a> Assembler<'a, NoSummary> {
    /// An assembler that writes cleaned descriptions instead of summaries.
    #[must_use]
    pub const fn without_summaries(sections: &'a [String], icons: &'a IconMap) -> Self {
        Self {
            sections,
            icons,
            summarizer: None,
        }
    }
}

impl<'a, S: Summarizer + Sync> Assembler<'a, S> {
    #[must_use]
    pub const fn new(sections: &'a [String], icons: &'a IconMap, summarizer: Option<&'a S>) -> Self {
        Self {
            sections,
            icons,
            summarizer,
        }
    }

    /// Write every section to `doc`.
    ///
    /// # Errors
    ///
    /// Returns [`NotesError::MissingIcon`] when a section parent has no
    /// icon, and [`NotesError::Io`] when `doc` rejects a write. Summary
    /// failures are not errors: the child falls back to its description.
    pub async fn assemble<D: DocumentSink + Send>(
        &self,
        parents: &ParentRecords,
        groups: &ParentGroups,
        doc: &mut D,
    ) -> Result<Assembly, NotesError> {
        let mut assembly = Assembly::default();

        for kind in self.sections {
            for parent in parents.of_kind(kind) {
                if parent.is_other() && groups.bucket(OTHER_PARENT_ID).is_empty() {
                    tracing::debug!("no unparented work items");
                    continue;
                }
                self.write_parent(parent, groups, doc, &mut assembly).await?;
            }
        }

        tracing::info!(
            sections = assembly.contents.len(),
            "assembled release notes"
        );
        Ok(assembly)
    }

    async fn write_parent<D: DocumentSink + Send>(
        &self,
        parent: &ParentRecord,
        groups: &ParentGroups,
        doc: &mut D,
        assembly: &mut Assembly,
    ) -> Result<(), NotesError> {
        let title = clean_title(&parent.title);
        let icon = self
            .icons
            .get(&parent.kind)
            .or(parent.icon.as_ref())
            .ok_or_else(|| NotesError::MissingIcon {
                kind: parent.kind.clone(),
            })?;
        let _ = writeln!(assembly.digest, "- {title}");

        let children = by_kind(groups.children_of(parent.id));
        if children.is_empty() {
            tracing::info!(id = parent.id, kind = %parent.kind, "parent has no child items");
            return Ok(());
        }

        let header = parent_header(parent, icon, &title);
        doc.append(&header)?;
        assembly.contents.push_heading(&title, header.trim());

        for (kind, items) in children {
            tracing::info!(parent = parent.id, kind, count = items.len(), "writing notes");
            doc.append(&kind_header(kind, self.icons.get(kind).map(String::as_str)))?;
            for child in items {
                let text = self.child_text(child).await;
                doc.append(&child_entry(child, &text))?;
            }
        }
        Ok(())
    }

    async fn child_text(&self, child: &WorkItem) -> String {
        let fallback = || clean_text(&child.description, 0);
        let Some(summarizer) = self.summarizer else {
            return fallback();
        };
        match summarizer.summarize(PromptKind::Item, &item_prompt(child)).await {
            Ok(summary) if !summary.trim().is_empty() => summary.trim().to_string(),
            Ok(_) => fallback(),
            Err(error) => {
                tracing::warn!(id = child.id, %error, "summary failed, using description");
                fallback()
            }
        }
    }
}

/// Children bucketed by kind, in first-seen kind order.
fn by_kind<'w>(children: impl Iterator<Item = &'w WorkItem>) -> Vec<(&'w str, Vec<&'w WorkItem>)> {
    let mut groups: Vec<(&str, Vec<&WorkItem>)> = Vec::new();
    for child in children {
        match groups.iter_mut().find(|(kind, _)| *kind == child.kind) {
            Some((_, items)) => items.push(child),
            None => groups.push((child.kind.as_str(), vec![child])),
        }
    }
    groups
}

/// Text sent to the summarizer for one work item. Comments are cleaned
/// line by line and joined with `; `.
#[must_use]
pub fn item_prompt(item: &WorkItem) -> String {
    let comments = item
        .comments
        .iter()
        .map(|line| clean_text(line, 0))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ");
    format!(
        "TITLE: {} DESCRIPTION: {} REPRODUCTION_STEPS: {} COMMENTS: {} ACCEPTANCE_CRITERIA: {}",
        clean_title(&item.title),
        clean_text(&item.description, 0),
        clean_text(&item.repro_steps, 0),
        comments,
        clean_text(&item.acceptance_criteria, 0),
    )
}

/// Section heading for a parent; the sentinel gets no id link.
#[must_use]
pub fn parent_header(parent: &ParentRecord, icon: &str, title: &str) -> String {
    let img = format!("<img src='{icon}' alt='icon' width='20' height='20'>");
    if parent.is_other() {
        format!("\n### {img} {title}\n")
    } else {
        format!("\n### {img} [#{}]({}) {title}\n", parent.id, parent.link)
    }
}

#[must_use]
pub fn kind_header(kind: &str, icon: Option<&str>) -> String {
    match icon {
        Some(icon) => {
            format!("#### <img src='{icon}' alt='icon' width='12' height='12'> {kind}s\n")
        }
        None => format!("#### {kind}s\n"),
    }
}

#[must_use]
pub fn child_entry(child: &WorkItem, text: &str) -> String {
    let title = clean_title(&child.title);
    if text.is_empty() {
        format!("- [#{}]({}) **{title}**\n", child.id, child.link)
    } else {
        format!("- [#{}]({}) **{title}** {text}\n", child.id, child.link)
    }
}
