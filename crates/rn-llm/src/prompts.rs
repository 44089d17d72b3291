//! System prompts for the two summaries a release needs.

use rn_core::PromptKind;

const ITEM: &str = "You are a developer writing a summary of the work completed for the given \
work item. Ignore timestamps and links. Return only the description text with no titles, \
headers or formatting. If there is nothing to describe, return 'Addressed'; always assume the \
work item was completed. Do not list filenames or links. Provide a single sentence describing \
the work completed for the following work item details:";

/// Prompt text for each [`PromptKind`], bound to one piece of software.
#[derive(Debug, Clone)]
pub struct Prompts {
    release: String,
}

impl Prompts {
    #[must_use]
    pub fn new(software_name: &str, brief: &str) -> Self {
        let mut release = format!(
            "You are a developer working on a software project called {software_name}. \
             You have been asked to review the following and write a summary of the work \
             completed for this release. Keep the summary to one paragraph. Do not write \
             bullet points or lists and do not group your response; give a natural language \
             explanation of what was accomplished."
        );
        if !brief.trim().is_empty() {
            release.push_str(" The purpose of the software, for context: ");
            release.push_str(brief.trim());
        }
        Self { release }
    }

    #[must_use]
    pub fn system(&self, kind: PromptKind) -> &str {
        match kind {
            PromptKind::Item => ITEM,
            PromptKind::Release => &self.release,
        }
    }
}
