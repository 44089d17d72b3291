//! Quick-links table of contents with GitHub-style heading anchors.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("TAG_RE regex should compile"));

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]*)\]\([^)]*\)").expect("LINK_RE regex should compile")
});

/// Anchor GitHub generates for a Markdown heading.
///
/// Markup is dropped, link text is kept, and the remaining text is
/// lowercased with spaces turned into dashes.
#[must_use]
pub fn anchor(heading: &str) -> String {
    let text = TAG_RE.replace_all(heading, "");
    let text = LINK_RE.replace_all(&text, "$1");
    text.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | ' '))
        .map(|c| if c == ' ' { '-' } else { c })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub label: String,
    pub anchor: String,
}

/// Ordered links to document sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOfContents {
    entries: Vec<TocEntry>,
}

impl TableOfContents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Link to a section titled `label`.
    pub fn push_section(&mut self, label: &str) {
        self.push(label, &anchor(label));
    }

    /// Link labelled `label` to the heading whose text is `heading`.
    pub fn push_heading(&mut self, label: &str, heading: &str) {
        self.push(label, &anchor(heading));
    }

    fn push(&mut self, label: &str, anchor: &str) {
        self.entries.push(TocEntry {
            label: label.to_string(),
            anchor: anchor.to_string(),
        });
    }

    #[must_use]
    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One `- [label](#anchor)` line per entry.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let _ = writeln!(out, "- [{}](#{})", entry.label, entry.anchor);
        }
        out
    }
}
