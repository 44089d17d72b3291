//! Well-known work-item kinds and summarizer prompt kinds.

use std::fmt;

// ---------------------------------------------------------------------------
// WorkItemKind
// ---------------------------------------------------------------------------

/// Section kinds relnotes orders by default.
///
/// Kinds are carried as plain strings on [`crate::WorkItem`] because process
/// templates define their own; this enum names the ones relnotes refers to
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkItemKind {
    Epic,
    Feature,
    /// Synthetic kind of the parent collecting items without a declared parent.
    Other,
}

impl WorkItemKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Epic => "Epic",
            Self::Feature => "Feature",
            Self::Other => "Other",
        }
    }

    /// Default ordering of top-level release-notes sections.
    #[must_use]
    pub const fn default_sections() -> &'static [Self] {
        &[Self::Epic, Self::Feature, Self::Other]
    }
}

impl fmt::Display for WorkItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PromptKind
// ---------------------------------------------------------------------------

/// Which instruction the summarizer should follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    /// One sentence describing the work done on a single work item.
    Item,
    /// One paragraph describing the release as a whole.
    Release,
}

impl PromptKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Release => "release",
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
