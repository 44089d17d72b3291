//! Append-only release-notes document, in memory or on disk.
//!
//! A document starts from [`skeleton`], which holds the two placeholders
//! [`SUMMARY_PLACEHOLDER`] and [`TOC_PLACEHOLDER`]. Sections are appended as
//! they are assembled and both placeholders are substituted once, at the
//! end, by [`finalize`].

use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::error::NotesError;
use crate::toc::TableOfContents;

pub const SUMMARY_PLACEHOLDER: &str = "<NOTESSUMMARY>";
pub const TOC_PLACEHOLDER: &str = "<TABLEOFCONTENTS>";

/// Opening text of every release-notes document.
#[must_use]
pub fn skeleton(name: &str, version: &str) -> String {
    format!(
        "# Release Notes for {name} version v{version}\n\n\
         ## Summary\n\n{SUMMARY_PLACEHOLDER}\n\n\
         ## Quick Links\n\n{TOC_PLACEHOLDER}\n"
    )
}

/// Substitute every occurrence of both placeholders.
#[must_use]
pub fn finalize(content: &str, summary: &str, contents: &TableOfContents) -> String {
    content
        .replace(SUMMARY_PLACEHOLDER, summary)
        .replace(TOC_PLACEHOLDER, &contents.render())
}

/// Destination for assembled sections.
pub trait DocumentSink {
    /// # Errors
    ///
    /// Returns [`NotesError::Io`] when the text cannot be stored.
    fn append(&mut self, text: &str) -> Result<(), NotesError>;
}

/// In-memory document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sections: Vec<String>,
}

impl Document {
    /// A document holding only the skeleton.
    #[must_use]
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            sections: vec![skeleton(name, version)],
        }
    }

    #[must_use]
    pub fn content(&self) -> String {
        self.sections.concat()
    }

    #[must_use]
    pub fn finalize(&self, summary: &str, contents: &TableOfContents) -> String {
        finalize(&self.content(), summary, contents)
    }
}

impl DocumentSink for Document {
    fn append(&mut self, text: &str) -> Result<(), NotesError> {
        self.sections.push(text.to_string());
        Ok(())
    }
}

/// Markdown document at `<folder>/<name>-v<version>.md`.
///
/// Each append opens the file, writes and closes it again. A run that stops
/// early leaves a partial file behind.
#[derive(Debug, Clone)]
pub struct MarkdownFile {
    path: PathBuf,
}

impl MarkdownFile {
    /// Create the folder if needed and write the skeleton, truncating any
    /// previous file.
    ///
    /// # Errors
    ///
    /// Returns [`NotesError::Io`] if the folder or file cannot be written.
    pub fn create(folder: &Path, name: &str, version: &str) -> Result<Self, NotesError> {
        fs::create_dir_all(folder).map_err(|source| NotesError::Io {
            path: folder.to_path_buf(),
            source,
        })?;
        let path = folder.join(format!("{name}-v{version}.md"));
        fs::write(&path, skeleton(name, version)).map_err(|source| NotesError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "created release notes file");
        Ok(Self { path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current file content.
    ///
    /// # Errors
    ///
    /// Returns [`NotesError::Io`] if the file cannot be read.
    pub fn read(&self) -> Result<String, NotesError> {
        fs::read_to_string(&self.path).map_err(|source| self.io_error(source))
    }

    /// Substitute the placeholders and rewrite the file once.
    ///
    /// # Errors
    ///
    /// Returns [`NotesError::Io`] if the file cannot be read or rewritten.
    pub fn finalize(&self, summary: &str, contents: &TableOfContents) -> Result<String, NotesError> {
        let finished = finalize(&self.read()?, summary, contents);
        fs::write(&self.path, &finished).map_err(|source| self.io_error(source))?;
        Ok(finished)
    }

    fn io_error(&self, source: std::io::Error) -> NotesError {
        NotesError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl DocumentSink for MarkdownFile {
    fn append(&mut self, text: &str) -> Result<(), NotesError> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        file.write_all(text.as_bytes())
            .map_err(|source| self.io_error(source))
    }
}
