//! # rn-notes
//!
//! The release-notes core: grouping fetched work items under their parents
//! and rendering those groups into a Markdown document with a summary digest
//! and a quick-links table of contents.

pub mod assemble;
pub mod document;
pub mod hierarchy;
pub mod text;
pub mod toc;

mod error;

pub use assemble::{Assembler, Assembly, NoSummary};
pub use document::{Document, DocumentSink, MarkdownFile, finalize, skeleton};
pub use error::NotesError;
pub use hierarchy::{ParentGroups, ParentRecords, classify_parent, group_by_parent, other_parent};
pub use text::{clean_text, clean_title};
pub use toc::{TableOfContents, anchor};
