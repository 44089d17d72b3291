//! # rn-core
//!
//! Core types shared across all relnotes crates:
//! - Work-item and parent-record entities
//! - Well-known work-item kinds
//! - The collaborator traits the release-notes pipeline is generic over
//!   ([`WorkItemSource`] for the tracker, [`Summarizer`] for the language model)

pub mod entities;
pub mod enums;
pub mod source;

pub use entities::{IconMap, OTHER_PARENT_ID, PARENT_RELATION, ParentRecord, Relation, WorkItem};
pub use enums::{PromptKind, WorkItemKind};
pub use source::{Summarizer, WorkItemSource};
