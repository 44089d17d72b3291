//! Collaborator traits the release-notes pipeline is generic over.
//!
//! The HTTP clients in `rn-devops` and `rn-llm` implement these; tests drive
//! the pipeline with in-memory fakes.

use std::future::Future;

use crate::entities::{IconMap, WorkItem};
use crate::enums::PromptKind;

/// Read access to the work-item tracker.
pub trait WorkItemSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Icon URL for every work-item kind the project defines.
    fn fetch_icons(&self) -> impl Future<Output = Result<IconMap, Self::Error>> + Send;

    /// Work items returned by a saved query, in query order.
    fn fetch_by_query(
        &self,
        query_id: &str,
    ) -> impl Future<Output = Result<Vec<WorkItem>, Self::Error>> + Send;

    /// A single work item by id.
    fn fetch_by_id(&self, id: u64) -> impl Future<Output = Result<WorkItem, Self::Error>> + Send;

    /// Discussion comments of an item, newest first.
    fn fetch_comments(
        &self,
        id: u64,
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send;
}

/// Condenses text with a generative model.
pub trait Summarizer {
    type Error: std::error::Error + Send + Sync + 'static;

    fn summarize(
        &self,
        kind: PromptKind,
        text: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}
