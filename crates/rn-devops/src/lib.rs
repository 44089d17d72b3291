//! # rn-devops
//!
//! Azure DevOps work-item tracking client for relnotes.
//!
//! Reads the icon of every work-item kind, runs a saved query and fetches
//! full items (fields, relations and links) and their discussion comments.
//! Implements
//! [`rn_core::WorkItemSource`] so the release pipeline stays independent of
//! the transport.

mod error;
mod http;
mod wire;

pub use error::DevOpsError;
pub use wire::edit_link;

use std::collections::HashMap;
use std::time::Duration;

use rn_config::DevOpsConfig;
use rn_core::{IconMap, WorkItem, WorkItemSource};

use crate::http::decode;
use crate::wire::{BatchResponse, CommentsResponse, RawWorkItem, TypesResponse, WiqlResponse};

/// Largest id list the batch endpoint accepts in one request.
pub const BATCH_SIZE: usize = 200;

/// The comments endpoint is only served under a preview api-version.
const PREVIEW_SUFFIX: &str = "-preview";

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for one tracker project.
pub struct DevOpsClient {
    http: reqwest::Client,
    pat: String,
    project_url: String,
    api_version: String,
}

impl DevOpsClient {
    /// Build a client for the organization and project in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DevOpsError::Http`] if the underlying client fails to build.
    pub fn new(config: &DevOpsConfig) -> Result<Self, DevOpsError> {
        let http = reqwest::Client::builder()
            .user_agent("relnotes/0.1")
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            pat: config.pat.clone(),
            project_url: format!(
                "{}/{}/{}",
                config.base_url.trim_end_matches('/'),
                urlencoding::encode(&config.org),
                urlencoding::encode(&config.project)
            ),
            api_version: config.api_version.clone(),
        })
    }

    fn wit_url(&self, path: &str) -> String {
        format!("{}/_apis/wit/{path}", self.project_url)
    }

    /// GET with the personal access token as Basic auth and an empty user.
    fn get(&self, url: String) -> reqwest::RequestBuilder {
        self.http.get(url).basic_auth("", Some(&self.pat))
    }

    /// Icon URL of every work-item kind in the project.
    ///
    /// # Errors
    ///
    /// Returns [`DevOpsError`] if the request fails, the tracker returns a
    /// non-success status, or the body has an unexpected shape.
    pub async fn work_item_icons(&self) -> Result<IconMap, DevOpsError> {
        let resp = self
            .get(self.wit_url("workitemtypes"))
            .query(&[("api-version", self.api_version.as_str())])
            .send()
            .await?;
        let types: TypesResponse = decode(resp, "workitemtypes").await?;
        let icons = types.into_icon_map();
        tracing::debug!(kinds = icons.len(), "fetched work item icons");
        Ok(icons)
    }

    /// Ids returned by a saved query, in query order.
    ///
    /// # Errors
    ///
    /// See [`Self::work_item_icons`].
    pub async fn query_ids(&self, query_id: &str) -> Result<Vec<u64>, DevOpsError> {
        let url = self.wit_url(&format!("wiql/{}", urlencoding::encode(query_id)));
        let resp = self
            .get(url)
            .query(&[("api-version", self.api_version.as_str())])
            .send()
            .await?;
        let wiql: WiqlResponse = decode(resp, "wiql").await?;
        Ok(wiql.work_items.into_iter().map(|r| r.id).collect())
    }

    /// Full work items for `ids`, fetched in chunks of [`BATCH_SIZE`].
    ///
    /// The result follows the order of `ids`. Ids the tracker does not
    /// return are skipped with a warning.
    ///
    /// # Errors
    ///
    /// See [`Self::work_item_icons`].
    pub async fn work_items(&self, ids: &[u64]) -> Result<Vec<WorkItem>, DevOpsError> {
        let mut by_id: HashMap<u64, WorkItem> = HashMap::with_capacity(ids.len());
        for chunk in ids.chunks(BATCH_SIZE) {
            let csv = chunk
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(",");
            let resp = self
                .get(self.wit_url("workitems"))
                .query(&[
                    ("ids", csv.as_str()),
                    ("$expand", "all"),
                    ("api-version", self.api_version.as_str()),
                ])
                .send()
                .await?;
            let batch: BatchResponse = decode(resp, "workitems").await?;
            tracing::debug!(
                requested = chunk.len(),
                returned = batch.value.len(),
                "fetched work item batch"
            );
            by_id.extend(batch.value.into_iter().map(|raw| {
                let item = WorkItem::from(raw);
                (item.id, item)
            }));
        }

        let mut items = Vec::with_capacity(ids.len());
        for id in ids {
            match by_id.remove(id) {
                Some(item) => items.push(item),
                None => tracing::warn!(id, "work item missing from batch response"),
            }
        }
        Ok(items)
    }

    /// A single work item with relations and links.
    ///
    /// # Errors
    ///
    /// See [`Self::work_item_icons`].
    pub async fn work_item(&self, id: u64) -> Result<WorkItem, DevOpsError> {
        let resp = self
            .get(self.wit_url(&format!("workitems/{id}")))
            .query(&[("$expand", "all"), ("api-version", self.api_version.as_str())])
            .send()
            .await?;
        let raw: RawWorkItem = decode(resp, "workitem").await?;
        Ok(raw.into())
    }

    /// Discussion comments of an item as `dd-mm-yyyy HH:MM | author | text`,
    /// newest first.
    ///
    /// # Errors
    ///
    /// See [`Self::work_item_icons`].
    pub async fn work_item_comments(&self, id: u64) -> Result<Vec<String>, DevOpsError> {
        let api_version = if self.api_version.contains(PREVIEW_SUFFIX) {
            self.api_version.clone()
        } else {
            format!("{}{PREVIEW_SUFFIX}", self.api_version)
        };
        let resp = self
            .get(self.wit_url(&format!("workitems/{id}/comments")))
            .query(&[("api-version", api_version.as_str())])
            .send()
            .await?;
        let comments: CommentsResponse = decode(resp, "comments").await?;
        let lines = comments.into_lines();
        tracing::debug!(id, count = lines.len(), "fetched work item comments");
        Ok(lines)
    }
}

impl WorkItemSource for DevOpsClient {
    type Error = DevOpsError;

    async fn fetch_icons(&self) -> Result<IconMap, DevOpsError> {
        self.work_item_icons().await
    }

    async fn fetch_by_query(&self, query_id: &str) -> Result<Vec<WorkItem>, DevOpsError> {
        let ids = self.query_ids(query_id).await?;
        tracing::info!(query_id, count = ids.len(), "query returned work items");
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.work_items(&ids).await
    }

    async fn fetch_by_id(&self, id: u64) -> Result<WorkItem, DevOpsError> {
        self.work_item(id).await
    }

    async fn fetch_comments(&self, id: u64) -> Result<Vec<String>, DevOpsError> {
        self.work_item_comments(id).await
    }
}
