//! Response shapes of the work-item tracking REST API and their mapping to
//! [`rn_core`] types.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use rn_core::{IconMap, Relation, WorkItem};
use serde::Deserialize;

static API_ITEM_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)_apis/wit/workitems").expect("API_ITEM_PATH regex should compile")
});

// ── workitemtypes ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TypesResponse {
    pub value: Vec<RawType>,
}

#[derive(Debug, Deserialize)]
pub struct RawType {
    pub name: String,
    #[serde(default)]
    pub icon: Option<UrlRef>,
}

#[derive(Debug, Deserialize)]
pub struct UrlRef {
    pub url: String,
}

impl TypesResponse {
    /// Kinds without an icon are left out of the map.
    pub fn into_icon_map(self) -> IconMap {
        self.value
            .into_iter()
            .filter_map(|t| t.icon.map(|icon| (t.name, icon.url)))
            .collect()
    }
}

// ── wiql ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct WiqlResponse {
    #[serde(rename = "workItems")]
    pub work_items: Vec<WiqlRef>,
}

#[derive(Debug, Deserialize)]
pub struct WiqlRef {
    pub id: u64,
}

// ── workitems ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct BatchResponse {
    pub value: Vec<RawWorkItem>,
}

#[derive(Debug, Deserialize)]
pub struct RawWorkItem {
    pub id: u64,
    pub fields: RawFields,
    #[serde(default)]
    pub relations: Vec<RawRelation>,
    #[serde(rename = "_links", default)]
    pub links: Option<RawLinks>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct RawFields {
    #[serde(rename = "System.WorkItemType")]
    pub kind: String,
    #[serde(rename = "System.Title")]
    pub title: String,
    #[serde(rename = "System.Description", default)]
    pub description: Option<String>,
    #[serde(rename = "System.Parent", default)]
    pub parent: Option<u64>,
    #[serde(rename = "Microsoft.VSTS.TCM.ReproSteps", default)]
    pub repro_steps: Option<String>,
    #[serde(rename = "Microsoft.VSTS.Common.AcceptanceCriteria", default)]
    pub acceptance_criteria: Option<String>,
    #[serde(rename = "System.CommentCount", default)]
    pub comment_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct RawRelation {
    pub rel: String,
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawLinks {
    #[serde(default)]
    pub html: Option<Href>,
    #[serde(rename = "workItemIcon", default)]
    pub work_item_icon: Option<UrlRef>,
}

#[derive(Debug, Deserialize)]
pub struct Href {
    pub href: String,
}

impl From<RawWorkItem> for WorkItem {
    fn from(raw: RawWorkItem) -> Self {
        let links = raw.links.unwrap_or_default();
        let link = links
            .html
            .map_or_else(|| edit_link(&raw.url), |html| html.href);
        Self {
            id: raw.id,
            kind: raw.fields.kind,
            title: raw.fields.title,
            parent_id: raw.fields.parent.unwrap_or_default(),
            description: raw.fields.description.unwrap_or_default(),
            repro_steps: raw.fields.repro_steps.unwrap_or_default(),
            acceptance_criteria: raw.fields.acceptance_criteria.unwrap_or_default(),
            link,
            icon: links.work_item_icon.map(|icon| icon.url),
            comment_count: raw.fields.comment_count,
            comments: Vec::new(),
            relations: raw
                .relations
                .into_iter()
                .map(|r| Relation { rel: r.rel, url: r.url })
                .collect(),
        }
    }
}

// ── comments ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CommentsResponse {
    pub comments: Vec<RawComment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawComment {
    pub text: String,
    pub modified_date: DateTime<Utc>,
    pub modified_by: RawIdentity,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIdentity {
    pub display_name: String,
}

impl CommentsResponse {
    /// Comment lines as `dd-mm-yyyy HH:MM | author | text`, newest first.
    pub fn into_lines(mut self) -> Vec<String> {
        self.comments.sort_by(|a, b| b.modified_date.cmp(&a.modified_date));
        self.comments
            .into_iter()
            .map(|c| {
                format!(
                    "{} | {} | {}",
                    c.modified_date.format("%d-%m-%Y %H:%M"),
                    display_name(&c.modified_by.display_name),
                    c.text
                )
            })
            .collect()
    }
}

/// `first.last` account names read as `First Last`; anything else is kept.
fn display_name(raw: &str) -> String {
    match raw.split('.').collect::<Vec<_>>().as_slice() {
        [first, last] if !first.is_empty() && !last.is_empty() => {
            format!("{} {}", capitalize(first), capitalize(last))
        }
        _ => raw.to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Browser URL for an item from its REST URL.
pub fn edit_link(api_url: &str) -> String {
    API_ITEM_PATH
        .replace(api_url, "_workitems/edit")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ITEM_FIXTURE: &str = r#"{
        "id": 101,
        "rev": 4,
        "fields": {
            "System.WorkItemType": "Bug",
            "System.Title": "Checkout total ignores <b>discount</b>",
            "System.State": "Resolved",
            "System.Parent": 12,
            "System.Description": "<div>Totals were wrong</div>",
            "Microsoft.VSTS.TCM.ReproSteps": "Add coupon, check total"
        },
        "relations": [
            {
                "rel": "System.LinkTypes.Hierarchy-Reverse",
                "url": "https://dev.azure.com/contoso/_apis/wit/workItems/12",
                "attributes": {"isLocked": false, "name": "Parent"}
            },
            {
                "rel": "ArtifactLink",
                "url": "vstfs:///Git/Commit/abc",
                "attributes": {"name": "Fixed in Commit"}
            }
        ],
        "_links": {
            "html": {"href": "https://dev.azure.com/contoso/Shop/_workitems/edit/101"},
            "workItemIcon": {"url": "https://icons/bug"}
        },
        "url": "https://dev.azure.com/contoso/Shop/_apis/wit/workItems/101"
    }"#;

    #[test]
    fn maps_full_item() {
        let raw: RawWorkItem = serde_json::from_str(ITEM_FIXTURE).unwrap();
        let item = WorkItem::from(raw);
        assert_eq!(item.id, 101);
        assert_eq!(item.kind, "Bug");
        assert_eq!(item.parent_id, 12);
        assert_eq!(item.description, "<div>Totals were wrong</div>");
        assert_eq!(item.repro_steps, "Add coupon, check total");
        assert!(item.acceptance_criteria.is_empty());
        assert_eq!(
            item.link,
            "https://dev.azure.com/contoso/Shop/_workitems/edit/101"
        );
        assert_eq!(item.icon.as_deref(), Some("https://icons/bug"));
        assert_eq!(item.relations.len(), 2);
        assert!(item.relations[0].is_parent());
    }

    #[test]
    fn link_falls_back_to_edit_url() {
        let raw: RawWorkItem = serde_json::from_str(
            r#"{
                "id": 7,
                "fields": {"System.WorkItemType": "Task", "System.Title": "Tidy"},
                "url": "https://dev.azure.com/contoso/Shop/_apis/wit/workItems/7"
            }"#,
        )
        .unwrap();
        let item = WorkItem::from(raw);
        assert_eq!(item.link, "https://dev.azure.com/contoso/Shop/_workitems/edit/7");
        assert_eq!(item.parent_id, 0);
        assert!(item.relations.is_empty());
    }

    #[test]
    fn missing_title_is_a_shape_error() {
        let parsed = serde_json::from_str::<RawWorkItem>(
            r#"{"id": 7, "fields": {"System.WorkItemType": "Task"}}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn icon_map_skips_kinds_without_icon() {
        let types: TypesResponse = serde_json::from_str(
            r#"{"count": 3, "value": [
                {"name": "Bug", "icon": {"id": "icon_insect", "url": "https://icons/bug"}},
                {"name": "Feature", "icon": {"id": "icon_trophy", "url": "https://icons/feature"}},
                {"name": "Shared Steps"}
            ]}"#,
        )
        .unwrap();
        let icons = types.into_icon_map();
        assert_eq!(icons.len(), 2);
        assert_eq!(icons["Feature"], "https://icons/feature");
    }

    #[test]
    fn wiql_ids_in_order() {
        let wiql: WiqlResponse = serde_json::from_str(
            r#"{"queryType": "flat", "workItems": [
                {"id": 5, "url": "u"}, {"id": 3, "url": "u"}
            ]}"#,
        )
        .unwrap();
        let ids: Vec<u64> = wiql.work_items.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![5, 3]);
    }

    #[test]
    fn tree_query_has_no_flat_item_list() {
        let parsed = serde_json::from_str::<WiqlResponse>(
            r#"{"queryType": "tree", "workItemRelations": [
                {"rel": null, "source": null, "target": {"id": 5}}
            ]}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn batch_without_value_is_a_shape_error() {
        assert!(serde_json::from_str::<BatchResponse>(r#"{"count": 0}"#).is_err());
        assert!(serde_json::from_str::<TypesResponse>(r#"{"count": 0}"#).is_err());
    }

    #[test]
    fn comment_count_is_read() {
        let raw: RawWorkItem = serde_json::from_str(
            r#"{
                "id": 9,
                "fields": {
                    "System.WorkItemType": "Bug",
                    "System.Title": "Crash",
                    "System.CommentCount": 3
                }
            }"#,
        )
        .unwrap();
        let item = WorkItem::from(raw);
        assert_eq!(item.comment_count, 3);
        assert!(item.comments.is_empty());
    }

    #[test]
    fn comments_newest_first_with_readable_author() {
        let response: CommentsResponse = serde_json::from_str(
            r#"{"totalCount": 2, "count": 2, "comments": [
                {
                    "id": 1,
                    "text": "<div>Seen on staging</div>",
                    "modifiedBy": {"displayName": "jane.doe", "uniqueName": "jane@contoso.com"},
                    "modifiedDate": "2024-03-01T09:05:00Z"
                },
                {
                    "id": 2,
                    "text": "Fixed in build 42",
                    "modifiedBy": {"displayName": "Build Service"},
                    "modifiedDate": "2024-03-04T17:30:12.517Z"
                }
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            response.into_lines(),
            vec![
                "04-03-2024 17:30 | Build Service | Fixed in build 42".to_string(),
                "01-03-2024 09:05 | Jane Doe | <div>Seen on staging</div>".to_string(),
            ]
        );
    }

    #[test]
    fn display_name_only_splits_two_part_names() {
        assert_eq!(display_name("JOHN.smith"), "John Smith");
        assert_eq!(display_name("a.b.c"), "a.b.c");
        assert_eq!(display_name("Jane Doe"), "Jane Doe");
        assert_eq!(display_name(".hidden"), ".hidden");
    }
}
