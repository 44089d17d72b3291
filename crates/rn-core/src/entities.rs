//! Work items as fetched from the tracker and the parent records that head
//! each release-notes section.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::WorkItemKind;

/// Relation kind pointing from a child to its parent.
pub const PARENT_RELATION: &str = "System.LinkTypes.Hierarchy-Reverse";

/// Reserved id of the synthetic "Other" parent. Never a real tracker id.
pub const OTHER_PARENT_ID: u64 = 0;

/// Icon URL per work-item kind.
pub type IconMap = BTreeMap<String, String>;

/// A link from one work item to another resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub rel: String,
    pub url: String,
}

impl Relation {
    #[must_use]
    pub fn is_parent(&self) -> bool {
        self.rel == PARENT_RELATION
    }

    /// Final path segment of the relation URL, ignoring trailing slashes.
    #[must_use]
    pub fn target_segment(&self) -> &str {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }
}

/// A tracked issue, task or feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: u64,
    /// Work-item type as named by the tracker (`Bug`, `User Story`, ...).
    pub kind: String,
    pub title: String,
    /// Parent id, `0` when the item has none.
    #[serde(default)]
    pub parent_id: u64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub repro_steps: String,
    #[serde(default)]
    pub acceptance_criteria: String,
    /// Browser URL of the item.
    pub link: String,
    /// Icon the tracker attached to this item, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Number of discussion comments the tracker reports for the item.
    #[serde(default)]
    pub comment_count: u64,
    /// Discussion comments as `date | author | text`, newest first. Only
    /// loaded when the item is going to be summarized.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<Relation>,
}

/// Head of a release-notes section: a fetched parent work item or the
/// synthetic "Other" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRecord {
    pub id: u64,
    pub kind: String,
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub icon: Option<String>,
}

impl ParentRecord {
    /// Icon used for the sentinel when the tracker has no icon for `Other`.
    pub const OTHER_ICON: &'static str = "https://tfsproduks1.visualstudio.com/_apis/wit/workItemIcons/icon_clipboard_issue?color=577275&v=2";

    /// The sentinel parent collecting items without a declared parent.
    #[must_use]
    pub fn other() -> Self {
        Self {
            id: OTHER_PARENT_ID,
            kind: WorkItemKind::Other.as_str().to_string(),
            title: WorkItemKind::Other.as_str().to_string(),
            link: "#".to_string(),
            icon: Some(Self::OTHER_ICON.to_string()),
        }
    }

    #[must_use]
    pub const fn is_other(&self) -> bool {
        self.id == OTHER_PARENT_ID
    }
}

impl From<WorkItem> for ParentRecord {
    fn from(item: WorkItem) -> Self {
        Self {
            id: item.id,
            kind: item.kind,
            title: item.title,
            link: item.link,
            icon: item.icon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn relation(rel: &str, url: &str) -> Relation {
        Relation {
            rel: rel.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn parent_relation_detected() {
        let rel = relation(
            PARENT_RELATION,
            "https://dev.azure.com/org/_apis/wit/workItems/42",
        );
        assert!(rel.is_parent());
        assert_eq!(rel.target_segment(), "42");
    }

    #[test]
    fn target_segment_ignores_trailing_slash() {
        let rel = relation(PARENT_RELATION, "https://x/_apis/wit/workItems/7/");
        assert_eq!(rel.target_segment(), "7");
    }

    #[test]
    fn child_relation_is_not_parent() {
        let rel = relation("System.LinkTypes.Hierarchy-Forward", "https://x/1");
        assert!(!rel.is_parent());
    }

    #[test]
    fn other_sentinel_fields() {
        let other = ParentRecord::other();
        assert!(other.is_other());
        assert_eq!(other.kind, "Other");
        assert_eq!(other.title, "Other");
        assert_eq!(other.link, "#");
        assert_eq!(other.icon.as_deref(), Some(ParentRecord::OTHER_ICON));
    }

    #[test]
    fn parent_record_from_work_item() {
        let item = WorkItem {
            id: 12,
            kind: "Feature".to_string(),
            title: "Login".to_string(),
            parent_id: 0,
            description: String::new(),
            repro_steps: String::new(),
            acceptance_criteria: String::new(),
            link: "https://dev.azure.com/org/project/_workitems/edit/12".to_string(),
            icon: Some("https://icons/feature".to_string()),
            comment_count: 0,
            comments: Vec::new(),
            relations: Vec::new(),
        };
        let record = ParentRecord::from(item);
        assert_eq!(record.id, 12);
        assert_eq!(record.kind, "Feature");
        assert!(!record.is_other());
    }

    #[test]
    fn work_item_deserializes_with_defaults() {
        let item: WorkItem = serde_json::from_str(
            r#"{"id": 3, "kind": "Bug", "title": "Crash", "link": "https://x/3"}"#,
        )
        .unwrap();
        assert_eq!(item.parent_id, 0);
        assert!(item.description.is_empty());
        assert!(item.relations.is_empty());
        assert!(item.icon.is_none());
        assert_eq!(item.comment_count, 0);
        assert!(item.comments.is_empty());
    }
}
