//! One-level parent/child grouping of fetched work items.
//!
//! Every item lands in exactly one bucket: the bucket of the parent named by
//! its first reverse-hierarchy relation, or the sentinel bucket
//! [`OTHER_PARENT_ID`]. Bucket order is first-seen order with the sentinel
//! first, and items keep their input order inside a bucket.

use std::collections::HashMap;

use rn_core::{OTHER_PARENT_ID, ParentRecord, WorkItem};

/// Parent id declared by the item's first parent relation.
///
/// `None` when the item has no parent relation, or when the relation's
/// target is `0` or not a numeric id.
#[must_use]
pub fn classify_parent(item: &WorkItem) -> Option<u64> {
    item.relations
        .iter()
        .find(|r| r.is_parent())
        .and_then(|r| r.target_segment().parse::<u64>().ok())
        .filter(|&id| id != OTHER_PARENT_ID)
}

/// Work items bucketed by parent id, in first-seen bucket order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentGroups {
    order: Vec<u64>,
    buckets: HashMap<u64, Vec<WorkItem>>,
}

impl Default for ParentGroups {
    fn default() -> Self {
        Self::new()
    }
}

impl ParentGroups {
    /// An empty grouping holding only the sentinel bucket.
    #[must_use]
    pub fn new() -> Self {
        let mut groups = Self {
            order: Vec::new(),
            buckets: HashMap::new(),
        };
        groups.ensure_bucket(OTHER_PARENT_ID);
        groups
    }

    fn ensure_bucket(&mut self, parent_id: u64) {
        if !self.buckets.contains_key(&parent_id) {
            self.order.push(parent_id);
            self.buckets.insert(parent_id, Vec::new());
        }
    }

    fn push(&mut self, parent_id: u64, item: WorkItem) {
        self.ensure_bucket(parent_id);
        if let Some(bucket) = self.buckets.get_mut(&parent_id) {
            bucket.push(item);
        }
    }

    /// Bucket keys in insertion order. Always starts with the sentinel.
    pub fn keys(&self) -> impl Iterator<Item = u64> + '_ {
        self.order.iter().copied()
    }

    /// Keys of real parents that must be fetched, in bucket order.
    pub fn parent_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.keys().filter(|&id| id != OTHER_PARENT_ID)
    }

    /// Items in the bucket for `parent_id`, empty when there is no such bucket.
    #[must_use]
    pub fn bucket(&self, parent_id: u64) -> &[WorkItem] {
        self.buckets.get(&parent_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Buckets in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &[WorkItem])> + '_ {
        self.order.iter().map(|&id| (id, self.bucket(id)))
    }

    /// All grouped items whose (normalized) parent id equals `parent_id`,
    /// scanning every bucket in order.
    pub fn children_of(&self, parent_id: u64) -> impl Iterator<Item = &WorkItem> + '_ {
        self.iter()
            .flat_map(|(_, items)| items.iter())
            .filter(move |item| item.parent_id == parent_id)
    }

    /// Number of buckets, the sentinel included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Never true: the sentinel bucket is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of grouped items across every bucket.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

/// Bucket `items` by parent, normalizing each copy's `parent_id`.
#[must_use]
pub fn group_by_parent(items: &[WorkItem]) -> ParentGroups {
    let mut groups = ParentGroups::new();
    for item in items {
        let mut copy = item.clone();
        if let Some(parent_id) = classify_parent(item) {
            copy.parent_id = parent_id;
            groups.push(parent_id, copy);
        } else {
            tracing::info!(id = item.id, kind = %item.kind, "work item has no parent");
            copy.parent_id = OTHER_PARENT_ID;
            groups.push(OTHER_PARENT_ID, copy);
        }
    }
    tracing::debug!(
        buckets = groups.len(),
        items = groups.item_count(),
        "grouped work items by parent"
    );
    groups
}

/// The sentinel parent collecting items without a declared parent.
#[must_use]
pub fn other_parent() -> ParentRecord {
    ParentRecord::other()
}

/// Section parents keyed by id, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRecords {
    records: Vec<ParentRecord>,
}

impl ParentRecords {
    /// Collect fetched parents in order and append the sentinel.
    ///
    /// A fetched record claiming the sentinel id is dropped, and a repeated
    /// id keeps its first record.
    pub fn from_fetched(fetched: impl IntoIterator<Item = ParentRecord>) -> Self {
        let mut records: Vec<ParentRecord> = Vec::new();
        for record in fetched {
            if record.is_other() {
                tracing::warn!(kind = %record.kind, "ignoring fetched parent with reserved id 0");
                continue;
            }
            if records.iter().any(|r| r.id == record.id) {
                tracing::debug!(id = record.id, "duplicate parent record");
                continue;
            }
            records.push(record);
        }
        records.push(other_parent());
        Self { records }
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&ParentRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParentRecord> + '_ {
        self.records.iter()
    }

    /// Records whose kind is `kind`, in insertion order.
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a ParentRecord> + 'a {
        self.records.iter().filter(move |r| r.kind == kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
