//! Item: the fundamental building block of the sequence CRDT
//!
//! Each item carries one content unit plus the CRDT metadata needed to
//! re-derive its intended position after concurrent edits:
//! - Unique id
//! - Left/right origin anchors (the items adjacent at insertion time)
//! - Deleted flag (tombstone)
//!
//! Items are the unit of exchange between replicas: a transport ships
//! them as-is and the receiving document integrates them.

use crate::id::Id;
use serde::{Deserialize, Serialize};

/// A single item in the sequence
///
/// Immutable except for the `deleted` flag, which may only transition
/// `false` to `true`. Deleted items are retained as tombstones so the
/// origin anchors of other items keep resolving.
///
/// `None` origins are sentinels: `origin_left: None` means the item was
/// inserted at the start of the document, `origin_right: None` at the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item<T> {
    /// The content unit (e.g. a character)
    pub content: T,

    /// Unique identifier, assigned once, never reused
    pub id: Id,

    /// Item immediately to the left at insertion time (None = start)
    pub origin_left: Option<Id>,

    /// Item immediately to the right at insertion time (None = end)
    pub origin_right: Option<Id>,

    /// Whether this item has been deleted
    pub deleted: bool,
}

impl<T> Item<T> {
    /// Create a new (live) item
    pub fn new(content: T, id: Id, origin_left: Option<Id>, origin_right: Option<Id>) -> Self {
        Self {
            content,
            id,
            origin_left,
            origin_right,
            deleted: false,
        }
    }

    /// Mark this item as deleted
    pub fn delete(&mut self) {
        self.deleted = true;
    }
}
