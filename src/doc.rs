//! Document: tombstone sequence, position mapping, integration kernel
//!
//! A document is the ordered list of every item it has ever integrated,
//! tombstones included, plus its vector-clock version and a cached count
//! of visible (non-deleted) items.
//!
//! The physical order is a total order over the integrated set and is
//! uniquely determined by that set: integrating the same items in any two
//! causally-valid orders produces the identical sequence. That property
//! is what [`Doc::integrate`] guarantees, and everything else here is
//! bookkeeping around it.
//!
//! Lookups are linear scans. An id-to-index map or an order-statistics
//! structure would drop them to sublinear time without changing behavior;
//! correctness never depends on it.

use crate::error::{CrdtError, Result};
use crate::id::Id;
use crate::item::Item;
use crate::version::Version;
use serde::{Deserialize, Serialize};

/// An ordered-sequence CRDT document
///
/// Create one per replica, feed it local edits via [`Doc::local_insert`] /
/// [`Doc::local_delete`] and remote items via [`Doc::remote_insert`] or
/// [`Doc::merge_from`](crate::doc::Doc::merge_from), and read the
/// converged content back with [`Doc::to_vec`].
///
/// Not internally synchronized: callers sharing a document across threads
/// must serialize access at call granularity.
///
/// # Examples
///
/// ```rust
/// use weft_core::Doc;
///
/// let mut doc: Doc<char> = Doc::new();
/// doc.local_insert("alice", 0, 'h').unwrap();
/// doc.local_insert("alice", 1, 'i').unwrap();
///
/// assert_eq!(doc.to_vec(), vec!['h', 'i']);
/// assert_eq!(doc.version().get("alice"), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Doc<T> {
    /// Every integrated item in physical order, tombstones included
    pub(crate) items: Vec<Item<T>>,

    /// Causal frontier: highest applied seq per agent
    pub(crate) version: Version,

    /// Cached count of non-deleted items
    #[serde(skip_serializing)]
    pub(crate) visible_len: usize,
}

impl<T> Doc<T> {
    /// Create an empty document
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            version: Version::new(),
            visible_len: 0,
        }
    }

    /// Visible length: the number of non-deleted items
    pub fn len(&self) -> usize {
        self.visible_len
    }

    /// Whether no visible content remains
    pub fn is_empty(&self) -> bool {
        self.visible_len == 0
    }

    /// The document's current version (causal frontier)
    ///
    /// A transport compares versions to compute which items a peer is
    /// missing.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// All integrated items in physical order, tombstones included
    pub fn items(&self) -> &[Item<T>] {
        &self.items
    }

    /// Iterate over visible content in order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items
            .iter()
            .filter(|item| !item.deleted)
            .map(|item| &item.content)
    }

    /// Causal readiness: can `op` be integrated right now?
    ///
    /// True iff `op` is not yet applied, its agent's preceding sequence
    /// number is (unless it is the agent's first), and both origin
    /// anchors are. This predicate is the sole gate protecting
    /// [`Doc::remote_insert`] from references it cannot resolve; session
    /// layers use it to buffer not-yet-ready operations.
    pub fn can_integrate(&self, op: &Item<T>) -> bool {
        let in_version = |origin: &Option<Id>| match origin {
            Some(id) => self.version.contains(id),
            None => true,
        };

        !self.version.contains(&op.id)
            && (op.id.seq == 0 || self.version.contains_seq(&op.id.agent, op.id.seq - 1))
            && in_version(&op.origin_left)
            && in_version(&op.origin_right)
    }

    /// Physical index of an origin on the left side; -1 is the start
    /// sentinel.
    fn left_index(&self, origin: Option<&Id>) -> Result<isize> {
        match origin {
            None => Ok(-1),
            Some(id) => Ok(self.index_of(id)? as isize),
        }
    }

    /// Physical index of an origin on the right side; `items.len()` is
    /// the end sentinel.
    fn right_index(&self, origin: Option<&Id>) -> Result<usize> {
        match origin {
            None => Ok(self.items.len()),
            Some(id) => self.index_of(id),
        }
    }

    fn index_of(&self, needle: &Id) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.id == *needle)
            .ok_or_else(|| CrdtError::MissingReference(needle.clone()))
    }

    /// Map a visible content position to a physical index, skipping
    /// tombstones.
    ///
    /// With `stick_end`, a position landing exactly on a boundary
    /// resolves before a following run of tombstones rather than after.
    /// Deletion uses this so it anchors past already-removed neighbors.
    fn find_at_pos(&self, pos: usize, stick_end: bool) -> Result<usize> {
        let mut remaining = pos;
        for (i, item) in self.items.iter().enumerate() {
            if stick_end && remaining == 0 {
                return Ok(i);
            } else if item.deleted {
                continue;
            } else if remaining == 0 {
                return Ok(i);
            }
            remaining -= 1;
        }

        if remaining == 0 {
            Ok(self.items.len())
        } else {
            Err(CrdtError::OutOfRange {
                pos,
                len: self.visible_len,
            })
        }
    }

    /// Integration kernel: place one new item into the physical sequence.
    ///
    /// This is the conflict-resolution heart of the CRDT. Scanning
    /// forward from just past the left origin, it compares each
    /// already-placed item's origin span against the new item's to decide
    /// whether the new item lands before it; items with the identical
    /// span are a true concurrent conflict, broken by lexicographic agent
    /// order. The resulting placement depends only on the set of
    /// integrated items, never on their arrival order.
    ///
    /// # Errors
    ///
    /// - [`CrdtError::OutOfOrder`] unless `item.id.seq` is exactly one
    ///   past the agent's last recorded seq (0 if none). Re-integrating
    ///   an already-applied id fails the same way; content is never
    ///   duplicated.
    /// - [`CrdtError::MissingReference`] if an origin anchor has not been
    ///   integrated yet. Gate with [`Doc::can_integrate`] to avoid this.
    fn integrate(&mut self, item: Item<T>) -> Result<()> {
        let expected = self.version.next_seq(&item.id.agent);
        if item.id.seq != expected {
            return Err(CrdtError::OutOfOrder {
                agent: item.id.agent.clone(),
                id: item.id,
                expected,
            });
        }

        let left = self.left_index(item.origin_left.as_ref())?;
        let right = self.right_index(item.origin_right.as_ref())?;

        let mut dest = (left + 1) as usize;
        let mut scanning = false;

        // Scan forward from dest until the insertion point is unambiguous.
        let mut i = dest;
        loop {
            if !scanning {
                dest = i;
            }
            // End of document, or the right origin: no concurrency left.
            if i == self.items.len() || i == right {
                break;
            }

            let other = &self.items[i];
            let oleft = self.left_index(other.origin_left.as_ref())?;
            let oright = self.right_index(other.origin_right.as_ref())?;

            if oleft < left {
                // Everything from here on sorts after the new item.
                break;
            } else if oleft == left {
                if oright < right {
                    // Ambiguous overlap. We might insert after `other`,
                    // but can't tell until a later item decides it.
                    scanning = true;
                } else if oright == right {
                    // Identical origin span: a true concurrent conflict.
                    // Lower agent sorts first.
                    if item.id.agent < other.id.agent {
                        break;
                    }
                    scanning = false;
                } else {
                    scanning = false;
                }
            }
            // oleft > left: belongs to a nested span, skip past it.

            i += 1;
        }

        self.items.insert(dest, item);
        let inserted = &self.items[dest];
        self.version.record(&inserted.id);
        if !inserted.deleted {
            self.visible_len += 1;
        }
        Ok(())
    }

    /// Apply one already-anchored item arriving from another replica
    ///
    /// The item must carry its id and origins; fails per the
    /// [`Doc::integrate`] preconditions if delivered out of causal order.
    pub fn remote_insert(&mut self, item: Item<T>) -> Result<()> {
        self.integrate(item)
    }

    /// Insert one content unit at a visible position as the given agent
    ///
    /// Mints the agent's next sequence number and anchors the item to its
    /// current physical neighbors.
    pub fn local_insert(&mut self, agent: &str, pos: usize, content: T) -> Result<()> {
        let i = self.find_at_pos(pos, false)?;
        let origin_left = if i == 0 {
            None
        } else {
            Some(self.items[i - 1].id.clone())
        };
        let origin_right = self.items.get(i).map(|item| item.id.clone());
        let id = Id::new(agent, self.version.next_seq(agent));
        self.integrate(Item::new(content, id, origin_left, origin_right))
    }

    /// Delete `count` visible units starting at `pos`
    ///
    /// Flips tombstone flags on the next `count` non-deleted items,
    /// skipping items already deleted. Deletions mint no identifier of
    /// their own; propagation happens structurally during merge.
    pub fn local_delete(&mut self, pos: usize, count: usize) -> Result<()> {
        match pos.checked_add(count) {
            Some(end) if end <= self.visible_len => {}
            _ => {
                return Err(CrdtError::OutOfRange {
                    pos,
                    len: self.visible_len,
                })
            }
        }
        if count == 0 {
            return Ok(());
        }

        let mut idx = self.find_at_pos(pos, true)?;
        let mut remaining = count;
        while remaining > 0 {
            let item = &mut self.items[idx];
            if !item.deleted {
                item.deleted = true;
                self.visible_len -= 1;
                remaining -= 1;
            }
            idx += 1;
        }
        Ok(())
    }

    /// Tombstone the item at a physical index, keeping the cache honest.
    pub(crate) fn tombstone_at(&mut self, idx: usize) {
        let item = &mut self.items[idx];
        if !item.deleted {
            item.deleted = true;
            self.visible_len -= 1;
        }
    }
}

impl<T: Clone> Doc<T> {
    /// Materialize the visible content in order
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Default for Doc<T> {
    fn default() -> Self {
        Self::new()
    }
}

// The visible-length cache is derived state: recompute it from the item
// list instead of trusting serialized input.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Doc<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct DocHelper<T> {
            items: Vec<Item<T>>,
            version: Version,
        }

        let helper = DocHelper::deserialize(deserializer)?;
        let visible_len = helper.items.iter().filter(|item| !item.deleted).count();

        Ok(Self {
            items: helper.items,
            version: helper.version,
            visible_len,
        })
    }
}
