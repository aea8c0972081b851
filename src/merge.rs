//! Merge: full reconciliation of two replicas
//!
//! Brings a destination document up to date with everything a source
//! document has recorded, in two phases:
//!
//! 1. **Insertion closure**: every item present in the source but not
//!    yet reflected in the destination's version is integrated through
//!    the regular kernel, in repeated passes, each pass taking whichever
//!    pending items are causally ready. A pass that integrates nothing
//!    while items remain pending aborts with
//!    [`CrdtError::MergeStalled`] instead of spinning.
//! 2. **Deletion propagation**: two documents that have integrated the
//!    same items agree on those items' relative order, so the sequences
//!    can be walked in lockstep by identity, skipping items one side
//!    lacks, copying tombstone flags across. Deletion is monotonic:
//!    flags are only ever set, never cleared.
//!
//! Merging is commutative and idempotent: `a.merge_from(&b)` followed by
//! `b.merge_from(&a)` leaves both materializing identically, and merging
//! an already-current source changes nothing. A failed merge surfaces its
//! error; there is no partial-merge state to resume.

use crate::doc::Doc;
use crate::error::{CrdtError, Result};
use crate::item::Item;

impl<T: Clone> Doc<T> {
    /// Merge every insertion and deletion recorded in `src` into `self`
    ///
    /// # Errors
    ///
    /// [`CrdtError::MergeStalled`] if the source's pending items contain
    /// an unsatisfiable dependency; [`CrdtError::MissingReference`] if a
    /// source item has no counterpart after the insertion closure. Both
    /// indicate a corrupted source, not a retriable condition.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weft_core::Doc;
    ///
    /// let mut a: Doc<char> = Doc::new();
    /// let mut b: Doc<char> = Doc::new();
    /// a.local_insert("alice", 0, 'x').unwrap();
    /// b.local_insert("bob", 0, 'y').unwrap();
    ///
    /// a.merge_from(&b).unwrap();
    /// b.merge_from(&a).unwrap();
    ///
    /// assert_eq!(a.to_vec(), b.to_vec());
    /// ```
    pub fn merge_from(&mut self, src: &Doc<T>) -> Result<()> {
        // Phase 1: integrate everything we haven't seen, in causal order.
        let mut missing: Vec<Option<&Item<T>>> = src
            .items()
            .iter()
            .filter(|item| !self.version().contains(&item.id))
            .map(Some)
            .collect();
        let mut remaining = missing.len();

        while remaining > 0 {
            let mut merged_this_pass = 0;

            for slot in missing.iter_mut() {
                let Some(op) = *slot else { continue };
                if !self.can_integrate(op) {
                    continue;
                }
                self.remote_insert(op.clone())?;
                *slot = None;
                remaining -= 1;
                merged_this_pass += 1;
            }

            if merged_this_pass == 0 {
                return Err(CrdtError::MergeStalled { remaining });
            }
        }

        // Phase 2: walk both sequences in lockstep by identity and copy
        // tombstone flags. `self` may hold items `src` lacks; skip them.
        let mut dest_idx = 0;
        for src_item in src.items() {
            loop {
                match self.items.get(dest_idx) {
                    Some(dest_item) if dest_item.id == src_item.id => break,
                    Some(_) => dest_idx += 1,
                    // Phase 1 completed, so every src item must be here.
                    None => return Err(CrdtError::MissingReference(src_item.id.clone())),
                }
            }

            if src_item.deleted {
                self.tombstone_at(dest_idx);
            }
            dest_idx += 1;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::Id;
    use crate::version::Version;

    #[test]
    fn test_merge_into_empty() {
        let mut src = Doc::new();
        src.local_insert("A", 0, 'a').unwrap();
        src.local_insert("A", 1, 'b').unwrap();

        let mut dest = Doc::new();
        dest.merge_from(&src).unwrap();

        assert_eq!(dest.to_vec(), vec!['a', 'b']);
        assert_eq!(dest.version().get("A"), Some(1));
    }

    #[test]
    fn test_merge_idempotent() {
        let mut src = Doc::new();
        src.local_insert("A", 0, 'a').unwrap();

        let mut dest = Doc::new();
        dest.merge_from(&src).unwrap();
        let snapshot = dest.clone();

        dest.merge_from(&src).unwrap();
        assert_eq!(dest, snapshot);
    }

    #[test]
    fn test_merge_propagates_deletions() {
        let mut a = Doc::new();
        for (i, ch) in "abc".chars().enumerate() {
            a.local_insert("A", i, ch).unwrap();
        }

        let mut b = Doc::new();
        b.merge_from(&a).unwrap();

        a.local_delete(1, 1).unwrap();
        b.merge_from(&a).unwrap();

        assert_eq!(b.to_vec(), vec!['a', 'c']);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_deletion_is_monotonic() {
        let mut a = Doc::new();
        a.local_insert("A", 0, 'x').unwrap();

        let mut b = Doc::new();
        b.merge_from(&a).unwrap();
        b.local_delete(0, 1).unwrap();

        // Merging the still-live copy back must not resurrect the item
        b.merge_from(&a).unwrap();
        assert!(b.is_empty());

        // And the tombstone travels the other way
        a.merge_from(&b).unwrap();
        assert!(a.is_empty());
    }

    #[test]
    fn test_merge_stalled_on_unsatisfiable_source() {
        // A source claiming seq 1 with seq 0 nowhere in sight can never
        // become ready. Built by hand: integrate() would refuse it.
        let orphan = Item::new('x', Id::new("ghost", 1), None, None);
        let mut version = Version::new();
        version.record(&orphan.id);
        let src = Doc {
            items: vec![orphan],
            version,
            visible_len: 1,
        };

        let mut dest: Doc<char> = Doc::new();
        assert_eq!(
            dest.merge_from(&src),
            Err(CrdtError::MergeStalled { remaining: 1 })
        );
    }
}
