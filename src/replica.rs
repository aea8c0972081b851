//! Replica: a document bound to one agent identity
//!
//! Convenience wrapper for callers driving a document as a single live
//! actor: multi-unit insert and delete at visible positions, peer merge,
//! materialization, reset. All algorithmic work is delegated to
//! [`Doc`]; this layer only threads the agent through.

use crate::doc::Doc;
use crate::error::Result;
use crate::AgentId;
use serde::{Deserialize, Serialize};

/// A sequence document owned by one agent
///
/// The agent string must be globally unique across replicas; two
/// replicas sharing an agent will collide on sequence numbers.
///
/// # Examples
///
/// ```rust
/// use weft_core::Replica;
///
/// let mut doc = Replica::new("alice");
/// doc.insert_str(0, "hello world").unwrap();
/// doc.delete(5, 6).unwrap();
///
/// assert_eq!(doc.text(), "hello");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replica<T = char> {
    doc: Doc<T>,
    agent: AgentId,
}

impl<T: Clone> Replica<T> {
    /// Create an empty replica for the given agent
    pub fn new(agent: impl Into<AgentId>) -> Self {
        Self {
            doc: Doc::new(),
            agent: agent.into(),
        }
    }

    /// Create an empty replica with a fresh uuid agent
    pub fn with_random_agent() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }

    /// The agent identity bound to this replica
    pub fn agent(&self) -> &str {
        &self.agent
    }

    /// The underlying document
    ///
    /// Transports read [`Doc::version`] and [`Doc::items`] from here to
    /// compute and ship what a peer is missing.
    pub fn doc(&self) -> &Doc<T> {
        &self.doc
    }

    /// Insert content units at a visible position
    ///
    /// Issued as repeated single-unit inserts with the position advanced
    /// by one each time, so each unit anchors on its predecessor.
    pub fn insert<I>(&mut self, pos: usize, content: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let mut pos = pos;
        for unit in content {
            self.doc.local_insert(&self.agent, pos, unit)?;
            pos += 1;
        }
        Ok(())
    }

    /// Delete `count` visible units starting at `pos`
    pub fn delete(&mut self, pos: usize, count: usize) -> Result<()> {
        self.doc.local_delete(pos, count)
    }

    /// Merge everything a peer has recorded into this replica
    pub fn merge_from(&mut self, other: &Replica<T>) -> Result<()> {
        self.doc.merge_from(&other.doc)
    }

    /// Materialize the visible content in order
    pub fn to_vec(&self) -> Vec<T> {
        self.doc.to_vec()
    }

    /// Visible length
    pub fn len(&self) -> usize {
        self.doc.len()
    }

    /// Whether no visible content remains
    pub fn is_empty(&self) -> bool {
        self.doc.is_empty()
    }

    /// Replace the document with a fresh empty one
    ///
    /// The agent identity is kept; discarded history has no teardown
    /// obligations.
    pub fn reset(&mut self) {
        self.doc = Doc::new();
    }
}

impl Replica<char> {
    /// Insert a string at a visible position, one item per char
    pub fn insert_str(&mut self, pos: usize, text: &str) -> Result<()> {
        self.insert(pos, text.chars())
    }

    /// Materialize the visible content as a string
    pub fn text(&self) -> String {
        self.doc.iter().collect()
    }
}
