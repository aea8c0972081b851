//! Weft Core - Sequence CRDT engine
//!
//! This is the algorithmic core of Weft: an ordered-sequence CRDT in the
//! Yjs/FugueMax family. Multiple replicas edit independently (offline if
//! need be) and reconcile later; as long as causal dependencies are
//! respected, every replica converges to the identical sequence no matter
//! what order operations are applied in.
//!
//! It implements:
//! - (agent, seq) operation identifiers and vector-clock versions
//! - A tombstone-based item sequence with origin anchors
//! - The integration kernel resolving concurrent inserts deterministically
//! - Full-replica merge (insertion closure + deletion propagation)
//! - A facade binding an agent identity to a document
//!
//! Transport, persistence, and editor bindings live in other layers; the
//! unit of exchange between them and this crate is the [`Item`] record.
//!
//! # Examples
//!
//! ```rust
//! use weft_core::Replica;
//!
//! let mut alice = Replica::new("alice");
//! let mut bob = Replica::new("bob");
//!
//! alice.insert_str(0, "hello").unwrap();
//! bob.insert_str(0, "world").unwrap();
//!
//! alice.merge_from(&bob).unwrap();
//! bob.merge_from(&alice).unwrap();
//!
//! assert_eq!(alice.text(), bob.text());
//! ```

pub mod doc;
pub mod error;
pub mod id;
pub mod item;
pub mod merge;
pub mod replica;
pub mod version;

// Re-exports for convenience
pub use doc::Doc;
pub use error::{CrdtError, Result};
pub use id::Id;
pub use item::Item;
pub use replica::Replica;
pub use version::Version;

/// Agent (replica) identifier type
///
/// Globally unique per replica. Callers own identity issuance; see
/// [`Replica::with_random_agent`] for a uuid-backed convenience.
pub type AgentId = String;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_import() {
        // Smoke test that modules compile
        let _agent: AgentId = "test-agent".to_string();
        let _doc: Doc<char> = Doc::new();
    }
}
