//! Error types for the sequence CRDT core
//!
//! Every variant is a precondition violation, not a recoverable runtime
//! condition: the core enforces its invariants and surfaces violations to
//! the caller instead of retrying or papering over them. A transport or
//! session layer is responsible for buffering operations until their
//! causal dependencies are satisfied (see [`crate::doc::Doc::can_integrate`]).

use crate::id::Id;
use thiserror::Error;

/// Errors surfaced by document operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrdtError {
    /// An operation's sequence number is not exactly one past the last
    /// recorded sequence number for its agent. Signals a causal-delivery
    /// bug upstream: each agent's own operations must be integrated in
    /// the order the agent issued them.
    #[error("operation {id} out of order: expected seq {expected} for agent {agent}")]
    OutOfOrder {
        /// The offending operation id
        id: Id,
        /// The agent whose history has the gap
        agent: String,
        /// The sequence number the document expected next
        expected: u64,
    },

    /// An origin or lookup identifier could not be located in the
    /// document. Never occurs if the readiness predicate was honored
    /// before integrating.
    #[error("referenced item {0} not found in document")]
    MissingReference(Id),

    /// A position argument exceeds the current visible length.
    #[error("position {pos} past end of document (visible length {len})")]
    OutOfRange { pos: usize, len: usize },

    /// The merge insertion-closure loop completed a full pass over a
    /// non-empty pending set without integrating anything: the source
    /// contains an unsatisfiable or cyclic dependency set.
    #[error("merge stalled with {remaining} items pending; dependency set is unsatisfiable")]
    MergeStalled { remaining: usize },
}

/// Result type alias for CRDT operations
pub type Result<T> = std::result::Result<T, CrdtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CrdtError::OutOfRange { pos: 9, len: 3 };
        assert_eq!(
            err.to_string(),
            "position 9 past end of document (visible length 3)"
        );

        let err = CrdtError::MissingReference(Id::new("alice", 4));
        assert_eq!(err.to_string(), "referenced item alice:4 not found in document");
    }
}
