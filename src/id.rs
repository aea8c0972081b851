//! Operation ID: unique identifier for sequence items
//!
//! Each item in the sequence CRDT carries a unique ID composed of:
//! - Agent: the replica that created the item (opaque, globally unique)
//! - Seq: position in that agent's own operation history
//!
//! Agents assign sequence numbers contiguously starting at 0, so (agent,
//! seq) pairs compress well and double as vector-clock entries.

use crate::AgentId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a sequence item
///
/// Identifiers are compared structurally for equality. There is
/// deliberately no `Ord` implementation: the only ordering the CRDT ever
/// applies to ids is the lexicographic agent-string tie-break inside the
/// integration kernel, which never looks at sequence numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Id {
    /// Agent that created this item
    pub agent: AgentId,

    /// Sequence number within that agent's history (starts at 0)
    pub seq: u64,
}

impl Id {
    /// Create a new id
    pub fn new(agent: impl Into<AgentId>, seq: u64) -> Self {
        Self {
            agent: agent.into(),
            seq,
        }
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.agent, self.seq)
    }
}
