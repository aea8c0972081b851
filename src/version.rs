//! Version: vector clock over agent histories
//!
//! A document's version maps each agent to the highest sequence number
//! from that agent already incorporated into the document. Because agents
//! issue sequence numbers contiguously and the integration kernel rejects
//! gaps, an entry of N means seq 0..=N from that agent have all been
//! applied. The version is a replica's causal frontier: a transport
//! compares two versions to compute what a peer is missing.

use crate::id::Id;
use crate::AgentId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-agent highest-applied sequence number
///
/// Monotonically non-decreasing per agent; never has gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    seen: HashMap<AgentId, u64>,
}

impl Version {
    /// Create an empty version (nothing applied from any agent)
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest applied sequence number for an agent, if any
    pub fn get(&self, agent: &str) -> Option<u64> {
        self.seen.get(agent).copied()
    }

    /// Whether the given id is already reflected in this version
    pub fn contains(&self, id: &Id) -> bool {
        self.contains_seq(&id.agent, id.seq)
    }

    /// Whether (agent, seq) is already reflected in this version
    pub fn contains_seq(&self, agent: &str, seq: u64) -> bool {
        match self.seen.get(agent) {
            Some(&last) => last >= seq,
            None => false,
        }
    }

    /// The sequence number this version expects next from an agent
    pub fn next_seq(&self, agent: &str) -> u64 {
        match self.seen.get(agent) {
            Some(&last) => last + 1,
            None => 0,
        }
    }

    /// Record an applied id
    ///
    /// Monotonic: recording an already-seen id is a no-op.
    pub fn record(&mut self, id: &Id) {
        let entry = self.seen.entry(id.agent.clone()).or_insert(id.seq);
        if *entry < id.seq {
            *entry = id.seq;
        }
    }

    /// Iterate over (agent, highest seq) entries
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.seen.iter().map(|(agent, &seq)| (agent.as_str(), seq))
    }

    /// Whether nothing has been applied yet
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_version() {
        let v = Version::new();
        assert!(v.is_empty());
        assert_eq!(v.get("alice"), None);
        assert_eq!(v.next_seq("alice"), 0);
        assert!(!v.contains(&Id::new("alice", 0)));
    }

    #[test]
    fn test_record_and_contains() {
        let mut v = Version::new();
        v.record(&Id::new("alice", 0));
        v.record(&Id::new("alice", 1));

        assert_eq!(v.get("alice"), Some(1));
        assert_eq!(v.next_seq("alice"), 2);

        // Everything up to the frontier counts as contained
        assert!(v.contains(&Id::new("alice", 0)));
        assert!(v.contains(&Id::new("alice", 1)));
        assert!(!v.contains(&Id::new("alice", 2)));
        assert!(!v.contains(&Id::new("bob", 0)));
    }

    #[test]
    fn test_record_is_monotonic() {
        let mut v = Version::new();
        v.record(&Id::new("alice", 5));
        v.record(&Id::new("alice", 3)); // Should not decrease
        assert_eq!(v.get("alice"), Some(5));
    }
}
