use std::collections::HashMap;

use crate::graph::ids::{Fingerprint, NodeId};

/// Global fingerprint -> node mapping; this is what merges transpositions.
#[derive(Debug, Clone, Default)]
pub struct TranspositionTable {
    entries: HashMap<Fingerprint, NodeId>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical node registered for `fingerprint`, if any.
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<NodeId> {
        self.entries.get(fingerprint).copied()
    }

    /// Register `node_id` for `fingerprint` unless a node is already registered.
    /// First writer wins: the returned id is the one callers must use.
    pub fn put_if_absent(&mut self, fingerprint: Fingerprint, node_id: NodeId) -> NodeId {
        *self.entries.entry(fingerprint).or_insert(node_id)
    }

    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.entries.contains_key(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_writer_wins() {
        let mut table = TranspositionTable::new();
        let key = Fingerprint::from_features(&[1.0, 2.0]);

        assert_eq!(table.put_if_absent(key.clone(), NodeId::from(4)), NodeId::from(4));
        assert_eq!(table.put_if_absent(key.clone(), NodeId::from(9)), NodeId::from(4));
        assert_eq!(table.get(&key), Some(NodeId::from(4)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn unknown_fingerprint_is_absent() {
        let table = TranspositionTable::new();
        assert!(table.get(&Fingerprint::from_features(&[0.0])).is_none());
        assert!(table.is_empty());
    }
}
