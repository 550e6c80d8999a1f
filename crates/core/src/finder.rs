use std::hash::{Hash, Hasher};

use crate::types::{RecordID, ServiceAddr};

/// Deterministic placement function: given a key and the full node list,
/// return every node in the order it should be tried.
///
/// Implementations must be pure (same inputs, same output) and must not
/// drop nodes from the list themselves — truncation by freshness or by
/// `MinRedundancy` is the caller's job (see [`crate::Router::nodes_find`]
/// and [`crate::Frontend::get`]).
pub trait NodesFinder {
    fn find(&self, key: RecordID, nodes: &[ServiceAddr]) -> Vec<ServiceAddr>;
}

/// Rendezvous (Highest Random Weight) hashing over the configured roster.
///
/// Every node is scored with a keyed hash of `(key, node)`; the returned
/// order is by descending score, addr as tiebreak. Adding or removing one
/// node only reshuffles the ordering for keys that hashed near it, which
/// keeps placement stable as the roster drifts.
///
/// # Test
///
/// ```
/// use quorumkv_core::{RecordID, RendezvousFinder, NodesFinder};
///
/// let nodes: Vec<_> = ["127.0.0.1:1", "127.0.0.1:2", "127.0.0.1:3"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
///
/// let finder = RendezvousFinder::default();
/// let a = finder.find(RecordID(7), &nodes);
/// let b = finder.find(RecordID(7), &nodes);
/// assert_eq!(a, b);
/// assert_eq!(a.len(), nodes.len());
///
/// // reordering the input doesn't change the output ordering
/// let reordered = vec![nodes[2], nodes[0], nodes[1]];
/// let c = finder.find(RecordID(7), &reordered);
/// assert_eq!(a, c);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct RendezvousFinder;

impl RendezvousFinder {
    fn score(key: RecordID, node: &ServiceAddr) -> u64 {
        let mut hasher = ahash::AHasher::default();
        key.0.hash(&mut hasher);
        node.hash(&mut hasher);
        hasher.finish()
    }
}

impl NodesFinder for RendezvousFinder {
    fn find(&self, key: RecordID, nodes: &[ServiceAddr]) -> Vec<ServiceAddr> {
        let mut scored: Vec<(u64, ServiceAddr)> = nodes
            .iter()
            .map(|&addr| (Self::score(key, &addr), addr))
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.to_string().cmp(&b.1.to_string())));
        scored.into_iter().map(|(_, addr)| addr).collect()
    }
}
