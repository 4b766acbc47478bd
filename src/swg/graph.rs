//! The published-node list.

use parking_lot::Mutex;
use rand::Rng;

use crate::error::{IndexError, Result};
use crate::swg::node::NodeRef;

/// Append-only list of published nodes plus the single graph-level lock.
///
/// The lock guards publication and random entry selection only; it is never
/// held across distance computation or traversal. Slots are dense: after `n`
/// publications they are exactly `0..n` in append order.
pub(crate) struct NodeSet<P> {
    nodes: Mutex<Vec<NodeRef<P>>>,
}

impl<P> NodeSet<P> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Mutex::new(Vec::new()),
        }
    }

    /// Publish a node: assign the next slot and append, atomically with
    /// respect to other publications and entry selection.
    ///
    /// Back-edges into `node` must already exist so it is reachable from its
    /// neighborhood the moment it becomes visible here.
    pub(crate) fn publish(&self, node: NodeRef<P>) -> Result<usize> {
        let mut nodes = self.nodes.lock();
        if node.slot().is_some() {
            return Err(IndexError::AlreadyPublished);
        }
        let slot = nodes.len();
        node.assign_slot(slot);
        nodes.push(node);
        Ok(slot)
    }

    /// Published-node count, a consistent snapshot under the lock.
    pub(crate) fn len(&self) -> usize {
        self.nodes.lock().len()
    }

    /// Uniformly random published node; `None` iff the graph is empty.
    pub(crate) fn random_entry<R: Rng>(&self, rng: &mut R) -> Option<NodeRef<P>> {
        let nodes = self.nodes.lock();
        if nodes.is_empty() {
            None
        } else {
            Some(nodes[rng.random_range(0..nodes.len())].clone())
        }
    }

    /// Clone of the node list, for diagnostics and invariant checks.
    ///
    /// O(n) under the graph lock; not for the hot path.
    pub(crate) fn snapshot(&self) -> Vec<NodeRef<P>> {
        self.nodes.lock().clone()
    }
}

impl<P: std::fmt::Debug> std::fmt::Debug for NodeSet<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeSet")
            .field("nodes", &self.nodes.lock())
            .finish()
    }
}
