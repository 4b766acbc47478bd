//! Graph vertices.

use parking_lot::Mutex;
use smallvec::SmallVec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Slot value meaning "not yet published".
const UNPUBLISHED: usize = usize::MAX;

/// Shared handle to a graph vertex.
pub type NodeRef<P> = Arc<SwgNode<P>>;

/// Friend list storage. Inline capacity covers the default `nn` comfortably.
pub(crate) type FriendList<P> = SmallVec<[NodeRef<P>; 8]>;

/// One vertex of the small-world graph.
///
/// A node owns its payload and an unordered friend list guarded by a per-node
/// mutex. Its publication slot is written exactly once, under the node-set
/// lock, at the moment the node is appended to the graph; before that the
/// slot reads as `None`.
pub struct SwgNode<P> {
    payload: P,
    slot: AtomicUsize,
    friends: Mutex<FriendList<P>>,
}

impl<P> SwgNode<P> {
    /// Fresh unpublished node with no friends.
    pub fn new(payload: P) -> NodeRef<P> {
        Arc::new(Self {
            payload,
            slot: AtomicUsize::new(UNPUBLISHED),
            friends: Mutex::new(FriendList::new()),
        })
    }

    /// The payload this node was built from.
    #[inline]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Publication slot, or `None` while the node is unpublished.
    ///
    /// Lock-free: the slot is written once with `Release` under the node-set
    /// lock, so an `Acquire` load observes either the sentinel or the final
    /// value.
    #[inline]
    pub fn slot(&self) -> Option<usize> {
        match self.slot.load(Ordering::Acquire) {
            UNPUBLISHED => None,
            slot => Some(slot),
        }
    }

    pub(crate) fn assign_slot(&self, slot: usize) {
        debug_assert_ne!(slot, UNPUBLISHED);
        self.slot.store(slot, Ordering::Release);
    }

    /// Snapshot of the friend list, taken under the node's lock.
    pub fn friends(&self) -> Vec<NodeRef<P>> {
        self.friends.lock().to_vec()
    }

    /// Current friend count.
    pub fn degree(&self) -> usize {
        self.friends.lock().len()
    }

    /// Append a friend edge. No deduplication: parallel edges are allowed
    /// and harmless to the traversal.
    pub(crate) fn push_friend(&self, other: NodeRef<P>) {
        self.friends.lock().push(other);
    }

    /// Drop all friends. Only valid before the node's first publication.
    pub(crate) fn clear_friends(&self) {
        self.friends.lock().clear();
    }
}

impl<P: std::fmt::Debug> std::fmt::Debug for SwgNode<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwgNode")
            .field("payload", &self.payload)
            .field("slot", &self.slot())
            .field("degree", &self.degree())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_node_is_unpublished_and_friendless() {
        let node = SwgNode::new(7_i64);
        assert_eq!(node.slot(), None);
        assert_eq!(node.degree(), 0);
        assert_eq!(*node.payload(), 7);
    }

    #[test]
    fn slot_reads_back_after_assignment() {
        let node = SwgNode::new(());
        node.assign_slot(3);
        assert_eq!(node.slot(), Some(3));
    }

    #[test]
    fn friends_snapshot_is_independent() {
        let a = SwgNode::new(1_i64);
        let b = SwgNode::new(2_i64);
        a.push_friend(b.clone());
        let snapshot = a.friends();
        a.push_friend(b);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(a.degree(), 2);
    }

    #[test]
    fn clear_friends_empties_the_list() {
        let a = SwgNode::new(1_i64);
        a.push_friend(SwgNode::new(2_i64));
        a.clear_friends();
        assert_eq!(a.degree(), 0);
    }
}
