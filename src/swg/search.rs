//! Best-first greedy k-NN traversal.
//!
//! One scan serves both index construction and queries. Per random entry
//! point it runs the classic two-queue walk:
//!
//! - `frontier`: min-heap of candidates still to expand,
//! - `bound`: max-heap of the `k` smallest distances seen anywhere so far;
//!   its top is the pruning bound,
//! - `nearest`: max-heap of the best `k` candidates, the actual output.
//!
//! The walk stops at a local minimum: when even the closest unexpanded
//! candidate is farther than the current k-th best distance. `bound` and
//! `nearest` are distinct on purpose: the pruning bound tightens on *any*
//! close distance, including ones a later restart would merely rediscover,
//! independent of result membership.
//!
//! All restarts share one visited set and one result heap. Result ordering
//! is total: by distance, then by publication rank, so equal-distance
//! candidates resolve in insertion order.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rand::rngs::StdRng;

use crate::error::{IndexError, Result};
use crate::swg::graph::NodeSet;
use crate::swg::node::NodeRef;
use crate::swg::visited::VisitedSet;

/// A node paired with its distance to the query, ordered by distance
/// (`f32::total_cmp`, so NaN cannot poison the heaps) and then by
/// publication rank, so equal distances resolve in insertion order.
/// Natural order is max-heap; wrap in [`Reverse`] for the frontier.
///
/// The rank is captured once, at evaluation time: a node published mid-scan
/// keeps the rank it was seen with, so heap ordering stays consistent.
/// Unpublished nodes rank last and lose every tie.
pub(crate) struct Scored<P> {
    pub distance: f32,
    rank: usize,
    pub node: NodeRef<P>,
}

impl<P> Scored<P> {
    pub(crate) fn new(distance: f32, node: NodeRef<P>) -> Self {
        let rank = node.slot().unwrap_or(usize::MAX);
        Self {
            distance,
            rank,
            node,
        }
    }
}

impl<P> PartialEq for Scored<P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<P> Eq for Scored<P> {}

impl<P> PartialOrd for Scored<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P> Ord for Scored<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.rank.cmp(&other.rank))
    }
}

/// Bare distance with total ordering, for the pruning-bound heap.
#[derive(PartialEq)]
struct TotalDist(f32);

impl Eq for TotalDist {}

impl PartialOrd for TotalDist {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TotalDist {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Extends `nearest` with up to `k` closest nodes reachable from `attempts`
/// random entry points, invoking `witness` for every candidate accepted into
/// the result heap.
///
/// `dist` maps a payload to its distance from the query object; it runs with
/// no locks held. Neighbor lists are snapshotted under the owning node's
/// lock before any distance work.
pub(crate) fn neighborhood_scan<P, D, W>(
    nodes: &NodeSet<P>,
    mut dist: D,
    k: usize,
    attempts: usize,
    visited: &mut VisitedSet,
    rng: &mut StdRng,
    nearest: &mut BinaryHeap<Scored<P>>,
    mut witness: W,
) -> Result<()>
where
    D: FnMut(&P) -> f32,
    W: FnMut(f32, &NodeRef<P>),
{
    for _ in 0..attempts {
        let Some(entry) = nodes.random_entry(rng) else {
            return Err(IndexError::EmptyIndex);
        };

        let mut frontier: BinaryHeap<Reverse<Scored<P>>> = BinaryHeap::new();
        let mut bound: BinaryHeap<TotalDist> = BinaryHeap::with_capacity(k + 1);

        let d = dist(entry.payload());
        visited.first_visit(&entry)?;
        bound.push(TotalDist(d));
        offer(nearest, k, d, &entry, &mut witness);
        frontier.push(Reverse(Scored::new(d, entry)));

        while let Some(Reverse(head)) = frontier.pop() {
            // Local minimum: nothing left on the frontier can beat the
            // current k-th best distance.
            if bound
                .peek()
                .is_some_and(|TotalDist(b)| head.distance > *b)
            {
                break;
            }

            let friends = head.node.friends();

            for peer in friends {
                if !visited.first_visit(&peer)? {
                    continue;
                }
                let d = dist(peer.payload());
                bound.push(TotalDist(d));
                if bound.len() > k {
                    bound.pop();
                }
                offer(nearest, k, d, &peer, &mut witness);
                frontier.push(Reverse(Scored::new(d, peer)));
            }
        }
    }
    Ok(())
}

/// Admits `node` into the capped result heap if it improves the current k,
/// reporting the acceptance to `witness`. Comparison uses the full
/// (distance, rank) key, so an equal-distance candidate published earlier
/// displaces a later one.
fn offer<P, W>(
    nearest: &mut BinaryHeap<Scored<P>>,
    k: usize,
    distance: f32,
    node: &NodeRef<P>,
    witness: &mut W,
) where
    W: FnMut(f32, &NodeRef<P>),
{
    let candidate = Scored::new(distance, node.clone());
    let accept = nearest.len() < k || nearest.peek().is_some_and(|worst| candidate < *worst);
    if accept {
        nearest.push(candidate);
        witness(distance, node);
        if nearest.len() > k {
            nearest.pop();
        }
    }
}
