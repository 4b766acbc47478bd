//! Query result collectors.
//!
//! The traversal reports every candidate it accepts into its internal result
//! heap; a collector decides what to keep. This decouples the index's
//! traversal width (`nn`) from the caller's requested `k`.

use std::collections::BinaryHeap;

/// Sink for k-NN query results.
///
/// `report` may be called with the same payload zero or more times during a
/// query; collectors maintain their own result set and must tolerate
/// duplicates. A collector is only ever driven from the single thread running
/// the query.
pub trait KnnCollector<P> {
    /// Offer one candidate at the given distance.
    fn report(&mut self, distance: f32, payload: &P);
}

#[derive(Debug, Clone)]
struct Hit<P> {
    distance: f32,
    seq: u64,
    payload: P,
}

impl<P> PartialEq for Hit<P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl<P> Eq for Hit<P> {}

impl<P> PartialOrd for Hit<P> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<P> Ord for Hit<P> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Distance ties evict the later report, keeping results stable.
        self.distance
            .total_cmp(&other.distance)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Keeps the `k` closest reported payloads.
///
/// Distance ties are broken in favor of the earlier report.
#[derive(Debug, Clone)]
pub struct TopK<P> {
    k: usize,
    seq: u64,
    heap: BinaryHeap<Hit<P>>,
}

impl<P: Clone> TopK<P> {
    /// Collector retaining the `k` smallest distances.
    #[must_use]
    pub fn new(k: usize) -> Self {
        Self {
            k,
            seq: 0,
            heap: BinaryHeap::with_capacity(k + 1),
        }
    }

    /// Number of results currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether nothing has been retained yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Results sorted by ascending distance.
    #[must_use]
    pub fn into_sorted_vec(self) -> Vec<(f32, P)> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|hit| (hit.distance, hit.payload))
            .collect()
    }
}

impl<P: Clone> KnnCollector<P> for TopK<P> {
    fn report(&mut self, distance: f32, payload: &P) {
        if self.k == 0 {
            return;
        }
        let accept = self.heap.len() < self.k
            || self
                .heap
                .peek()
                .is_some_and(|worst| distance < worst.distance);
        if accept {
            self.heap.push(Hit {
                distance,
                seq: self.seq,
                payload: payload.clone(),
            });
            self.seq += 1;
            if self.heap.len() > self.k {
                self.heap.pop();
            }
        }
    }
}
