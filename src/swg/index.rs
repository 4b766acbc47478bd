//! The small-world graph index: construction and queries.

use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::collector::KnnCollector;
use crate::error::{IndexError, Result};
use crate::progress::Progress;
use crate::space::Space;
use crate::swg::graph::NodeSet;
use crate::swg::node::{NodeRef, SwgNode};
use crate::swg::search::{neighborhood_scan, Scored};
use crate::swg::visited::VisitedSet;
use crate::swg::SwgParams;

/// Seed mixing constants. Each RNG consumer gets a decorrelated stream
/// derived from the one master seed.
const WORKER_SEED_MIX: u64 = 0x9e37_79b9_7f4a_7c15;
const INSERT_SEED_MIX: u64 = 0xd1b5_4a32_d192_ed03;
const QUERY_SEED_MIX: u64 = 0x2545_f491_4f6c_dd1d;

fn worker_seed(master: u64, worker: usize) -> u64 {
    master ^ (worker as u64 + 1).wrapping_mul(WORKER_SEED_MIX)
}

/// Randomized small-world graph index over payloads of type `P`.
///
/// Built incrementally: every inserted node is linked bidirectionally to the
/// `nn` nearest nodes a greedy walk over the partial graph can find, then
/// published. Queries run the same walk from `init_search_attempts` random
/// entry points. The result is approximate; recall rises with `nn` and the
/// attempt counts.
#[derive(Debug)]
pub struct SwgIndex<P, S> {
    space: S,
    nodes: NodeSet<P>,
    nn: usize,
    init_index_attempts: usize,
    search_attempts: AtomicUsize,
    seed: u64,
    insert_rng: Mutex<StdRng>,
}

impl<P, S: Space<P>> SwgIndex<P, S> {
    /// Builds an index over `data`.
    ///
    /// `data[0]` seeds the graph; the rest is inserted with
    /// `params.index_threads` workers. Empty `data` yields an empty index on
    /// which every query fails with [`IndexError::EmptyIndex`].
    ///
    /// # Errors
    /// [`IndexError::InvalidParameter`] when `params` fail validation.
    pub fn build(space: S, data: Vec<P>, params: &SwgParams) -> Result<Self>
    where
        P: Send + Sync,
        S: Sync,
    {
        Self::build_with_progress(space, data, params, None)
    }

    /// [`build`](Self::build) with an optional progress observer.
    ///
    /// The observer's `advance` is called once per published node, serialized
    /// behind a mutex shared by all indexing workers.
    pub fn build_with_progress(
        space: S,
        data: Vec<P>,
        params: &SwgParams,
        progress: Option<&mut dyn Progress>,
    ) -> Result<Self>
    where
        P: Send + Sync,
        S: Sync,
    {
        params.validate()?;
        let seed = params.seed.unwrap_or_else(|| rand::rng().random());
        let threads = params.effective_threads();
        debug!(
            nn = params.nn,
            init_index_attempts = params.init_index_attempts,
            init_search_attempts = params.init_search_attempts,
            threads,
            "building small-world graph index"
        );

        let index = Self {
            space,
            nodes: NodeSet::new(),
            nn: params.nn,
            init_index_attempts: params.init_index_attempts,
            search_attempts: AtomicUsize::new(params.init_search_attempts),
            seed,
            insert_rng: Mutex::new(StdRng::seed_from_u64(seed ^ INSERT_SEED_MIX)),
        };

        let nodes: Vec<NodeRef<P>> = data.into_iter().map(SwgNode::new).collect();
        if nodes.is_empty() {
            return Ok(index);
        }

        let progress = progress.map(Mutex::new);

        // The seed node must be published before any worker starts: inserts
        // into an empty graph are a protocol violation.
        index.nodes.publish(nodes[0].clone())?;
        if let Some(p) = &progress {
            p.lock().advance(1);
        }

        if threads <= 1 {
            let mut rng = StdRng::seed_from_u64(worker_seed(seed, 0));
            for node in &nodes[1..] {
                index.insert_with(node, &mut rng)?;
                if let Some(p) = &progress {
                    p.lock().advance(1);
                }
            }
        } else {
            let index_ref = &index;
            let nodes_ref = &nodes;
            let progress_ref = &progress;
            std::thread::scope(|scope| -> Result<()> {
                let workers: Vec<_> = (0..threads)
                    .map(|w| {
                        scope.spawn(move || -> Result<()> {
                            let mut rng = StdRng::seed_from_u64(worker_seed(seed, w));
                            for i in (1..nodes_ref.len()).filter(|i| i % threads == w) {
                                index_ref.insert_with(&nodes_ref[i], &mut rng)?;
                                if let Some(p) = progress_ref {
                                    p.lock().advance(1);
                                }
                            }
                            Ok(())
                        })
                    })
                    .collect();
                for worker in workers {
                    worker.join().expect("indexing worker panicked")?;
                }
                Ok(())
            })?;
            debug!(threads, "indexing workers finished");
        }

        Ok(index)
    }

    /// Inserts one payload into a built index.
    ///
    /// Safe to call from multiple threads at once. Queries racing an insert
    /// are not supported: they expect a fully published graph.
    ///
    /// # Errors
    /// [`IndexError::UnseededGraph`] when the index is empty: the seed-first
    /// protocol requires the graph to hold at least one published node.
    pub fn add(&self, payload: P) -> Result<NodeRef<P>> {
        let node = SwgNode::new(payload);
        // Draw a sub-seed rather than holding the RNG lock across the whole
        // insert and its distance computations.
        let sub_seed = self.insert_rng.lock().random::<u64>();
        let mut rng = StdRng::seed_from_u64(sub_seed);
        self.insert_with(&node, &mut rng)?;
        Ok(node)
    }

    /// Insertion protocol: scan, link, then publish.
    ///
    /// Linking precedes publication so that back-edges already exist when the
    /// node becomes discoverable through the graph list. While unpublished,
    /// the node is invisible to other threads and its own friend list is
    /// uncontended; only each peer's lock matters.
    fn insert_with(&self, node: &NodeRef<P>, rng: &mut StdRng) -> Result<()> {
        node.clear_friends();

        let published = self.nodes.len();
        if published == 0 {
            return Err(IndexError::UnseededGraph);
        }

        let mut visited = VisitedSet::for_indexing(published);
        let mut nearest: BinaryHeap<Scored<P>> = BinaryHeap::with_capacity(self.nn + 1);
        neighborhood_scan(
            &self.nodes,
            |p| self.space.distance(node.payload(), p),
            self.nn,
            self.init_index_attempts,
            &mut visited,
            rng,
            &mut nearest,
            |_, _| {},
        )?;

        for scored in nearest {
            scored.node.push_friend(node.clone());
            node.push_friend(scored.node);
        }

        self.nodes.publish(node.clone())?;
        Ok(())
    }

    /// k-NN query reporting into a caller-supplied collector.
    ///
    /// The traversal keeps its own `nn`-wide result set; every candidate it
    /// accepts is also offered to `collector`, which applies its own top-k
    /// policy (the caller's k may differ from `nn`).
    ///
    /// # Errors
    /// [`IndexError::EmptyIndex`] on an empty index;
    /// [`IndexError::UnassignedSlot`] if the graph was not fully published.
    pub fn knn_search_with<C>(&self, query: &P, collector: &mut C) -> Result<()>
    where
        C: KnnCollector<P> + ?Sized,
    {
        self.query_scan(query, |distance, node| {
            collector.report(distance, node.payload());
        })
    }

    /// k-NN query returning the `k` nearest nodes, closest first; equal
    /// distances are ordered by insertion.
    pub fn search(&self, query: &P, k: usize) -> Result<Vec<(f32, NodeRef<P>)>> {
        let mut kept: BinaryHeap<Scored<P>> = BinaryHeap::with_capacity(k + 1);
        self.query_scan(query, |distance, node| {
            if k == 0 {
                return;
            }
            let candidate = Scored::new(distance, node.clone());
            let accept = kept.len() < k || kept.peek().is_some_and(|worst| candidate < *worst);
            if accept {
                kept.push(candidate);
                if kept.len() > k {
                    kept.pop();
                }
            }
        })?;
        Ok(kept
            .into_sorted_vec()
            .into_iter()
            .map(|scored| (scored.distance, scored.node))
            .collect())
    }

    /// Range queries are not supported by this method.
    ///
    /// # Errors
    /// Always [`IndexError::RangeSearchUnsupported`].
    pub fn range_search(&self, _query: &P, _radius: f32) -> Result<Vec<(f32, NodeRef<P>)>> {
        Err(IndexError::RangeSearchUnsupported)
    }

    fn query_scan<W>(&self, query: &P, witness: W) -> Result<()>
    where
        W: FnMut(f32, &NodeRef<P>),
    {
        let published = self.nodes.len();
        if published == 0 {
            return Err(IndexError::EmptyIndex);
        }
        let attempts = self.search_attempts.load(Ordering::Relaxed);
        // Derived fresh per query from the master seed: identical queries on
        // an unchanged graph return identical results.
        let mut rng = StdRng::seed_from_u64(self.seed ^ QUERY_SEED_MIX);
        let mut visited = VisitedSet::for_search(published);
        let mut nearest: BinaryHeap<Scored<P>> = BinaryHeap::with_capacity(self.nn + 1);
        neighborhood_scan(
            &self.nodes,
            |p| self.space.distance(query, p),
            self.nn,
            attempts,
            &mut visited,
            &mut rng,
            &mut nearest,
            witness,
        )
    }

    /// Reconfigures the number of random restarts per query. The only
    /// query-time parameter; the latest setting governs subsequent queries.
    ///
    /// # Errors
    /// [`IndexError::InvalidParameter`] for zero.
    pub fn set_search_attempts(&self, attempts: usize) -> Result<()> {
        if attempts == 0 {
            return Err(IndexError::InvalidParameter(
                "init_search_attempts must be positive".into(),
            ));
        }
        self.search_attempts.store(attempts, Ordering::Relaxed);
        Ok(())
    }

    /// Current number of random restarts per query.
    pub fn search_attempts(&self) -> usize {
        self.search_attempts.load(Ordering::Relaxed)
    }

    /// Out-degree target this index was built with.
    pub fn nn(&self) -> usize {
        self.nn
    }

    /// Number of published nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the index holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The space this index measures distances with.
    pub fn space(&self) -> &S {
        &self.space
    }

    /// Snapshot of all published nodes in slot order.
    ///
    /// Diagnostic surface: lets callers check structural invariants (slot
    /// density, degrees, edge symmetry) without the index growing an
    /// inspection API per property. O(n) under the graph lock.
    pub fn snapshot(&self) -> Vec<NodeRef<P>> {
        self.nodes.snapshot()
    }

    /// Structural statistics, computed from a snapshot.
    pub fn stats(&self) -> SwgStats {
        let nodes = self.nodes.snapshot();
        let mut directed_edges = 0usize;
        let mut min_degree = usize::MAX;
        let mut max_degree = 0usize;
        for node in &nodes {
            let degree = node.degree();
            directed_edges += degree;
            min_degree = min_degree.min(degree);
            max_degree = max_degree.max(degree);
        }
        SwgStats {
            nodes: nodes.len(),
            edges: directed_edges / 2,
            min_degree: if nodes.is_empty() { 0 } else { min_degree },
            max_degree,
        }
    }
}

/// Structural statistics about a built index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwgStats {
    /// Published node count.
    pub nodes: usize,
    /// Undirected edge count (parallel edges included).
    pub edges: usize,
    /// Smallest friend-list length.
    pub min_degree: usize,
    /// Largest friend-list length.
    pub max_degree: usize,
}
