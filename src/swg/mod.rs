//! Randomized small-world graph (SWG) index.
//!
//! The flat, pre-hierarchy ancestor of HNSW: a single-layer navigable
//! small-world graph built by incremental insertion. Each insert greedily
//! searches the partially built graph for the new node's `nn` nearest
//! neighbors and links to them bidirectionally; queries reuse the same
//! greedy walk from a handful of random entry points.
//!
//! # Quick Start
//!
//! ```
//! use entorno::{Euclidean, SwgIndex, SwgParams};
//!
//! # fn main() -> Result<(), entorno::IndexError> {
//! let data: Vec<Vec<f32>> = (0..100)
//!     .map(|i| vec![i as f32 * 0.1, (i as f32 * 0.1).sin()])
//!     .collect();
//!
//! let params = SwgParams {
//!     index_threads: 1,
//!     seed: Some(42),
//!     ..SwgParams::default()
//! };
//! let query = data[17].clone();
//! let index = SwgIndex::build(Euclidean, data, &params)?;
//!
//! let hits = index.search(&query, 5)?;
//! assert_eq!(hits[0].0, 0.0); // the point itself
//! # Ok(())
//! # }
//! ```
//!
//! # Properties
//!
//! | Aspect | Behavior |
//! |--------|----------|
//! | Space | Arbitrary [`Space`](crate::Space); non-metric allowed |
//! | Build | Incremental, multi-writer; per-node locks |
//! | Quality | Heuristic; recall depends on `nn` and attempt counts |
//! | Deletions / persistence / range search | Not supported |
//!
//! # Concurrency
//!
//! Construction is multi-writer: workers share the graph and insert
//! independently. A single graph-level mutex guards publication and random
//! entry selection (O(1) critical sections only); each node's friend list
//! has its own mutex. No lock is ever held across a distance computation.
//! A new node is linked to its neighborhood *before* it is published, so it
//! is reachable the moment other threads can see it.
//!
//! # References
//!
//! - Malkov, Ponomarenko, Logvinov, Krylov (2014). "Approximate nearest
//!   neighbor algorithm based on navigable small world graphs." Information
//!   Systems 45.
//! - Ponomarenko et al. (2011). "Approximate nearest neighbor search small
//!   world approach."

mod graph;
mod index;
mod node;
mod search;
mod visited;

pub use index::{SwgIndex, SwgStats};
pub use node::{NodeRef, SwgNode};

use serde::{Deserialize, Serialize};

use crate::error::{IndexError, Result};

/// Construction parameters for [`SwgIndex`].
///
/// Defaults match the method's classic tuning: `nn = 5`,
/// `init_index_attempts = 2`, `init_search_attempts = 10`, threads from the
/// host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwgParams {
    /// Out-degree target during insertion and result cardinality of internal
    /// traversals. Must be positive.
    pub nn: usize,
    /// Random restarts per insert. Must be positive.
    pub init_index_attempts: usize,
    /// Random restarts per query. Must be positive; reconfigurable after
    /// construction via [`SwgIndex::set_search_attempts`].
    pub init_search_attempts: usize,
    /// Builder parallelism. `0` means the host's available parallelism.
    pub index_threads: usize,
    /// Master RNG seed. `None` draws one from entropy; fixing it makes
    /// single-threaded builds and all queries reproducible.
    pub seed: Option<u64>,
}

impl Default for SwgParams {
    fn default() -> Self {
        Self {
            nn: 5,
            init_index_attempts: 2,
            init_search_attempts: 10,
            index_threads: 0,
            seed: None,
        }
    }
}

impl SwgParams {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.nn == 0 {
            return Err(IndexError::InvalidParameter("nn must be positive".into()));
        }
        if self.init_index_attempts == 0 {
            return Err(IndexError::InvalidParameter(
                "init_index_attempts must be positive".into(),
            ));
        }
        if self.init_search_attempts == 0 {
            return Err(IndexError::InvalidParameter(
                "init_search_attempts must be positive".into(),
            ));
        }
        Ok(())
    }

    pub(crate) fn effective_threads(&self) -> usize {
        if self.index_threads == 0 {
            std::thread::available_parallelism()
                .map(std::num::NonZeroUsize::get)
                .unwrap_or(1)
        } else {
            self.index_threads
        }
    }
}
