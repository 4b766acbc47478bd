//! entorno: randomized small-world graph index for approximate k-NN search.
//!
//! A single-layer navigable small world graph (the flat ancestor of HNSW)
//! over **arbitrary similarity spaces**: payloads are opaque to the index and
//! distances come from a user-supplied [`Space`] oracle that need not be
//! metric (no symmetry or triangle inequality assumed).
//!
//! The index is built by inserting objects one at a time. Each insertion runs
//! a best-first greedy search over the partially built graph to find the new
//! node's nearest neighbors, links to them bidirectionally, and only then
//! publishes the node. Construction is multi-writer: the graph-level lock
//! covers O(1) publication, and every node guards its own neighbor list.
//!
//! # Quick Start
//!
//! ```
//! use entorno::{AbsoluteDifference, SwgIndex, SwgParams};
//!
//! # fn main() -> Result<(), entorno::IndexError> {
//! let params = SwgParams {
//!     nn: 3,
//!     index_threads: 1,
//!     seed: Some(7),
//!     ..SwgParams::default()
//! };
//!
//! let data: Vec<i64> = (0..10).map(|i| i * 10).collect();
//! let index = SwgIndex::build(AbsoluteDifference, data, &params)?;
//!
//! let hits = index.search(&34, 1)?;
//! assert_eq!(*hits[0].1.payload(), 30);
//! # Ok(())
//! # }
//! ```
//!
//! # What This Index Is (and Isn't)
//!
//! | Situation | Fit |
//! |-----------|-----|
//! | Non-metric or exotic distance functions | **Yes**, only a [`Space`] is needed |
//! | Concurrent index construction | **Yes**, per-node locking with lock-free reads of publication state |
//! | Deletions, persistence, range search | No, out of scope |
//! | Hard recall guarantees | No, the method is heuristic; tune `nn` and attempts |
//!
//! # References
//!
//! - Malkov, Ponomarenko, Logvinov, Krylov (2014). "Approximate nearest
//!   neighbor algorithm based on navigable small world graphs." Information
//!   Systems 45.
//! - Malkov & Yashunin (2018). "Efficient and robust approximate nearest
//!   neighbor search using Hierarchical Navigable Small World graphs", the
//!   hierarchical successor of this method.

pub mod collector;
pub mod distance;
pub mod error;
pub mod progress;
pub mod space;
pub mod swg;

pub use collector::{KnnCollector, TopK};
pub use error::{IndexError, Result};
pub use progress::{CountingProgress, Progress};
pub use space::{AbsoluteDifference, Cosine, Euclidean, Space};
pub use swg::{NodeRef, SwgIndex, SwgNode, SwgParams, SwgStats};
