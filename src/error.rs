//! Error types for entorno.

use thiserror::Error;

/// Errors that can occur while building or searching a small-world graph index.
///
/// There are no retries and no partial-failure semantics: a build either
/// succeeds or the partially built index is discarded. The protocol variants
/// (`UnseededGraph`, `AlreadyPublished`, `UnassignedSlot`) indicate caller
/// bugs rather than recoverable conditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// The index contains no published nodes.
    #[error("index is empty")]
    EmptyIndex,

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// An insert ran against an empty graph. The first node must be published
    /// before any concurrent insertion starts.
    #[error("graph must be seeded with its first node before insertion")]
    UnseededGraph,

    /// A node was offered for publication twice.
    #[error("node is already published")]
    AlreadyPublished,

    /// A search visited a node without an assigned publication slot. The
    /// graph must be fully published before queries run.
    #[error("search reached a node without a publication slot")]
    UnassignedSlot,

    /// Range queries are not supported by this index.
    #[error("range search is not supported")]
    RangeSearchUnsupported,
}

/// Result type alias for entorno operations.
pub type Result<T> = std::result::Result<T, IndexError>;
