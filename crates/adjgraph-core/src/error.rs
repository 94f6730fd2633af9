//! Error types for graph and heap operations.
//!
//! Every precondition violation is reported as an `Err` at the call site.
//! "No path" and negative-cycle outcomes are *not* errors; they are modelled
//! by the result types in [`crate::model`].

use crate::model::VertexId;

/// Errors raised by [`crate::heap::IndexedMinHeap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HeapError {
    /// A key that is already queued was pushed again.
    #[error("key is already present in the heap")]
    DuplicateKey,

    /// The key is not queued.
    #[error("key is not present in the heap")]
    KeyNotFound,

    /// `pop` or `peek` on an empty heap.
    #[error("heap is empty")]
    Empty,
}

/// Errors raised by graph construction, mutation and algorithms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The referenced vertex is not part of the graph.
    #[error("vertex {0} does not exist")]
    VertexNotFound(VertexId),

    /// `add_vertex` was called with an id that is already present.
    #[error("vertex {0} already exists")]
    DuplicateVertex(VertexId),

    /// `remove_edge` found no connection `from -> to`.
    #[error("edge {from} -> {to} does not exist")]
    EdgeNotFound { from: VertexId, to: VertexId },

    /// A pre-built vertex map contains a connection to an unknown vertex.
    #[error("connection {from} -> {to} points at a vertex that is not in the graph")]
    DanglingConnection { from: VertexId, to: VertexId },

    /// A pre-built undirected vertex map is missing the mirror of a connection.
    #[error("connection {from} -> {to} has no matching {to} -> {from}")]
    AsymmetricConnection { from: VertexId, to: VertexId },

    /// The operation has no implementation for this kind of graph.
    #[error("{operation} is not implemented for {kind} graphs")]
    Unsupported {
        operation: &'static str,
        kind: &'static str,
    },

    #[error(transparent)]
    Heap(#[from] HeapError),
}

/// Result alias used across the crate.
pub type Result<T, E = GraphError> = std::result::Result<T, E>;
