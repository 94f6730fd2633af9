#![forbid(unsafe_code)]
//! adjgraph-core library.
//!
//! Directed and undirected adjacency-list graphs over integer vertex ids,
//! with traversal, shortest paths, strongly connected components, bridges,
//! topological ordering and an indexed min-heap.
//!
//! ```
//! use adjgraph_core::prelude::*;
//!
//! let graph: DirectedGraph = DirectedGraph::from_edges([(1, 2), (2, 3), (1, 3)]);
//! assert_eq!(graph.shortest_path(1, 3)?, Some(vec![1, 3]));
//! assert_eq!(graph.topological_order(), vec![1, 2, 3]);
//! # Ok::<(), adjgraph_core::GraphError>(())
//! ```
//!
//! # Conventions
//!
//! - **Errors**: Fallible operations return [`Result`] with a [`GraphError`].
//!   "No path" is `Ok(None)`, not an error.
//! - **Logging**: Use `tracing` macros (`debug!` for algorithm summaries,
//!   `trace!` for mutations).
//! - **Ordering**: Vertices iterate in ascending id order; connections in
//!   insertion order. Every algorithm is deterministic.

pub mod algo;
pub mod error;
pub mod graph;
pub mod heap;
pub mod model;

mod hash;

pub use error::{GraphError, HeapError, Result};
pub use graph::{DirectedGraph, Graph, UndirectedGraph, VertexMap};
pub use heap::IndexedMinHeap;
pub use model::{
    BellmanFordRoute, Components, Connection, DEFAULT_WEIGHT, Distance, EdgeCrossing, Vertex,
    VertexId, WeightedPath,
};

/// Everything needed to build graphs and call algorithms on them.
pub mod prelude {
    pub use crate::algo::{Eccentricity, ShortestPaths, TopologicalSort, Traversal};
    pub use crate::error::{GraphError, Result};
    pub use crate::graph::{DirectedGraph, Graph, UndirectedGraph};
    pub use crate::model::{
        BellmanFordRoute, Components, Distance, EdgeCrossing, VertexId, WeightedPath,
    };
}
