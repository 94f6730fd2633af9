//! Algorithms over any [`crate::Graph`].
//!
//! Operations that make sense for both graph variants are extension traits
//! with blanket impls, so they come into scope with a single `use`.
//! Variant-specific algorithms (Tarjan SCC, bridges) are inherent methods on
//! the variant they apply to.

pub mod bridges;
pub mod metrics;
pub mod scc;
pub mod shortest_path;
pub mod topo;
pub mod traversal;

pub use metrics::Eccentricity;
pub use shortest_path::ShortestPaths;
pub use topo::TopologicalSort;
pub use traversal::Traversal;
