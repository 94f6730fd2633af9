//! Graph storage and the direction-dependent contract.
//!
//! # Overview
//!
//! Both variants keep an arena of vertices keyed by caller-assigned id:
//!
//! ```text
//! BTreeMap<VertexId, Vertex<T>>
//!     └─ Vertex { data: Option<T>, connections: Vec<Connection { to, weight }> }
//! ```
//!
//! Iterating the map yields vertices in ascending id order; every
//! whole-graph algorithm restarts in that order, which makes all outputs
//! deterministic.
//!
//! ## Variants
//!
//! - [`DirectedGraph`]: a connection `u → v` is stored on `u` only.
//! - [`UndirectedGraph`]: an edge `{u, v}` is stored as `u → v` *and*
//!   `v → u`; a self-loop is stored twice on its vertex.
//!
//! Operations whose meaning depends on direction (edge insertion/removal,
//! connectivity, trees, SCC, bridges) are required methods of [`Graph`].
//! Everything else is a provided method here or lives in an extension trait
//! under [`crate::algo`].

mod directed;
mod undirected;

use std::collections::{BTreeMap, HashSet};

use tracing::trace;

use crate::error::{GraphError, Result};
use crate::model::{Components, Connection, DEFAULT_WEIGHT, Vertex, VertexId};

pub use directed::DirectedGraph;
pub use undirected::UndirectedGraph;

/// Vertex arena shared by both graph variants.
pub type VertexMap<T> = BTreeMap<VertexId, Vertex<T>>;

/// Common contract of [`DirectedGraph`] and [`UndirectedGraph`].
pub trait Graph {
    /// Per-vertex payload type.
    type Data;

    /// Read-only view of the vertex arena, in ascending id order.
    fn vertices(&self) -> &VertexMap<Self::Data>;

    /// `true` for [`DirectedGraph`].
    fn is_directed(&self) -> bool;

    /// Insert an isolated vertex, optionally carrying a payload.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateVertex`] if `id` is already present.
    fn insert_vertex(&mut self, id: VertexId, data: Option<Self::Data>) -> Result<()>;

    /// Add an edge `from → to` with `weight`, creating missing endpoints.
    ///
    /// Undirected graphs also store the mirror `to → from`.
    fn add_weighted_edge(&mut self, from: VertexId, to: VertexId, weight: f64);

    /// Remove one edge `from → to` (and its mirror for undirected graphs).
    ///
    /// When parallel edges exist only the first one in insertion order goes.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if either endpoint is missing and
    /// [`GraphError::EdgeNotFound`] if no such connection is stored.
    fn remove_edge(&mut self, from: VertexId, to: VertexId) -> Result<()>;

    /// Remove a vertex together with every connection that targets it.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if `id` is not present.
    fn remove_vertex(&mut self, id: VertexId) -> Result<Vertex<Self::Data>>;

    /// Number of edges. Undirected graphs count each stored pair once.
    fn edge_count(&self) -> usize;

    /// `true` if the graph is connected (weakly, for directed graphs).
    ///
    /// The empty graph is connected.
    fn is_connected(&self) -> bool;

    /// `true` if the graph is a tree (an arborescence for directed graphs).
    fn is_tree(&self) -> bool;

    /// `true` if the graph has an Euler circuit.
    fn is_eulerian(&self) -> bool;

    /// Bridges of the graph, in detection order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Unsupported`] for directed graphs.
    fn bridges(&self) -> Result<Vec<(VertexId, VertexId)>>;

    /// Strongly connected components (connected components when undirected).
    fn strongly_connected_components(&self) -> Components;

    /// A new graph with every edge reversed.
    fn transpose(&self) -> Self
    where
        Self: Sized,
        Self::Data: Clone;

    // -----------------------------------------------------------------------
    // Provided: elementary mutation
    // -----------------------------------------------------------------------

    /// Insert an isolated vertex without payload.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateVertex`] if `id` is already present.
    fn add_vertex(&mut self, id: VertexId) -> Result<()> {
        self.insert_vertex(id, None)
    }

    /// Insert an isolated vertex carrying `data`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateVertex`] if `id` is already present.
    fn add_vertex_with_data(&mut self, id: VertexId, data: Self::Data) -> Result<()> {
        self.insert_vertex(id, Some(data))
    }

    /// Add an edge with [`DEFAULT_WEIGHT`].
    fn add_edge(&mut self, from: VertexId, to: VertexId) {
        self.add_weighted_edge(from, to, DEFAULT_WEIGHT);
    }

    fn add_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (VertexId, VertexId)>,
    {
        for (from, to) in edges {
            self.add_edge(from, to);
        }
    }

    fn add_weighted_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (VertexId, VertexId, f64)>,
    {
        for (from, to, weight) in edges {
            self.add_weighted_edge(from, to, weight);
        }
    }

    /// Remove every listed edge, stopping at the first failure.
    ///
    /// Edges removed before the failing one stay removed.
    ///
    /// # Errors
    ///
    /// Propagates the first [`Graph::remove_edge`] error.
    fn remove_edges<I>(&mut self, edges: I) -> Result<()>
    where
        I: IntoIterator<Item = (VertexId, VertexId)>,
    {
        for (from, to) in edges {
            self.remove_edge(from, to)?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Provided: queries
    // -----------------------------------------------------------------------

    fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    fn is_empty(&self) -> bool {
        self.vertices().is_empty()
    }

    fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices().contains_key(&id)
    }

    /// Vertex ids in ascending order.
    fn vertex_ids(&self) -> Vec<VertexId> {
        self.vertices().keys().copied().collect()
    }

    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if `id` is not present.
    fn vertex(&self, id: VertexId) -> Result<&Vertex<Self::Data>> {
        self.vertices().get(&id).ok_or(GraphError::VertexNotFound(id))
    }

    /// Outgoing connections of `id` in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if `id` is not present.
    fn connections(&self, id: VertexId) -> Result<&[Connection]> {
        self.vertex(id).map(|v| v.connections.as_slice())
    }

    /// `true` if a connection `from → to` is stored. O(degree).
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if `from` is not present.
    fn vertices_connected(&self, from: VertexId, to: VertexId) -> Result<bool> {
        Ok(self.vertex(from)?.connects_to(to))
    }

    /// Alias of [`Graph::vertices_connected`].
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if `from` is not present.
    fn contains_edge(&self, from: VertexId, to: VertexId) -> Result<bool> {
        self.vertices_connected(from, to)
    }

    /// Every stored connection as `(from, to, weight)`, in id then insertion
    /// order. Undirected graphs yield both directions of each edge.
    fn arcs(&self) -> Vec<(VertexId, VertexId, f64)> {
        self.vertices()
            .iter()
            .flat_map(|(&from, v)| v.connections.iter().map(move |c| (from, c.to, c.weight)))
            .collect()
    }

    /// `true` if there are no self-loops and no parallel connections.
    fn is_simple(&self) -> bool {
        self.vertices().iter().all(|(&id, vertex)| {
            let mut seen: HashSet<VertexId> = HashSet::with_capacity(vertex.degree());
            vertex
                .connections
                .iter()
                .all(|c| c.to != id && seen.insert(c.to))
        })
    }

    /// BLAKE3 fingerprint of the graph structure (`"blake3:<hex>"`).
    ///
    /// Covers direction, vertex ids and every stored connection in order;
    /// payloads are not hashed.
    fn content_hash(&self) -> String {
        crate::hash::content_hash(self.is_directed(), self.vertices())
    }
}

// ---------------------------------------------------------------------------
// Shared helpers for the variants and the algorithms
// ---------------------------------------------------------------------------

/// Outgoing connections of `id`, or an empty slice for unknown ids.
///
/// Algorithms validate their start vertex up front and only follow stored
/// connections afterwards, so the fallback never triggers on a well-formed
/// graph.
pub(crate) fn out_connections<G>(graph: &G, id: VertexId) -> &[Connection]
where
    G: Graph + ?Sized,
{
    graph
        .vertices()
        .get(&id)
        .map_or(&[][..], |v| v.connections.as_slice())
}

/// Fail with [`GraphError::VertexNotFound`] unless `id` is present.
pub(crate) fn require_vertex<G>(graph: &G, id: VertexId) -> Result<()>
where
    G: Graph + ?Sized,
{
    if graph.contains_vertex(id) {
        Ok(())
    } else {
        Err(GraphError::VertexNotFound(id))
    }
}

pub(crate) fn insert_vertex<T>(
    vertices: &mut VertexMap<T>,
    id: VertexId,
    data: Option<T>,
) -> Result<()> {
    if vertices.contains_key(&id) {
        return Err(GraphError::DuplicateVertex(id));
    }
    trace!(vertex = id, "add vertex");
    vertices.insert(
        id,
        Vertex {
            data,
            connections: Vec::new(),
        },
    );
    Ok(())
}

/// Append `from → to`, creating either endpoint on demand.
pub(crate) fn push_connection<T>(
    vertices: &mut VertexMap<T>,
    from: VertexId,
    to: VertexId,
    weight: f64,
) {
    vertices.entry(to).or_default();
    vertices
        .entry(from)
        .or_default()
        .connections
        .push(Connection::new(to, weight));
}

/// Remove the first stored `from → to`, restricted to connections carrying
/// `weight` when one is given. Returns the removed connection.
pub(crate) fn pop_connection<T>(
    vertices: &mut VertexMap<T>,
    from: VertexId,
    to: VertexId,
    weight: Option<f64>,
) -> Option<Connection> {
    let vertex = vertices.get_mut(&from)?;
    let slot = vertex.connections.iter().position(|c| {
        c.to == to && weight.is_none_or(|w| w.to_bits() == c.weight.to_bits())
    })?;
    Some(vertex.connections.remove(slot))
}

/// Check that every connection targets a stored vertex.
pub(crate) fn validate_targets<T>(vertices: &VertexMap<T>) -> Result<()> {
    for (&from, vertex) in vertices {
        if let Some(c) = vertex.connections.iter().find(|c| !vertices.contains_key(&c.to)) {
            return Err(GraphError::DanglingConnection { from, to: c.to });
        }
    }
    Ok(())
}

/// In-degree of every vertex (zero entries included).
pub(crate) fn in_degrees<T>(vertices: &VertexMap<T>) -> BTreeMap<VertexId, usize> {
    let mut degrees: BTreeMap<VertexId, usize> = vertices.keys().map(|&id| (id, 0)).collect();
    for vertex in vertices.values() {
        for c in &vertex.connections {
            *degrees.entry(c.to).or_insert(0) += 1;
        }
    }
    degrees
}
