use tracing::trace;

use super::{
    Graph, UndirectedGraph, VertexMap, in_degrees, insert_vertex, pop_connection, push_connection,
    validate_targets,
};
use crate::algo::traversal::Traversal;
use crate::error::{GraphError, Result};
use crate::model::{Components, Vertex, VertexId};

/// Directed multigraph over caller-assigned vertex ids.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectedGraph<T = ()> {
    vertices: VertexMap<T>,
}

impl<T> Default for DirectedGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DirectedGraph<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: VertexMap::new(),
        }
    }

    /// Build from `(from, to)` pairs, each with the default weight.
    #[must_use]
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (VertexId, VertexId)>,
    {
        let mut graph = Self::new();
        graph.add_edges(edges);
        graph
    }

    #[must_use]
    pub fn from_weighted_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (VertexId, VertexId, f64)>,
    {
        let mut graph = Self::new();
        graph.add_weighted_edges(edges);
        graph
    }

    /// Adopt a pre-built vertex map.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DanglingConnection`] if a connection targets a
    /// vertex that is not a key of `vertices`.
    pub fn from_vertices(vertices: VertexMap<T>) -> Result<Self> {
        validate_targets(&vertices)?;
        Ok(Self { vertices })
    }

    /// Consume the graph and return its vertex arena.
    #[must_use]
    pub fn into_vertices(self) -> VertexMap<T> {
        self.vertices
    }

    /// Same vertices and edges with every connection reversed; payloads are
    /// produced by `data`.
    ///
    /// Reversed connections are appended while scanning sources in id order,
    /// so each reversed adjacency list is ordered by original source id.
    pub(crate) fn reversed_with<U>(
        &self,
        mut data: impl FnMut(Option<&T>) -> Option<U>,
    ) -> DirectedGraph<U> {
        let mut vertices: VertexMap<U> = self
            .vertices
            .iter()
            .map(|(&id, v)| {
                (
                    id,
                    Vertex {
                        data: data(v.data.as_ref()),
                        connections: Vec::new(),
                    },
                )
            })
            .collect();

        for (&from, vertex) in &self.vertices {
            for c in &vertex.connections {
                push_connection(&mut vertices, c.to, from, c.weight);
            }
        }

        DirectedGraph { vertices }
    }

    /// Same vertices with every arc stored in both directions; payloads are
    /// produced by `data`.
    fn mirrored_with<U>(
        &self,
        mut data: impl FnMut(Option<&T>) -> Option<U>,
    ) -> UndirectedGraph<U> {
        let mut vertices: VertexMap<U> = self
            .vertices
            .iter()
            .map(|(&id, v)| {
                (
                    id,
                    Vertex {
                        data: data(v.data.as_ref()),
                        connections: Vec::new(),
                    },
                )
            })
            .collect();

        for (from, to, weight) in self.arcs() {
            push_connection(&mut vertices, from, to, weight);
            push_connection(&mut vertices, to, from, weight);
        }

        UndirectedGraph::from_mirrored(vertices)
    }

    /// The underlying undirected graph with payloads dropped.
    pub(crate) fn undirected_view(&self) -> UndirectedGraph<()> {
        self.mirrored_with(|_| None)
    }

    /// The underlying undirected graph: every arc becomes an undirected edge.
    #[must_use]
    pub fn to_undirected(&self) -> UndirectedGraph<T>
    where
        T: Clone,
    {
        self.mirrored_with(|data: Option<&T>| data.cloned())
    }
}

impl<T> FromIterator<(VertexId, VertexId)> for DirectedGraph<T> {
    fn from_iter<I: IntoIterator<Item = (VertexId, VertexId)>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}

impl<T> Graph for DirectedGraph<T> {
    type Data = T;

    fn vertices(&self) -> &VertexMap<T> {
        &self.vertices
    }

    fn is_directed(&self) -> bool {
        true
    }

    fn insert_vertex(&mut self, id: VertexId, data: Option<T>) -> Result<()> {
        insert_vertex(&mut self.vertices, id, data)
    }

    fn add_weighted_edge(&mut self, from: VertexId, to: VertexId, weight: f64) {
        trace!(from, to, weight, "add arc");
        push_connection(&mut self.vertices, from, to, weight);
    }

    fn remove_edge(&mut self, from: VertexId, to: VertexId) -> Result<()> {
        if !self.vertices.contains_key(&from) {
            return Err(GraphError::VertexNotFound(from));
        }
        if !self.vertices.contains_key(&to) {
            return Err(GraphError::VertexNotFound(to));
        }
        if pop_connection(&mut self.vertices, from, to, None).is_none() {
            return Err(GraphError::EdgeNotFound { from, to });
        }
        trace!(from, to, "remove arc");
        Ok(())
    }

    fn remove_vertex(&mut self, id: VertexId) -> Result<Vertex<T>> {
        let removed = self
            .vertices
            .remove(&id)
            .ok_or(GraphError::VertexNotFound(id))?;
        for vertex in self.vertices.values_mut() {
            vertex.connections.retain(|c| c.to != id);
        }
        trace!(vertex = id, "remove vertex");
        Ok(removed)
    }

    fn edge_count(&self) -> usize {
        self.vertices.values().map(Vertex::degree).sum()
    }

    /// Weak connectivity, checked with one BFS over the undirected view.
    fn is_connected(&self) -> bool {
        self.undirected_view().is_connected()
    }

    /// Arborescence check: one root with in-degree zero, `E == V - 1`, and
    /// every vertex reachable from the root.
    fn is_tree(&self) -> bool {
        if self.vertices.is_empty() || self.edge_count() != self.vertices.len() - 1 {
            return false;
        }

        let transposed = self.reversed_with::<()>(|_| None);
        let mut roots = transposed
            .vertices
            .iter()
            .filter(|(_, v)| v.connections.is_empty())
            .map(|(&id, _)| id);

        let (Some(root), None) = (roots.next(), roots.next()) else {
            return false;
        };

        self.bfs_traversal_from(root)
            .is_ok_and(|reached| reached.len() == self.vertices.len())
    }

    fn is_eulerian(&self) -> bool {
        if self.edge_count() == 0 {
            return true;
        }

        let incoming = in_degrees(&self.vertices);
        let balanced = self
            .vertices
            .iter()
            .all(|(id, v)| incoming.get(id).copied().unwrap_or(0) == v.degree());
        if !balanced {
            return false;
        }

        let components = self.tarjan_scc_map();
        let mut labels = self
            .vertices
            .iter()
            .filter(|(_, v)| v.degree() > 0)
            .filter_map(|(&id, _)| components.component_of(id));
        let Some(first) = labels.next() else {
            return true;
        };
        labels.all(|label| label == first)
    }

    fn bridges(&self) -> Result<Vec<(VertexId, VertexId)>> {
        Err(GraphError::Unsupported {
            operation: "bridges",
            kind: "directed",
        })
    }

    fn strongly_connected_components(&self) -> Components {
        self.tarjan_scc_map()
    }

    fn transpose(&self) -> Self
    where
        T: Clone,
    {
        self.reversed_with(|data| data.cloned())
    }
}
