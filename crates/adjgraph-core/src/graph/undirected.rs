use std::collections::HashMap;

use tracing::trace;

use super::{
    Graph, VertexMap, insert_vertex, pop_connection, push_connection, validate_targets,
};
use crate::algo::traversal::Traversal;
use crate::error::{GraphError, Result};
use crate::model::{Components, Vertex, VertexId};

/// Undirected multigraph over caller-assigned vertex ids.
///
/// Every edge `{u, v}` is stored as the connection pair `u → v` / `v → u`.
/// Each mutator keeps that symmetry.
#[derive(Debug, Clone, PartialEq)]
pub struct UndirectedGraph<T = ()> {
    vertices: VertexMap<T>,
}

impl<T> Default for UndirectedGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> UndirectedGraph<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: VertexMap::new(),
        }
    }

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

    /// Adopt a pre-built, already symmetric vertex map.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DanglingConnection`] for a connection to an
    /// unknown vertex and [`GraphError::AsymmetricConnection`] when the
    /// weights of the `u → v` connections differ from those of the `v → u`
    /// connections as multisets (self-loop weights must come in pairs).
    pub fn from_vertices(vertices: VertexMap<T>) -> Result<Self> {
        validate_targets(&vertices)?;
        check_symmetry(&vertices)?;
        Ok(Self { vertices })
    }

    #[must_use]
    pub fn into_vertices(self) -> VertexMap<T> {
        self.vertices
    }

    /// Wrap a map whose connections were pushed in mirrored pairs.
    pub(crate) const fn from_mirrored(vertices: VertexMap<T>) -> Self {
        Self { vertices }
    }
}

impl<T> FromIterator<(VertexId, VertexId)> for UndirectedGraph<T> {
    fn from_iter<I: IntoIterator<Item = (VertexId, VertexId)>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}

fn check_symmetry<T>(vertices: &VertexMap<T>) -> Result<()> {
    let mut weights: HashMap<(VertexId, VertexId), Vec<u64>> = HashMap::new();
    for (&from, vertex) in vertices {
        for c in &vertex.connections {
            weights
                .entry((from, c.to))
                .or_default()
                .push(c.weight.to_bits());
        }
    }
    for list in weights.values_mut() {
        list.sort_unstable();
    }

    // Report in map order so the error names the first offending pair.
    for (&from, vertex) in vertices {
        for c in &vertex.connections {
            let forward = weights.get(&(from, c.to)).map_or(&[][..], Vec::as_slice);
            let balanced = if from == c.to {
                forward
                    .chunks(2)
                    .all(|pair| matches!(pair, [a, b] if a == b))
            } else {
                weights
                    .get(&(c.to, from))
                    .is_some_and(|back| back.as_slice() == forward)
            };
            if !balanced {
                return Err(GraphError::AsymmetricConnection { from, to: c.to });
            }
        }
    }
    Ok(())
}

impl<T> Graph for UndirectedGraph<T> {
    type Data = T;

    fn vertices(&self) -> &VertexMap<T> {
        &self.vertices
    }

    fn is_directed(&self) -> bool {
        false
    }

    fn insert_vertex(&mut self, id: VertexId, data: Option<T>) -> Result<()> {
        insert_vertex(&mut self.vertices, id, data)
    }

    fn add_weighted_edge(&mut self, from: VertexId, to: VertexId, weight: f64) {
        trace!(from, to, weight, "add edge");
        push_connection(&mut self.vertices, from, to, weight);
        push_connection(&mut self.vertices, to, from, weight);
    }

    fn remove_edge(&mut self, from: VertexId, to: VertexId) -> Result<()> {
        if !self.vertices.contains_key(&from) {
            return Err(GraphError::VertexNotFound(from));
        }
        if !self.vertices.contains_key(&to) {
            return Err(GraphError::VertexNotFound(to));
        }
        let Some(removed) = pop_connection(&mut self.vertices, from, to, None) else {
            return Err(GraphError::EdgeNotFound { from, to });
        };
        // The mirror with the same weight exists by the symmetry invariant.
        pop_connection(&mut self.vertices, to, from, Some(removed.weight));
        trace!(from, to, "remove edge");
        Ok(())
    }

    fn remove_vertex(&mut self, id: VertexId) -> Result<Vertex<T>> {
        let removed = self
            .vertices
            .remove(&id)
            .ok_or(GraphError::VertexNotFound(id))?;
        for c in &removed.connections {
            if let Some(neighbor) = self.vertices.get_mut(&c.to) {
                neighbor.connections.retain(|back| back.to != id);
            }
        }
        trace!(vertex = id, "remove vertex");
        Ok(removed)
    }

    fn edge_count(&self) -> usize {
        self.vertices.values().map(Vertex::degree).sum::<usize>() / 2
    }

    fn is_connected(&self) -> bool {
        let Some(&first) = self.vertices.keys().next() else {
            return true;
        };
        self.bfs_traversal_from(first)
            .is_ok_and(|reached| reached.len() == self.vertices.len())
    }

    fn is_tree(&self) -> bool {
        !self.vertices.is_empty()
            && self.edge_count() == self.vertices.len() - 1
            && self.is_connected()
    }

    fn is_eulerian(&self) -> bool {
        if self.vertices.values().any(|v| v.degree() % 2 != 0) {
            return false;
        }

        let components = self.scc_map();
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
        Ok(self.bridges_iterative())
    }

    fn strongly_connected_components(&self) -> Components {
        self.scc_map()
    }

    /// Reversing an undirected graph changes nothing; this is a deep copy.
    fn transpose(&self) -> Self
    where
        T: Clone,
    {
        self.clone()
    }
}
