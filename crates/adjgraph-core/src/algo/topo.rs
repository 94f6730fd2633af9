//! Topological ordering by reversed DFS post-order.
//!
//! The order is only meaningful on a DAG; cycles are not detected and simply
//! yield some order of the vertices.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, instrument};

use crate::error::Result;
use crate::graph::{Graph, out_connections, require_vertex};
use crate::model::VertexId;

/// Topological operations shared by every [`Graph`].
pub trait TopologicalSort: Graph {
    /// Topological order of the whole graph (explicit stack).
    fn topological_order(&self) -> Vec<VertexId> {
        let mut visited = HashSet::new();
        let mut post = Vec::with_capacity(self.vertex_count());
        for &root in self.vertices().keys() {
            if !visited.contains(&root) {
                postorder(self, root, &mut visited, &mut post);
            }
        }
        post.reverse();
        post
    }

    /// Topological order of everything reachable from `start`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GraphError::VertexNotFound`] if `start` is absent.
    fn topological_order_from(&self, start: VertexId) -> Result<Vec<VertexId>> {
        require_vertex(self, start)?;
        let mut post = Vec::new();
        postorder(self, start, &mut HashSet::new(), &mut post);
        post.reverse();
        Ok(post)
    }

    /// Recursive form of [`Self::topological_order`]; same output.
    fn topological_order_recursive(&self) -> Vec<VertexId> {
        let mut visited = HashSet::new();
        let mut post = Vec::with_capacity(self.vertex_count());
        for &root in self.vertices().keys() {
            if !visited.contains(&root) {
                postorder_recursive(self, root, &mut visited, &mut post);
            }
        }
        post.reverse();
        post
    }

    /// # Errors
    ///
    /// Returns [`crate::GraphError::VertexNotFound`] if `start` is absent.
    fn topological_order_recursive_from(&self, start: VertexId) -> Result<Vec<VertexId>> {
        require_vertex(self, start)?;
        let mut post = Vec::new();
        postorder_recursive(self, start, &mut HashSet::new(), &mut post);
        post.reverse();
        Ok(post)
    }

    /// Topological order of the transpose, reversed.
    fn backwards_topological_order(&self) -> Vec<VertexId>
    where
        Self: Sized,
        Self::Data: Clone,
    {
        let mut order = self.transpose().topological_order();
        order.reverse();
        order
    }

    /// Vertices that can reach `start`, ordered so that every edge points
    /// towards `start`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GraphError::VertexNotFound`] if `start` is absent.
    fn backwards_topological_order_from(&self, start: VertexId) -> Result<Vec<VertexId>>
    where
        Self: Sized,
        Self::Data: Clone,
    {
        let mut order = self.transpose().topological_order_from(start)?;
        order.reverse();
        Ok(order)
    }

    /// Shortest distances from `source` on a DAG, relaxing each reachable
    /// vertex's out-edges once in topological order.
    ///
    /// Negative weights are fine. A cycle makes the result meaningless; it
    /// is not checked.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GraphError::VertexNotFound`] if `source` is absent.
    #[instrument(level = "debug", skip(self))]
    fn topological_order_single_source_shortest_path(
        &self,
        source: VertexId,
    ) -> Result<BTreeMap<VertexId, f64>> {
        let order = self.topological_order_from(source)?;
        let mut distance: HashMap<VertexId, f64> = HashMap::from([(source, 0.0)]);

        for u in order {
            let Some(&du) = distance.get(&u) else {
                continue;
            };
            for c in out_connections(self, u) {
                let candidate = du + c.weight;
                if distance.get(&c.to).is_none_or(|&known| candidate < known) {
                    distance.insert(c.to, candidate);
                }
            }
        }

        debug!(reached = distance.len(), "dag relaxation finished");
        Ok(distance.into_iter().collect())
    }
}

impl<G: Graph + ?Sized> TopologicalSort for G {}

fn postorder<G>(graph: &G, start: VertexId, visited: &mut HashSet<VertexId>, post: &mut Vec<VertexId>)
where
    G: Graph + ?Sized,
{
    visited.insert(start);
    let mut frames: Vec<(VertexId, usize)> = vec![(start, 0)];

    while let Some(frame) = frames.last_mut() {
        let v = frame.0;
        if let Some(c) = out_connections(graph, v).get(frame.1) {
            frame.1 += 1;
            if visited.insert(c.to) {
                frames.push((c.to, 0));
            }
        } else {
            frames.pop();
            post.push(v);
        }
    }
}

fn postorder_recursive<G>(
    graph: &G,
    v: VertexId,
    visited: &mut HashSet<VertexId>,
    post: &mut Vec<VertexId>,
) where
    G: Graph + ?Sized,
{
    visited.insert(v);
    for c in out_connections(graph, v) {
        if !visited.contains(&c.to) {
            postorder_recursive(graph, c.to, visited, post);
        }
    }
    post.push(v);
}
