//! Vertex and edge traversals (BFS, iterative DFS, recursive DFS).
//!
//! # Ordering contract
//!
//! - Neighbours are explored in connection insertion order.
//! - A vertex is marked visited when it is *discovered* (enqueued, or its
//!   DFS frame is pushed), and vertex traversals report vertices in
//!   discovery order.
//! - Whole-graph forms restart from every still-unvisited vertex in
//!   ascending id order.
//!
//! # Edge traversal
//!
//! Edge traversals report every edge crossing as an [`EdgeCrossing`]:
//!
//! | walk | when `v → to` is examined |
//! |------|---------------------------|
//! | BFS  | emit `(v, to, fwd)`; if `to` was already seen also emit `(to, v, back)` |
//! | DFS  | emit `(v, to, fwd)`; descend if `to` is new; then emit `(to, v, back)` |
//!
//! The iterative DFS keeps one `(vertex, next connection)` frame per level,
//! so it reproduces the recursive output exactly while using heap memory
//! instead of call stack.

use std::collections::{HashSet, VecDeque};

use crate::error::Result;
use crate::graph::{Graph, out_connections, require_vertex};
use crate::model::{EdgeCrossing, VertexId};

/// Traversal operations shared by every [`Graph`].
pub trait Traversal: Graph {
    /// Breadth-first vertex order over the whole graph.
    fn bfs_traversal(&self) -> Vec<VertexId> {
        whole_graph(self, bfs_vertices)
    }

    /// Breadth-first vertex order of everything reachable from `start`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GraphError::VertexNotFound`] if `start` is absent.
    fn bfs_traversal_from(&self, start: VertexId) -> Result<Vec<VertexId>> {
        from_start(self, start, bfs_vertices)
    }

    /// Depth-first vertex order over the whole graph (explicit stack).
    fn dfs_traversal(&self) -> Vec<VertexId> {
        whole_graph(self, dfs_vertices)
    }

    /// Depth-first vertex order from `start` (explicit stack).
    ///
    /// # Errors
    ///
    /// Returns [`crate::GraphError::VertexNotFound`] if `start` is absent.
    fn dfs_traversal_from(&self, start: VertexId) -> Result<Vec<VertexId>> {
        from_start(self, start, dfs_vertices)
    }

    /// Recursive form of [`Traversal::dfs_traversal`]; same output.
    fn dfs_traversal_recursive(&self) -> Vec<VertexId> {
        whole_graph(self, dfs_vertices_recursive)
    }

    /// Recursive form of [`Traversal::dfs_traversal_from`]; same output.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GraphError::VertexNotFound`] if `start` is absent.
    fn dfs_traversal_recursive_from(&self, start: VertexId) -> Result<Vec<VertexId>> {
        from_start(self, start, dfs_vertices_recursive)
    }

    fn bfs_edge_traversal(&self) -> Vec<EdgeCrossing> {
        whole_graph(self, bfs_edges)
    }

    /// # Errors
    ///
    /// Returns [`crate::GraphError::VertexNotFound`] if `start` is absent.
    fn bfs_edge_traversal_from(&self, start: VertexId) -> Result<Vec<EdgeCrossing>> {
        from_start(self, start, bfs_edges)
    }

    fn dfs_edge_traversal(&self) -> Vec<EdgeCrossing> {
        whole_graph(self, dfs_edges)
    }

    /// # Errors
    ///
    /// Returns [`crate::GraphError::VertexNotFound`] if `start` is absent.
    fn dfs_edge_traversal_from(&self, start: VertexId) -> Result<Vec<EdgeCrossing>> {
        from_start(self, start, dfs_edges)
    }

    fn dfs_edge_traversal_recursive(&self) -> Vec<EdgeCrossing> {
        whole_graph(self, dfs_edges_recursive)
    }

    /// # Errors
    ///
    /// Returns [`crate::GraphError::VertexNotFound`] if `start` is absent.
    fn dfs_edge_traversal_recursive_from(&self, start: VertexId) -> Result<Vec<EdgeCrossing>> {
        from_start(self, start, dfs_edges_recursive)
    }
}

impl<G: Graph + ?Sized> Traversal for G {}

// ---------------------------------------------------------------------------
// Drivers
// ---------------------------------------------------------------------------

fn whole_graph<G, O, W>(graph: &G, walk: W) -> Vec<O>
where
    G: Graph + ?Sized,
    W: Fn(&G, VertexId, &mut HashSet<VertexId>, &mut Vec<O>),
{
    let mut visited: HashSet<VertexId> = HashSet::with_capacity(graph.vertex_count());
    let mut out = Vec::new();
    for &id in graph.vertices().keys() {
        if !visited.contains(&id) {
            walk(graph, id, &mut visited, &mut out);
        }
    }
    out
}

fn from_start<G, O, W>(graph: &G, start: VertexId, walk: W) -> Result<Vec<O>>
where
    G: Graph + ?Sized,
    W: Fn(&G, VertexId, &mut HashSet<VertexId>, &mut Vec<O>),
{
    require_vertex(graph, start)?;
    let mut visited: HashSet<VertexId> = HashSet::new();
    let mut out = Vec::new();
    walk(graph, start, &mut visited, &mut out);
    Ok(out)
}

// ---------------------------------------------------------------------------
// Vertex walks
// ---------------------------------------------------------------------------

fn bfs_vertices<G>(graph: &G, start: VertexId, visited: &mut HashSet<VertexId>, out: &mut Vec<VertexId>)
where
    G: Graph + ?Sized,
{
    let mut queue: VecDeque<VertexId> = VecDeque::from([start]);
    visited.insert(start);

    while let Some(v) = queue.pop_front() {
        out.push(v);
        for c in out_connections(graph, v) {
            if visited.insert(c.to) {
                queue.push_back(c.to);
            }
        }
    }
}

fn dfs_vertices<G>(graph: &G, start: VertexId, visited: &mut HashSet<VertexId>, out: &mut Vec<VertexId>)
where
    G: Graph + ?Sized,
{
    visited.insert(start);
    out.push(start);
    let mut frames: Vec<(VertexId, usize)> = vec![(start, 0)];

    while let Some(frame) = frames.last_mut() {
        let (v, next) = *frame;
        let Some(c) = out_connections(graph, v).get(next) else {
            frames.pop();
            continue;
        };
        frame.1 += 1;

        if visited.insert(c.to) {
            out.push(c.to);
            frames.push((c.to, 0));
        }
    }
}

fn dfs_vertices_recursive<G>(
    graph: &G,
    v: VertexId,
    visited: &mut HashSet<VertexId>,
    out: &mut Vec<VertexId>,
) where
    G: Graph + ?Sized,
{
    visited.insert(v);
    out.push(v);
    for c in out_connections(graph, v) {
        if !visited.contains(&c.to) {
            dfs_vertices_recursive(graph, c.to, visited, out);
        }
    }
}

// ---------------------------------------------------------------------------
// Edge walks
// ---------------------------------------------------------------------------

fn bfs_edges<G>(graph: &G, start: VertexId, visited: &mut HashSet<VertexId>, out: &mut Vec<EdgeCrossing>)
where
    G: Graph + ?Sized,
{
    let mut queue: VecDeque<VertexId> = VecDeque::from([start]);
    visited.insert(start);

    while let Some(v) = queue.pop_front() {
        for c in out_connections(graph, v) {
            out.push(EdgeCrossing::forward(v, c.to));
            if visited.insert(c.to) {
                queue.push_back(c.to);
            } else {
                out.push(EdgeCrossing::backward(c.to, v));
            }
        }
    }
}

fn dfs_edges<G>(graph: &G, start: VertexId, visited: &mut HashSet<VertexId>, out: &mut Vec<EdgeCrossing>)
where
    G: Graph + ?Sized,
{
    visited.insert(start);
    let mut frames: Vec<(VertexId, usize)> = vec![(start, 0)];

    while let Some(frame) = frames.last_mut() {
        let (v, next) = *frame;
        let Some(c) = out_connections(graph, v).get(next) else {
            frames.pop();
            // Returning from `v` crosses back over the edge that discovered it.
            if let Some(&(parent, _)) = frames.last() {
                out.push(EdgeCrossing::backward(v, parent));
            }
            continue;
        };
        frame.1 += 1;

        out.push(EdgeCrossing::forward(v, c.to));
        if visited.insert(c.to) {
            frames.push((c.to, 0));
        } else {
            out.push(EdgeCrossing::backward(c.to, v));
        }
    }
}

fn dfs_edges_recursive<G>(
    graph: &G,
    v: VertexId,
    visited: &mut HashSet<VertexId>,
    out: &mut Vec<EdgeCrossing>,
) where
    G: Graph + ?Sized,
{
    visited.insert(v);
    for c in out_connections(graph, v) {
        out.push(EdgeCrossing::forward(v, c.to));
        if !visited.contains(&c.to) {
            dfs_edges_recursive(graph, c.to, visited, out);
        }
        out.push(EdgeCrossing::backward(c.to, v));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphError;
    use crate::graph::{DirectedGraph, UndirectedGraph};

    fn crossings(raw: &[(VertexId, VertexId, bool)]) -> Vec<EdgeCrossing> {
        raw.iter().copied().map(EdgeCrossing::from).collect()
    }

    /// 13-node complete binary tree: `i → 2i+1`, `i → 2i+2`.
    fn binary_tree() -> DirectedGraph {
        DirectedGraph::from_edges((0..6).flat_map(|i| [(i, 2 * i + 1), (i, 2 * i + 2)]))
    }

    #[test]
    fn bfs_visits_binary_tree_level_by_level() {
        let graph = binary_tree();
        assert_eq!(
            graph.bfs_traversal_from(0).expect("0 exists"),
            (0..=12).collect::<Vec<_>>()
        );
    }

    #[test]
    fn dfs_visits_binary_tree_preorder() {
        let graph = binary_tree();
        let expected = vec![0, 1, 3, 7, 8, 4, 9, 10, 2, 5, 11, 12, 6];
        assert_eq!(graph.dfs_traversal_from(0).expect("0 exists"), expected);
        assert_eq!(graph.dfs_traversal_recursive_from(0).expect("0 exists"), expected);
    }

    #[test]
    fn whole_graph_restarts_in_id_order() {
        let graph: DirectedGraph = DirectedGraph::from_edges([(5, 1), (3, 4), (1, 2)]);

        assert_eq!(graph.bfs_traversal(), vec![1, 2, 3, 4, 5]);
        assert_eq!(graph.dfs_traversal(), vec![1, 2, 3, 4, 5]);

        let reversed: DirectedGraph = DirectedGraph::from_edges([(1, 5), (5, 3)]);
        assert_eq!(reversed.dfs_traversal(), vec![1, 5, 3]);
    }

    #[test]
    fn bfs_marks_on_discovery() {
        // 1 → 2, 1 → 3, 2 → 3: vertex 3 is discovered from 1 and must not
        // be queued a second time from 2.
        let graph: DirectedGraph = DirectedGraph::from_edges([(1, 2), (1, 3), (2, 3), (3, 4)]);
        assert_eq!(graph.bfs_traversal_from(1).expect("exists"), vec![1, 2, 3, 4]);
    }

    #[test]
    fn traversal_from_missing_vertex_fails() {
        let graph: DirectedGraph = DirectedGraph::from_edges([(1, 2)]);
        assert_eq!(graph.bfs_traversal_from(7), Err(GraphError::VertexNotFound(7)));
        assert_eq!(graph.dfs_edge_traversal_from(7), Err(GraphError::VertexNotFound(7)));
    }

    #[test]
    fn dfs_edge_traversal_on_triangle() {
        let graph: DirectedGraph = DirectedGraph::from_edges([(1, 2), (2, 3), (3, 1), (1, 3)]);

        let expected = crossings(&[
            (1, 2, true),
            (2, 3, true),
            (3, 1, true),
            (1, 3, false),
            (3, 2, false),
            (2, 1, false),
            (1, 3, true),
            (3, 1, false),
        ]);

        assert_eq!(graph.dfs_edge_traversal_from(1).expect("exists"), expected);
        assert_eq!(graph.dfs_edge_traversal_recursive_from(1).expect("exists"), expected);
    }

    #[test]
    fn bfs_edge_traversal_bounces_off_known_vertices() {
        let graph: UndirectedGraph = UndirectedGraph::from_edges([(1, 2), (1, 3), (2, 3)]);

        let expected = crossings(&[
            (1, 2, true),
            (1, 3, true),
            (2, 1, true),
            (1, 2, false),
            (2, 3, true),
            (3, 2, false),
            (3, 1, true),
            (1, 3, false),
            (3, 2, true),
            (2, 3, false),
        ]);

        assert_eq!(graph.bfs_edge_traversal_from(1).expect("exists"), expected);
    }

    #[test]
    fn undirected_dfs_edges_walk_back_over_tree_edges() {
        let graph: UndirectedGraph = UndirectedGraph::from_edges([(1, 2)]);

        let expected = crossings(&[
            (1, 2, true),
            (2, 1, true),
            (1, 2, false),
            (2, 1, false),
        ]);
        assert_eq!(graph.dfs_edge_traversal(), expected);
        assert_eq!(graph.dfs_edge_traversal_recursive(), expected);
    }

    #[test]
    fn deep_path_does_not_overflow_iterative_dfs() {
        let n = 50_000;
        let graph: DirectedGraph = DirectedGraph::from_edges((0..n - 1).map(|i| (i, i + 1)));

        let order = graph.dfs_traversal_from(0).expect("exists");
        assert_eq!(order.len(), usize::try_from(n).expect("positive"));
        assert_eq!(order.last(), Some(&(n - 1)));

        let edges = graph.dfs_edge_traversal_from(0).expect("exists");
        assert_eq!(edges.len(), 2 * (order.len() - 1));
    }
}
