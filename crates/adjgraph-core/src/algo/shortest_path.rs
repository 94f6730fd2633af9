//! Single-source shortest paths.
//!
//! # Algorithms
//!
//! | operation | weights | method |
//! |-----------|---------|--------|
//! | [`ShortestPaths::shortest_path`] | ignored | BFS with predecessor map |
//! | [`ShortestPaths::dijkstra`] / [`ShortestPaths::dijkstra_to`] | non-negative | best-first search over an [`IndexedMinHeap`] |
//! | [`ShortestPaths::a_star`] | non-negative | Dijkstra with priority `g + h` |
//! | [`ShortestPaths::bellman_ford`] / [`ShortestPaths::bellman_ford_to`] | any | `|V| - 1` relaxation passes plus negative-cycle marking |
//!
//! # No-path outcomes
//!
//! An unreachable target is `Ok(None)`, never an error and never a magic
//! number. Vertices whose Bellman-Ford distance is unbounded below are
//! reported as [`Distance::NegativeInfinity`].
//!
//! # Limitations
//!
//! Dijkstra and A* assume non-negative weights and do not check them. A*
//! does not check that the heuristic is admissible; an overestimating
//! heuristic returns a valid but possibly longer path.

use std::collections::{BTreeMap, HashMap, VecDeque};

use tracing::{debug, instrument};

use crate::error::Result;
use crate::graph::{Graph, out_connections, require_vertex};
use crate::heap::IndexedMinHeap;
use crate::model::{BellmanFordRoute, Distance, VertexId, WeightedPath};

/// Shortest-path operations shared by every [`Graph`].
pub trait ShortestPaths: Graph {
    /// Fewest-edges path from `from` to `to`, endpoints included.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GraphError::VertexNotFound`] if either vertex is absent.
    fn shortest_path(&self, from: VertexId, to: VertexId) -> Result<Option<Vec<VertexId>>> {
        require_vertex(self, from)?;
        require_vertex(self, to)?;

        // `None` marks the root of the predecessor chain.
        let mut predecessor: HashMap<VertexId, Option<VertexId>> = HashMap::from([(from, None)]);
        let mut queue: VecDeque<VertexId> = VecDeque::from([from]);

        while let Some(v) = queue.pop_front() {
            if v == to {
                let mut path = vec![to];
                let mut cursor = to;
                while let Some(&Some(previous)) = predecessor.get(&cursor) {
                    path.push(previous);
                    cursor = previous;
                }
                path.reverse();
                return Ok(Some(path));
            }

            for c in out_connections(self, v) {
                if !predecessor.contains_key(&c.to) {
                    predecessor.insert(c.to, Some(v));
                    queue.push_back(c.to);
                }
            }
        }

        Ok(None)
    }

    /// `true` if `to` is reachable from `from`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GraphError::VertexNotFound`] if either vertex is absent.
    fn is_there_path(&self, from: VertexId, to: VertexId) -> Result<bool> {
        Ok(self.shortest_path(from, to)?.is_some())
    }

    /// Distances from `source` to every reachable vertex.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GraphError::VertexNotFound`] if `source` is absent.
    fn dijkstra(&self, source: VertexId) -> Result<BTreeMap<VertexId, f64>> {
        require_vertex(self, source)?;
        Ok(best_first(self, source, None, |_| 0.0)?.settled)
    }

    /// Cheapest path from `source` to `target`; stops once `target` is settled.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GraphError::VertexNotFound`] if either vertex is absent.
    fn dijkstra_to(&self, source: VertexId, target: VertexId) -> Result<Option<WeightedPath>> {
        require_vertex(self, source)?;
        require_vertex(self, target)?;
        Ok(best_first(self, source, Some(target), |_| 0.0)?.path_to(source, target))
    }

    /// A* search guided by `heuristic(vertex, target)`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GraphError::VertexNotFound`] if either vertex is absent.
    fn a_star<H>(
        &self,
        source: VertexId,
        target: VertexId,
        heuristic: H,
    ) -> Result<Option<WeightedPath>>
    where
        H: Fn(VertexId, VertexId) -> f64,
    {
        require_vertex(self, source)?;
        require_vertex(self, target)?;
        let search = best_first(self, source, Some(target), |v| heuristic(v, target))?;
        Ok(search.path_to(source, target))
    }

    /// Distances from `source` to every reachable vertex, tolerating negative
    /// weights.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GraphError::VertexNotFound`] if `source` is absent.
    fn bellman_ford(&self, source: VertexId) -> Result<BTreeMap<VertexId, Distance>> {
        require_vertex(self, source)?;
        let relaxed = relax_all(self, source);
        Ok(relaxed
            .distance
            .into_iter()
            .map(|(v, d)| (v, Distance::from_estimate(d)))
            .collect())
    }

    /// Bellman-Ford path from `source` to `target`.
    ///
    /// Returns `Ok(None)` if `target` is unreachable and
    /// [`BellmanFordRoute::NegativeCycle`] if its distance is unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GraphError::VertexNotFound`] if either vertex is absent.
    fn bellman_ford_to(
        &self,
        source: VertexId,
        target: VertexId,
    ) -> Result<Option<BellmanFordRoute>> {
        require_vertex(self, source)?;
        require_vertex(self, target)?;
        let relaxed = relax_all(self, source);

        Ok(relaxed.distance.get(&target).map(|&distance| {
            if distance == f64::NEG_INFINITY {
                BellmanFordRoute::NegativeCycle
            } else {
                BellmanFordRoute::Path(WeightedPath {
                    distance,
                    path: walk_back(&relaxed.predecessor, source, target, self.vertex_count()),
                })
            }
        }))
    }
}

impl<G: Graph + ?Sized> ShortestPaths for G {}

// ---------------------------------------------------------------------------
// Best-first search (Dijkstra / A*)
// ---------------------------------------------------------------------------

pub(crate) struct Search {
    /// Final distances of every settled vertex, in ascending id order.
    pub(crate) settled: BTreeMap<VertexId, f64>,
    predecessor: HashMap<VertexId, VertexId>,
}

impl Search {
    fn path_to(&self, source: VertexId, target: VertexId) -> Option<WeightedPath> {
        let &distance = self.settled.get(&target)?;
        Some(WeightedPath {
            distance,
            path: walk_back(&self.predecessor, source, target, self.settled.len()),
        })
    }
}

/// Dijkstra when `heuristic` is zero, A* otherwise.
///
/// The heap priority of a vertex is its best known cost plus its heuristic.
/// A popped vertex is final; relaxing an unsettled neighbour either inserts
/// it or decreases its key.
#[instrument(level = "debug", skip(graph, heuristic))]
pub(crate) fn best_first<G, H>(
    graph: &G,
    source: VertexId,
    target: Option<VertexId>,
    heuristic: H,
) -> Result<Search>
where
    G: Graph + ?Sized,
    H: Fn(VertexId) -> f64,
{
    let mut heap: IndexedMinHeap<VertexId, f64> = IndexedMinHeap::new();
    let mut cost: HashMap<VertexId, f64> = HashMap::from([(source, 0.0)]);
    let mut settled: BTreeMap<VertexId, f64> = BTreeMap::new();
    let mut predecessor: HashMap<VertexId, VertexId> = HashMap::new();

    heap.push(source, heuristic(source))?;

    while !heap.is_empty() {
        let (v, _) = heap.pop()?;
        let best = cost.get(&v).copied().unwrap_or(0.0);
        settled.insert(v, best);

        if target == Some(v) {
            break;
        }

        for c in out_connections(graph, v) {
            if settled.contains_key(&c.to) {
                continue;
            }

            let candidate = best + c.weight;
            match cost.get(&c.to) {
                None => {
                    cost.insert(c.to, candidate);
                    predecessor.insert(c.to, v);
                    heap.push(c.to, candidate + heuristic(c.to))?;
                }
                Some(&known) if candidate < known => {
                    cost.insert(c.to, candidate);
                    predecessor.insert(c.to, v);
                    heap.update_key(&c.to, candidate + heuristic(c.to))?;
                }
                Some(_) => {}
            }
        }
    }

    debug!(settled = settled.len(), "best-first search finished");
    Ok(Search {
        settled,
        predecessor,
    })
}

// ---------------------------------------------------------------------------
// Bellman-Ford
// ---------------------------------------------------------------------------

struct Relaxation {
    distance: HashMap<VertexId, f64>,
    predecessor: HashMap<VertexId, VertexId>,
}

/// Run the relaxation phase and then the negative-cycle marking phase.
///
/// Relaxation passes scan vertices in id order and connections in insertion
/// order, stopping early once a pass changes nothing. Marking passes set
/// every destination that can still be relaxed to negative infinity, and
/// repeat until nothing new is marked so the mark reaches every vertex
/// downstream of a negative cycle.
#[instrument(level = "debug", skip(graph))]
fn relax_all<G>(graph: &G, source: VertexId) -> Relaxation
where
    G: Graph + ?Sized,
{
    let mut distance: HashMap<VertexId, f64> = HashMap::from([(source, 0.0)]);
    let mut predecessor: HashMap<VertexId, VertexId> = HashMap::new();

    for _ in 1..graph.vertex_count() {
        let mut changed = false;
        for (&u, vertex) in graph.vertices() {
            let Some(&du) = distance.get(&u) else {
                continue;
            };
            for c in &vertex.connections {
                let candidate = du + c.weight;
                if distance.get(&c.to).is_none_or(|&known| candidate < known) {
                    distance.insert(c.to, candidate);
                    predecessor.insert(c.to, u);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    let mut affected = 0_usize;
    loop {
        let mut marked = false;
        for (&u, vertex) in graph.vertices() {
            let Some(&du) = distance.get(&u) else {
                continue;
            };
            for c in &vertex.connections {
                if let Some(known) = distance.get_mut(&c.to) {
                    if du + c.weight < *known {
                        *known = f64::NEG_INFINITY;
                        affected += 1;
                        marked = true;
                    }
                }
            }
        }
        if !marked {
            break;
        }
    }

    if affected > 0 {
        debug!(affected, "negative cycle reachable from source");
    }

    Relaxation {
        distance,
        predecessor,
    }
}

// ---------------------------------------------------------------------------
// Path reconstruction
// ---------------------------------------------------------------------------

/// Follow predecessor links from `target` back to `source`.
///
/// `limit` bounds the walk so a malformed chain cannot loop forever.
fn walk_back(
    predecessor: &HashMap<VertexId, VertexId>,
    source: VertexId,
    target: VertexId,
    limit: usize,
) -> Vec<VertexId> {
    let mut path = vec![target];
    let mut cursor = target;
    while cursor != source && path.len() <= limit {
        let Some(&previous) = predecessor.get(&cursor) else {
            break;
        };
        path.push(previous);
        cursor = previous;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphError;
    use crate::graph::{DirectedGraph, UndirectedGraph};

    /// Directed 4×4 grid: each cell links right, then down.
    fn grid() -> DirectedGraph {
        let mut graph = DirectedGraph::new();
        for cell in 0..16 {
            if cell % 4 < 3 {
                graph.add_edge(cell, cell + 1);
            }
            if cell / 4 < 3 {
                graph.add_edge(cell, cell + 4);
            }
        }
        graph
    }

    #[test]
    fn bfs_path_through_grid_prefers_earlier_connections() {
        let graph = grid();
        assert_eq!(
            graph.shortest_path(0, 15).expect("vertices exist"),
            Some(vec![0, 1, 2, 3, 7, 11, 15])
        );
    }

    #[test]
    fn bfs_path_to_self_is_single_vertex() {
        let graph = grid();
        assert_eq!(graph.shortest_path(5, 5).expect("exists"), Some(vec![5]));
    }

    #[test]
    fn unreachable_target_is_none_not_error() {
        let graph = grid();
        assert_eq!(graph.shortest_path(15, 0).expect("exists"), None);
        assert!(!graph.is_there_path(15, 0).expect("exists"));
        assert_eq!(graph.dijkstra_to(15, 0).expect("exists"), None);
        assert_eq!(graph.bellman_ford_to(15, 0).expect("exists"), None);
    }

    #[test]
    fn missing_endpoints_are_errors() {
        let graph = grid();
        assert_eq!(graph.shortest_path(0, 99), Err(GraphError::VertexNotFound(99)));
        assert_eq!(graph.dijkstra(-1), Err(GraphError::VertexNotFound(-1)));
        assert_eq!(
            graph.a_star(99, 0, |_, _| 0.0),
            Err(GraphError::VertexNotFound(99))
        );
    }

    #[test]
    fn dijkstra_uses_decrease_key() {
        // 1 → 3 is seen first at cost 10, then improved via 2 to cost 3.
        let graph: DirectedGraph =
            DirectedGraph::from_weighted_edges([(1, 3, 10.0), (1, 2, 1.0), (2, 3, 2.0), (3, 4, 1.0)]);

        let path = graph.dijkstra_to(1, 4).expect("exists").expect("reachable");
        assert_eq!(path.path, vec![1, 2, 3, 4]);
        assert!((path.distance - 4.0).abs() < f64::EPSILON);

        let all = graph.dijkstra(1).expect("exists");
        assert_eq!(all, BTreeMap::from([(1, 0.0), (2, 1.0), (3, 3.0), (4, 4.0)]));
    }

    #[test]
    fn dijkstra_on_undirected_graph() {
        let graph: UndirectedGraph =
            UndirectedGraph::from_weighted_edges([(1, 2, 7.0), (1, 3, 9.0), (1, 6, 14.0), (2, 3, 10.0), (2, 4, 15.0), (3, 4, 11.0), (3, 6, 2.0), (4, 5, 6.0), (5, 6, 9.0)]);

        let path = graph.dijkstra_to(1, 5).expect("exists").expect("reachable");
        assert_eq!(path.path, vec![1, 3, 6, 5]);
        assert!((path.distance - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bellman_ford_on_weighted_triangle() {
        let graph: DirectedGraph =
            DirectedGraph::from_weighted_edges([(1, 2, 1.0), (2, 3, 1.0), (3, 1, 1.0)]);

        assert_eq!(
            graph.bellman_ford_to(1, 3).expect("exists"),
            Some(BellmanFordRoute::Path(WeightedPath {
                distance: 2.0,
                path: vec![1, 2, 3],
            }))
        );
    }

    #[test]
    fn bellman_ford_handles_negative_edges_without_cycles() {
        let graph: DirectedGraph =
            DirectedGraph::from_weighted_edges([(1, 2, 4.0), (1, 3, 5.0), (3, 2, -3.0), (2, 4, 1.0)]);

        let distances = graph.bellman_ford(1).expect("exists");
        assert_eq!(distances[&2], Distance::Finite(2.0));
        assert_eq!(distances[&4], Distance::Finite(3.0));

        let Some(BellmanFordRoute::Path(path)) = graph.bellman_ford_to(1, 4).expect("exists") else {
            panic!("expected a finite path");
        };
        assert_eq!(path.path, vec![1, 3, 2, 4]);
    }

    #[test]
    fn negative_cycle_poisons_everything_downstream() {
        // 0 → 1 → 2 → 3 → 1 with total cycle weight -1, then 3 → 4 → 5.
        // 6 is unreachable.
        let mut graph: DirectedGraph = DirectedGraph::from_weighted_edges([
            (0, 1, 1.0),
            (1, 2, 1.0),
            (2, 3, 1.0),
            (3, 1, -3.0),
            (3, 4, 1.0),
            (4, 5, 1.0),
        ]);
        graph.add_vertex(6).expect("fresh id");

        let distances = graph.bellman_ford(0).expect("exists");
        assert_eq!(distances[&0], Distance::Finite(0.0));
        for v in 1..=5 {
            assert_eq!(distances[&v], Distance::NegativeInfinity, "vertex {v}");
        }
        assert!(!distances.contains_key(&6));

        assert_eq!(
            graph.bellman_ford_to(0, 5).expect("exists"),
            Some(BellmanFordRoute::NegativeCycle)
        );
    }

    #[test]
    fn negative_self_loop_is_a_cycle() {
        let graph: DirectedGraph = DirectedGraph::from_weighted_edges([(1, 1, -1.0)]);
        assert_eq!(
            graph.bellman_ford(1).expect("exists"),
            BTreeMap::from([(1, Distance::NegativeInfinity)])
        );
    }

    #[test]
    fn a_star_with_manhattan_heuristic_on_grid() {
        let graph = grid();
        let manhattan = |v: VertexId, t: VertexId| {
            f64::from((v % 4 - t % 4).abs() + (v / 4 - t / 4).abs())
        };

        let path = graph.a_star(0, 15, manhattan).expect("exists").expect("reachable");
        assert!((path.distance - 6.0).abs() < f64::EPSILON);
        assert_eq!(path.path.len(), 7);
        assert_eq!(path.path.first(), Some(&0));
        assert_eq!(path.path.last(), Some(&15));
    }

    #[test]
    fn a_star_with_zero_heuristic_matches_dijkstra() {
        let graph: DirectedGraph =
            DirectedGraph::from_weighted_edges([(1, 2, 2.0), (1, 3, 1.0), (3, 2, 0.5), (2, 4, 1.0)]);

        assert_eq!(
            graph.a_star(1, 4, |_, _| 0.0).expect("exists"),
            graph.dijkstra_to(1, 4).expect("exists")
        );
    }

    #[test]
    fn inadmissible_heuristic_may_return_longer_path() {
        // Heuristic claims vertex 2 is far from the target, so A* finishes
        // through the direct but more expensive edge.
        let graph: DirectedGraph =
            DirectedGraph::from_weighted_edges([(1, 2, 1.0), (2, 3, 1.0), (1, 3, 5.0)]);

        let path = graph
            .a_star(1, 3, |v, _| if v == 2 { 100.0 } else { 0.0 })
            .expect("exists")
            .expect("reachable");
        assert_eq!(path.path, vec![1, 3]);
        assert!((path.distance - 5.0).abs() < f64::EPSILON);
    }
}
