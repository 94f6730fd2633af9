//! Known-topology regression tests.
//!
//! Each test builds a small hand-crafted graph whose answers were worked out
//! by hand and hardcoded.

use std::collections::BTreeMap;

use adjgraph_core::prelude::*;
use adjgraph_core::{IndexedMinHeap, Vertex, VertexMap};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// 4×4 grid; each cell lists its right neighbour before its lower one.
fn grid(side: VertexId) -> DirectedGraph {
    let mut graph = DirectedGraph::new();
    for cell in 0..side * side {
        if cell % side < side - 1 {
            graph.add_edge(cell, cell + 1);
        }
        if cell / side < side - 1 {
            graph.add_edge(cell, cell + side);
        }
    }
    graph
}

/// Complete binary tree on 0..=12, children of `v` are `2v + 1` and `2v + 2`.
fn binary_tree() -> DirectedGraph {
    DirectedGraph::from_edges((1..13).map(|v| ((v - 1) / 2, v)))
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn grid_shortest_path_follows_the_top_row_first() {
    let graph = grid(4);
    assert_eq!(
        graph.shortest_path(0, 15).expect("vertices exist"),
        Some(vec![0, 1, 2, 3, 7, 11, 15])
    );
    assert!(graph.is_there_path(0, 15).expect("vertices exist"));
    assert!(!graph.is_there_path(15, 0).expect("vertices exist"));
}

#[test]
fn binary_tree_bfs_and_components() {
    let graph = binary_tree();

    assert_eq!(graph.bfs_traversal(), (0..=12).collect::<Vec<_>>());
    assert_eq!(graph.tarjan_scc_map().count, 13);
    assert_eq!(graph.tarjan_scc_list_recursive().len(), 13);
    assert!(graph.is_tree());
    assert!(graph.is_connected());
    assert!(!graph.is_eulerian());
}

#[test]
fn weighted_triangle_bellman_ford() {
    let graph: DirectedGraph =
        DirectedGraph::from_weighted_edges([(1, 2, 1.0), (2, 3, 1.0), (3, 1, 1.0)]);

    assert_eq!(
        graph.bellman_ford_to(1, 3).expect("vertices exist"),
        Some(BellmanFordRoute::Path(WeightedPath {
            distance: 2.0,
            path: vec![1, 2, 3],
        }))
    );
    assert!(graph.is_eulerian());
}

#[test]
fn negative_cycle_marks_every_reachable_vertex() {
    let graph: DirectedGraph =
        DirectedGraph::from_weighted_edges([(1, 2, 1.0), (2, 3, -1.0), (3, 1, -1.0), (3, 4, 2.0)]);

    let distances = graph.bellman_ford(1).expect("source exists");
    assert_eq!(distances.len(), 4);
    assert!(distances.values().all(|d| d.is_negative_infinity()));
}

#[test]
fn mutation_round_trip() {
    let mut graph: UndirectedGraph<&str> = UndirectedGraph::new();
    graph.add_vertex_with_data(1, "hub").expect("fresh id");
    graph.add_edges([(1, 2), (1, 3), (2, 3), (3, 4)]);

    assert_eq!(graph.vertex_count(), 4);
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(graph.vertex(1).expect("exists").data, Some("hub"));
    assert_eq!(graph.bridges(), Ok(vec![(3, 4)]));
    assert_eq!(graph.articulation_points(), vec![3]);

    graph.remove_edges([(3, 4)]).expect("edge exists");
    assert!(!graph.is_connected());
    assert_eq!(graph.scc_list(), vec![vec![1, 2, 3], vec![4]]);

    let removed = graph.remove_vertex(4).expect("exists");
    assert_eq!(removed.degree(), 0);
    assert!(graph.is_connected());
    assert!(!graph.is_tree());
}

#[test]
fn from_vertices_round_trips_a_built_graph() {
    let vertices: VertexMap<()> = VertexMap::from([
        (1, Vertex::new().connect(2, 4.0).connect(3, 1.0)),
        (2, Vertex::new()),
        (3, Vertex::new().connect(2, 1.0)),
    ]);
    let graph = DirectedGraph::from_vertices(vertices.clone()).expect("consistent map");

    let path = graph.dijkstra_to(1, 2).expect("exists").expect("reachable");
    assert_eq!(path.path, vec![1, 3, 2]);
    assert_eq!(graph.into_vertices(), vertices);
}

#[test]
fn transpose_and_backwards_order() {
    let graph: DirectedGraph = DirectedGraph::from_edges([(1, 2), (2, 3), (1, 3)]);
    let transposed = graph.transpose();

    assert!(transposed.vertices_connected(3, 1).expect("exists"));
    assert!(!transposed.vertices_connected(1, 3).expect("exists"));
    assert_eq!(transposed.transpose(), graph);
    assert_eq!(graph.topological_order(), vec![1, 2, 3]);
    assert_eq!(graph.backwards_topological_order(), vec![1, 2, 3]);
}

#[test]
fn dag_shortest_path_matches_dijkstra_on_grid() {
    let graph = grid(5);
    let dag = graph
        .topological_order_single_source_shortest_path(0)
        .expect("exists");
    assert_eq!(dag, graph.dijkstra(0).expect("exists"));
    assert_eq!(dag[&24], 8.0);
}

#[test]
fn metrics_on_cycle_with_tail() {
    // Square 1-2-3-4 with a tail 4-5.
    let graph: UndirectedGraph =
        UndirectedGraph::from_edges([(1, 2), (2, 3), (3, 4), (4, 1), (4, 5)]);

    assert_eq!(
        graph.eccentricities(),
        BTreeMap::from([(1, 2.0), (2, 3.0), (3, 2.0), (4, 2.0), (5, 3.0)])
    );
    assert_eq!(graph.radius(), Some(2.0));
    assert_eq!(graph.diameter(), Some(3.0));
    assert_eq!(graph.central_vertices(), vec![1, 3, 4]);
}

#[test]
fn heap_drives_a_manual_dijkstra_step() {
    let mut heap: IndexedMinHeap<VertexId, f64> = IndexedMinHeap::new();
    heap.push(1, 5.0).expect("fresh key");
    heap.push(2, 3.0).expect("fresh key");
    heap.push(3, 4.0).expect("fresh key");
    heap.update_key(&1, 1.0).expect("present");

    assert_eq!(heap.pop(), Ok((1, 1.0)));
    assert_eq!(heap.pop(), Ok((2, 3.0)));
    assert_eq!(heap.len(), 1);
}

#[test]
fn content_hash_tracks_mutations() {
    let mut graph = grid(3);
    let before = graph.content_hash();
    graph.add_edge(8, 0);
    assert_ne!(graph.content_hash(), before);
    graph.remove_edge(8, 0).expect("edge exists");
    assert_eq!(graph.content_hash(), before);
}
