//! Plain data types shared by the graph variants and the algorithms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Caller-assigned vertex identifier. Ids need not be contiguous.
pub type VertexId = i32;

/// Weight given to edges added without an explicit weight.
pub const DEFAULT_WEIGHT: f64 = 1.0;

// ---------------------------------------------------------------------------
// Adjacency records
// ---------------------------------------------------------------------------

/// One outgoing adjacency record: the target vertex and the edge weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub to: VertexId,
    pub weight: f64,
}

impl Connection {
    #[must_use]
    pub const fn new(to: VertexId, weight: f64) -> Self {
        Self { to, weight }
    }

    /// A connection carrying [`DEFAULT_WEIGHT`].
    #[must_use]
    pub const fn unweighted(to: VertexId) -> Self {
        Self::new(to, DEFAULT_WEIGHT)
    }
}

/// A vertex: optional payload plus its outgoing connections.
///
/// Connection order is insertion order. Traversal output and edge
/// classification are defined in terms of this order, so it is never
/// re-sorted or deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex<T> {
    pub data: Option<T>,
    pub connections: Vec<Connection>,
}

impl<T> Vertex<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            data: None,
            connections: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_data(data: T) -> Self {
        Self {
            data: Some(data),
            connections: Vec::new(),
        }
    }

    /// Builder-style helper used when assembling vertex maps by hand.
    #[must_use]
    pub fn connect(mut self, to: VertexId, weight: f64) -> Self {
        self.connections.push(Connection::new(to, weight));
        self
    }

    /// Number of stored outgoing connections.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.connections.len()
    }

    /// `true` if at least one connection targets `to`.
    #[must_use]
    pub fn connects_to(&self, to: VertexId) -> bool {
        self.connections.iter().any(|c| c.to == to)
    }
}

impl<T> Default for Vertex<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Algorithm results
// ---------------------------------------------------------------------------

/// One step of an edge traversal.
///
/// `forward` is `true` when the edge is followed out of `from`, and `false`
/// for the synthetic return step taken back over an edge (backtracking in
/// DFS, or bouncing off an already visited vertex).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeCrossing {
    pub from: VertexId,
    pub to: VertexId,
    pub forward: bool,
}

impl EdgeCrossing {
    #[must_use]
    pub const fn forward(from: VertexId, to: VertexId) -> Self {
        Self {
            from,
            to,
            forward: true,
        }
    }

    #[must_use]
    pub const fn backward(from: VertexId, to: VertexId) -> Self {
        Self {
            from,
            to,
            forward: false,
        }
    }
}

impl From<(VertexId, VertexId, bool)> for EdgeCrossing {
    fn from((from, to, forward): (VertexId, VertexId, bool)) -> Self {
        Self { from, to, forward }
    }
}

/// A weighted path from a source to a target, endpoints included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedPath {
    pub distance: f64,
    pub path: Vec<VertexId>,
}

/// A Bellman-Ford distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distance {
    Finite(f64),
    /// The vertex is reachable from a negative-weight cycle.
    NegativeInfinity,
}

impl Distance {
    /// Map an internal `f64` estimate to a [`Distance`].
    #[must_use]
    pub fn from_estimate(value: f64) -> Self {
        if value == f64::NEG_INFINITY {
            Self::NegativeInfinity
        } else {
            Self::Finite(value)
        }
    }

    #[must_use]
    pub const fn finite(self) -> Option<f64> {
        match self {
            Self::Finite(value) => Some(value),
            Self::NegativeInfinity => None,
        }
    }

    #[must_use]
    pub const fn is_negative_infinity(self) -> bool {
        matches!(self, Self::NegativeInfinity)
    }
}

/// Single-target Bellman-Ford outcome for a reachable target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BellmanFordRoute {
    Path(WeightedPath),
    /// The target's distance is unbounded below.
    NegativeCycle,
}

/// Component labelling: `membership[v]` is in `0..count`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Components {
    pub count: usize,
    pub membership: BTreeMap<VertexId, usize>,
}

impl Components {
    /// Members of every component, indexed by component number.
    ///
    /// Members are listed in ascending id order.
    #[must_use]
    pub fn list(&self) -> Vec<Vec<VertexId>> {
        let mut list = vec![Vec::new(); self.count];
        // Labels at or past `count` have no slot and are skipped.
        for (&vertex, &component) in &self.membership {
            if let Some(slot) = list.get_mut(component) {
                slot.push(vertex);
            }
        }
        list
    }

    /// Component index of `vertex`, if it was labelled.
    #[must_use]
    pub fn component_of(&self, vertex: VertexId) -> Option<usize> {
        self.membership.get(&vertex).copied()
    }

    /// `true` if both vertices carry the same label.
    #[must_use]
    pub fn same_component(&self, a: VertexId, b: VertexId) -> bool {
        match (self.component_of(a), self.component_of(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_list_groups_by_index_in_id_order() {
        let components = Components {
            count: 2,
            membership: BTreeMap::from([(5, 1), (-1, 0), (3, 1), (2, 0)]),
        };

        assert_eq!(components.list(), vec![vec![-1, 2], vec![3, 5]]);
        assert!(components.same_component(3, 5));
        assert!(!components.same_component(2, 5));
        assert!(!components.same_component(2, 99));
    }

    #[test]
    fn components_list_skips_out_of_range_labels() {
        let components = Components {
            count: 1,
            membership: BTreeMap::from([(1, 0), (2, 3)]),
        };
        assert_eq!(components.list(), vec![vec![1]]);
    }

    #[test]
    fn distance_maps_negative_infinity() {
        assert_eq!(Distance::from_estimate(2.5), Distance::Finite(2.5));
        assert!(Distance::from_estimate(f64::NEG_INFINITY).is_negative_infinity());
        assert_eq!(Distance::NegativeInfinity.finite(), None);
    }

    #[test]
    fn vertex_builder_preserves_insertion_order() {
        let v: Vertex<()> = Vertex::new().connect(3, 1.0).connect(1, 2.0).connect(3, 1.0);
        let targets: Vec<VertexId> = v.connections.iter().map(|c| c.to).collect();
        assert_eq!(targets, vec![3, 1, 3]);
        assert_eq!(v.degree(), 3);
        assert!(v.connects_to(1));
    }

    #[test]
    fn result_types_serialize_to_json() {
        let json = serde_json::to_string(&EdgeCrossing::backward(2, 1)).expect("serialize");
        assert_eq!(json, r#"{"from":2,"to":1,"forward":false}"#);

        let json = serde_json::to_string(&Distance::NegativeInfinity).expect("serialize");
        assert_eq!(json, r#""negative_infinity""#);
    }
}
