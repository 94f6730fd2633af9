//! Eccentricity-based graph metrics.
//!
//! Distances are weighted Dijkstra distances, so the usual non-negative
//! weight assumption applies. A vertex that cannot reach every other vertex
//! has infinite eccentricity.

use std::collections::BTreeMap;

use crate::algo::shortest_path::ShortestPaths;
use crate::error::Result;
use crate::graph::Graph;
use crate::model::VertexId;

pub trait Eccentricity: Graph {
    /// Largest shortest-path distance from `v` to any vertex.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GraphError::VertexNotFound`] if `v` is absent.
    fn eccentricity(&self, v: VertexId) -> Result<f64> {
        let distances = self.dijkstra(v)?;
        if distances.len() < self.vertex_count() {
            return Ok(f64::INFINITY);
        }
        Ok(distances.into_values().fold(0.0, f64::max))
    }

    /// Eccentricity of every vertex.
    fn eccentricities(&self) -> BTreeMap<VertexId, f64> {
        self.vertices()
            .keys()
            .filter_map(|&v| self.eccentricity(v).ok().map(|e| (v, e)))
            .collect()
    }

    /// Smallest eccentricity; `None` for an empty graph.
    fn radius(&self) -> Option<f64> {
        self.eccentricities().into_values().reduce(f64::min)
    }

    /// Largest eccentricity; `None` for an empty graph.
    fn diameter(&self) -> Option<f64> {
        self.eccentricities().into_values().reduce(f64::max)
    }

    /// Vertices whose eccentricity equals the radius, in ascending id order.
    fn central_vertices(&self) -> Vec<VertexId> {
        let eccentricities = self.eccentricities();
        let Some(radius) = eccentricities.values().copied().reduce(f64::min) else {
            return Vec::new();
        };
        eccentricities
            .into_iter()
            .filter(|(_, e)| e.total_cmp(&radius).is_eq())
            .map(|(v, _)| v)
            .collect()
    }
}

impl<G: Graph + ?Sized> Eccentricity for G {}
