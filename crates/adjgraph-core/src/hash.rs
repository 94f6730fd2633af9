//! Structural fingerprinting for cache invalidation.
//!
//! Callers that memoise algorithm results keyed on a graph can store the
//! fingerprint alongside them and recompute when it changes.

use crate::graph::VertexMap;

/// BLAKE3 hash over direction, vertex ids and connections, in map order.
///
/// Weights are hashed by their IEEE-754 bit pattern so `0.0` and `-0.0`
/// produce different fingerprints.
pub(crate) fn content_hash<T>(directed: bool, vertices: &VertexMap<T>) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(if directed { b"directed\n" } else { b"undirect\n" });

    for (&id, vertex) in vertices {
        hasher.update(b"v");
        hasher.update(&id.to_le_bytes());
        hasher.update(&(vertex.connections.len() as u64).to_le_bytes());
        for c in &vertex.connections {
            hasher.update(&c.to.to_le_bytes());
            hasher.update(&c.weight.to_bits().to_le_bytes());
        }
    }

    format!("blake3:{}", hasher.finalize().to_hex())
}
