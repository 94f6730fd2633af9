//! Graph file loading.
//!
//! Two formats, chosen by extension:
//!
//! - `.json`: `{"directed": bool?, "vertices": [id]?, "edges": [[u, v] | [u, v, w]]}`
//! - anything else: one edge per line as `u v [w]`; a lone `u` declares an
//!   isolated vertex and `#` starts a comment.
//!
//! Direction precedence: `--directed` / `--undirected` flag, then the
//! file's `directed` field, then the config default.

use std::path::Path;

use adjgraph_core::{DEFAULT_WEIGHT, DirectedGraph, Graph, UndirectedGraph, VertexId};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::debug;

/// A loaded graph of either direction.
#[derive(Debug, Clone)]
pub enum LoadedGraph {
    Directed(DirectedGraph),
    Undirected(UndirectedGraph),
}

/// Run `$body` with `$g` bound to the concrete graph inside a [`LoadedGraph`].
macro_rules! with_graph {
    ($loaded:expr, $g:ident => $body:expr) => {
        match $loaded {
            $crate::input::LoadedGraph::Directed($g) => $body,
            $crate::input::LoadedGraph::Undirected($g) => $body,
        }
    };
}
pub(crate) use with_graph;

impl LoadedGraph {
    pub const fn is_directed(&self) -> bool {
        matches!(self, Self::Directed(_))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Set by `--directed` / `--undirected`.
    pub directed_override: Option<bool>,
    /// From `[graph] directed` in the config.
    pub default_directed: bool,
}

/// Parsed file contents before a direction is chosen.
#[derive(Debug, Default, PartialEq)]
struct GraphSource {
    directed: Option<bool>,
    vertices: Vec<VertexId>,
    edges: Vec<(VertexId, VertexId, f64)>,
}

#[derive(Debug, Deserialize)]
struct JsonGraph {
    #[serde(default)]
    directed: Option<bool>,
    #[serde(default)]
    vertices: Vec<VertexId>,
    #[serde(default)]
    edges: Vec<JsonEdge>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonEdge {
    Weighted(VertexId, VertexId, f64),
    Unweighted(VertexId, VertexId),
}

/// Read and build the graph at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is malformed.
pub fn load(path: &Path, options: LoadOptions) -> Result<LoadedGraph> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read graph file {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let source = if is_json {
        parse_json(&content)
    } else {
        parse_text(&content)
    }
    .with_context(|| format!("Failed to parse graph file {}", path.display()))?;

    let directed = options
        .directed_override
        .or(source.directed)
        .unwrap_or(options.default_directed);
    let graph = build(source, directed);

    with_graph!(&graph, g => debug!(
        directed,
        vertices = g.vertex_count(),
        edges = g.edge_count(),
        "loaded graph"
    ));
    Ok(graph)
}

fn parse_json(content: &str) -> Result<GraphSource> {
    let raw: JsonGraph = serde_json::from_str(content)?;
    Ok(GraphSource {
        directed: raw.directed,
        vertices: raw.vertices,
        edges: raw
            .edges
            .into_iter()
            .map(|edge| match edge {
                JsonEdge::Weighted(u, v, w) => (u, v, w),
                JsonEdge::Unweighted(u, v) => (u, v, DEFAULT_WEIGHT),
            })
            .collect(),
    })
}

fn parse_text(content: &str) -> Result<GraphSource> {
    let mut source = GraphSource::default();

    for (number, line) in content.lines().enumerate() {
        let line = line.split_once('#').map_or(line, |(data, _)| data);
        let fields: Vec<&str> = line.split_whitespace().collect();
        let lineno = number + 1;

        match fields.as_slice() {
            [] => {}
            [u] => source.vertices.push(parse_id(u, lineno)?),
            [u, v] => source
                .edges
                .push((parse_id(u, lineno)?, parse_id(v, lineno)?, DEFAULT_WEIGHT)),
            [u, v, w] => {
                let weight: f64 = w
                    .parse()
                    .with_context(|| format!("line {lineno}: invalid weight {w:?}"))?;
                source
                    .edges
                    .push((parse_id(u, lineno)?, parse_id(v, lineno)?, weight));
            }
            _ => bail!(
                "line {lineno}: expected `u v [weight]`, found {} fields",
                fields.len()
            ),
        }
    }

    Ok(source)
}

fn parse_id(raw: &str, lineno: usize) -> Result<VertexId> {
    raw.parse()
        .with_context(|| format!("line {lineno}: invalid vertex id {raw:?}"))
}

fn build(source: GraphSource, directed: bool) -> LoadedGraph {
    if directed {
        LoadedGraph::Directed(populate(DirectedGraph::new(), source))
    } else {
        LoadedGraph::Undirected(populate(UndirectedGraph::new(), source))
    }
}

fn populate<G: Graph>(mut graph: G, source: GraphSource) -> G {
    for v in source.vertices {
        // Re-declaring a vertex is harmless in a file.
        let _ = graph.add_vertex(v);
    }
    graph.add_weighted_edges(source.edges);
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_format_handles_comments_weights_and_isolated_vertices() {
        let source = parse_text("# header\n1 2\n2 3 2.5  # weighted\n\n9\n").expect("valid text");
        assert_eq!(
            source,
            GraphSource {
                directed: None,
                vertices: vec![9],
                edges: vec![(1, 2, 1.0), (2, 3, 2.5)],
            }
        );
    }

    #[test]
    fn text_format_reports_line_numbers() {
        let err = parse_text("1 2\n1 x\n").expect_err("bad id");
        assert!(format!("{err:#}").contains("line 2"));

        let err = parse_text("1 2 3 4\n").expect_err("too many fields");
        assert!(err.to_string().contains("4 fields"));
    }

    #[test]
    fn json_format_accepts_mixed_edge_arities() {
        let source = parse_json(r#"{"directed": false, "vertices": [7], "edges": [[1, 2], [2, 3, -1.5]]}"#)
            .expect("valid json");
        assert_eq!(source.directed, Some(false));
        assert_eq!(source.vertices, vec![7]);
        assert_eq!(source.edges, vec![(1, 2, 1.0), (2, 3, -1.5)]);
    }

    #[test]
    fn json_format_rejects_bad_edges() {
        assert!(parse_json(r#"{"edges": [[1]]}"#).is_err());
        assert!(parse_json(r#"{"edges": [[1, 2, 3, 4]]}"#).is_err());
    }

    #[test]
    fn direction_precedence() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("g.json");
        std::fs::write(&path, r#"{"directed": false, "edges": [[1, 2]]}"#).expect("write");

        let from_file = LoadOptions {
            directed_override: None,
            default_directed: true,
        };
        assert!(!load(&path, from_file).expect("loads").is_directed());

        let forced = LoadOptions {
            directed_override: Some(true),
            default_directed: false,
        };
        assert!(load(&path, forced).expect("loads").is_directed());

        let text = dir.path().join("g.txt");
        std::fs::write(&text, "1 2\n").expect("write");
        let config_default = LoadOptions {
            directed_override: None,
            default_directed: false,
        };
        assert!(!load(&text, config_default).expect("loads").is_directed());
    }

    #[test]
    fn undirected_build_stores_both_directions() {
        let source = parse_text("1 2\n").expect("valid");
        let LoadedGraph::Undirected(graph) = build(source, false) else {
            panic!("expected undirected graph");
        };
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.vertices_connected(2, 1).expect("exists"));
    }
}
