//! `adjg path`: One shortest path between two vertices.

use std::io::Write;

use adjgraph_core::algo::ShortestPaths;
use adjgraph_core::{BellmanFordRoute, Graph, VertexId};
use clap::{Args, ValueEnum};
use serde::Serialize;

use super::{Context, GraphFile};
use crate::input::with_graph;
use crate::output::{join, pretty_kv, pretty_section, render_mode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathAlgorithm {
    /// Fewest edges, weights ignored.
    Bfs,
    /// Cheapest path, non-negative weights.
    Dijkstra,
    /// Cheapest path, negative weights allowed.
    BellmanFord,
}

#[derive(Args, Debug)]
pub struct PathArgs {
    #[command(flatten)]
    pub graph: GraphFile,

    #[arg(value_name = "FROM")]
    pub from: VertexId,

    #[arg(value_name = "TO")]
    pub to: VertexId,

    #[arg(long, value_enum, default_value = "bfs")]
    pub algorithm: PathAlgorithm,
}

#[derive(Debug, Serialize, PartialEq)]
struct PathOutput {
    from: VertexId,
    to: VertexId,
    algorithm: PathAlgorithm,
    found: bool,
    negative_cycle: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Vec<VertexId>>,
}

impl PathOutput {
    const fn empty(args: &PathArgs) -> Self {
        Self {
            from: args.from,
            to: args.to,
            algorithm: args.algorithm,
            found: false,
            negative_cycle: false,
            distance: None,
            path: None,
        }
    }

    fn with_path(mut self, distance: f64, path: Vec<VertexId>) -> Self {
        self.found = true;
        self.distance = Some(distance);
        self.path = Some(path);
        self
    }
}

fn find<G: Graph>(graph: &G, args: &PathArgs) -> adjgraph_core::Result<PathOutput> {
    let out = PathOutput::empty(args);
    Ok(match args.algorithm {
        PathAlgorithm::Bfs => match graph.shortest_path(args.from, args.to)? {
            Some(path) => {
                let hops = path.len().saturating_sub(1);
                out.with_path(f64::from(u32::try_from(hops).unwrap_or(u32::MAX)), path)
            }
            None => out,
        },
        PathAlgorithm::Dijkstra => match graph.dijkstra_to(args.from, args.to)? {
            Some(found) => out.with_path(found.distance, found.path),
            None => out,
        },
        PathAlgorithm::BellmanFord => match graph.bellman_ford_to(args.from, args.to)? {
            Some(BellmanFordRoute::Path(found)) => out.with_path(found.distance, found.path),
            Some(BellmanFordRoute::NegativeCycle) => PathOutput {
                negative_cycle: true,
                ..out
            },
            None => out,
        },
    })
}

/// Execute `adjg path`.
pub fn run_path(args: &PathArgs, ctx: &Context) -> anyhow::Result<()> {
    let loaded = ctx.load(&args.graph)?;
    let payload = with_graph!(&loaded, g => find(g, args))?;

    render_mode(ctx.output, &payload, render_text, render_pretty)
}

fn render_text(p: &PathOutput, w: &mut dyn Write) -> std::io::Result<()> {
    match (&p.path, p.distance) {
        (Some(path), Some(distance)) => writeln!(w, "{distance} {}", join(path)),
        _ if p.negative_cycle => writeln!(w, "-inf"),
        _ => writeln!(w, "none"),
    }
}

fn render_pretty(p: &PathOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Path {} -> {}", p.from, p.to))?;
    if p.negative_cycle {
        return pretty_kv(w, "result", "unbounded (negative cycle)");
    }
    match (&p.path, p.distance) {
        (Some(path), Some(distance)) => {
            pretty_kv(w, "distance", distance.to_string())?;
            pretty_kv(w, "hops", path.len().saturating_sub(1).to_string())?;
            pretty_kv(
                w,
                "path",
                path.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" -> "),
            )
        }
        _ => pretty_kv(w, "result", "no path"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adjgraph_core::DirectedGraph;

    fn args(algorithm: PathAlgorithm, from: VertexId, to: VertexId) -> PathArgs {
        PathArgs {
            graph: GraphFile {
                path: "g.txt".into(),
            },
            from,
            to,
            algorithm,
        }
    }

    fn weighted() -> DirectedGraph {
        DirectedGraph::from_weighted_edges([(1, 2, 5.0), (1, 3, 1.0), (3, 2, 1.0), (4, 4, -1.0)])
    }

    #[test]
    fn bfs_reports_hop_count() {
        let out = find(&weighted(), &args(PathAlgorithm::Bfs, 1, 2)).expect("exists");
        assert_eq!(out.path, Some(vec![1, 2]));
        assert_eq!(out.distance, Some(1.0));
    }

    #[test]
    fn dijkstra_reports_weighted_distance() {
        let out = find(&weighted(), &args(PathAlgorithm::Dijkstra, 1, 2)).expect("exists");
        assert_eq!(out.path, Some(vec![1, 3, 2]));
        assert_eq!(out.distance, Some(2.0));
    }

    #[test]
    fn bellman_ford_flags_negative_cycles() {
        let out = find(&weighted(), &args(PathAlgorithm::BellmanFord, 4, 4)).expect("exists");
        assert!(out.negative_cycle);
        assert!(!out.found);
    }

    #[test]
    fn unreachable_is_not_found() {
        let out = find(&weighted(), &args(PathAlgorithm::Dijkstra, 2, 1)).expect("exists");
        assert_eq!(out, PathOutput::empty(&args(PathAlgorithm::Dijkstra, 2, 1)));

        let mut buf = Vec::new();
        render_text(&out, &mut buf).expect("write");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "none\n");
    }

    #[test]
    fn missing_vertex_is_an_error() {
        assert!(find(&weighted(), &args(PathAlgorithm::Bfs, 1, 99)).is_err());
    }
}
