//! `adjg summary`: Size, shape and fingerprint of a graph.

use std::io::Write;

use adjgraph_core::{Graph, VertexId};
use clap::Args;
use serde::Serialize;

use super::{Context, GraphFile};
use crate::input::with_graph;
use crate::output::{pretty_kv, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub graph: GraphFile,
}

#[derive(Debug, Serialize)]
struct SummaryOutput {
    directed: bool,
    vertices: usize,
    edges: usize,
    simple: bool,
    connected: bool,
    tree: bool,
    eulerian: bool,
    min_vertex: Option<VertexId>,
    max_vertex: Option<VertexId>,
    content_hash: String,
}

fn summarize<G: Graph>(graph: &G) -> SummaryOutput {
    let ids = graph.vertices();
    SummaryOutput {
        directed: graph.is_directed(),
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        simple: graph.is_simple(),
        connected: graph.is_connected(),
        tree: graph.is_tree(),
        eulerian: graph.is_eulerian(),
        min_vertex: ids.keys().next().copied(),
        max_vertex: ids.keys().next_back().copied(),
        content_hash: graph.content_hash(),
    }
}

/// Execute `adjg summary`.
pub fn run_summary(args: &SummaryArgs, ctx: &Context) -> anyhow::Result<()> {
    let loaded = ctx.load(&args.graph)?;
    let payload = with_graph!(&loaded, g => summarize(g));

    render_mode(ctx.output, &payload, render_text, render_pretty)
}

fn render_text(s: &SummaryOutput, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        w,
        "{} vertices={} edges={} simple={} connected={} tree={} eulerian={} {}",
        if s.directed { "directed" } else { "undirected" },
        s.vertices,
        s.edges,
        s.simple,
        s.connected,
        s.tree,
        s.eulerian,
        s.content_hash
    )
}

fn render_pretty(s: &SummaryOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(
        w,
        if s.directed {
            "Directed graph"
        } else {
            "Undirected graph"
        },
    )?;
    pretty_kv(w, "vertices", s.vertices.to_string())?;
    pretty_kv(w, "edges", s.edges.to_string())?;
    if let (Some(lo), Some(hi)) = (s.min_vertex, s.max_vertex) {
        pretty_kv(w, "id range", format!("{lo}..={hi}"))?;
    }
    pretty_kv(w, "simple", yes_no(s.simple))?;
    pretty_kv(w, "connected", yes_no(s.connected))?;
    pretty_kv(w, "tree", yes_no(s.tree))?;
    pretty_kv(w, "eulerian", yes_no(s.eulerian))?;
    pretty_kv(w, "hash", &s.content_hash)
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
