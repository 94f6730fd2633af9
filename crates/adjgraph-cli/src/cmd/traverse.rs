//! `adjg traverse`: BFS / DFS vertex or edge order.

use std::io::Write;

use adjgraph_core::algo::Traversal;
use adjgraph_core::{EdgeCrossing, Graph, VertexId};
use clap::{Args, ValueEnum};
use serde::Serialize;

use super::{Context, GraphFile};
use crate::input::with_graph;
use crate::output::{join, pretty_section, render_mode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Order {
    Bfs,
    Dfs,
    DfsRecursive,
}

#[derive(Args, Debug)]
pub struct TraverseArgs {
    #[command(flatten)]
    pub graph: GraphFile,

    /// Traversal order.
    #[arg(long, value_enum, default_value = "bfs")]
    pub order: Order,

    /// Only walk what is reachable from this vertex.
    #[arg(long)]
    pub start: Option<VertexId>,

    /// Report edge crossings instead of vertices.
    #[arg(long)]
    pub edges: bool,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Walk {
    Vertices(Vec<VertexId>),
    Edges(Vec<EdgeCrossing>),
}

#[derive(Debug, Serialize)]
struct TraverseOutput {
    order: Order,
    start: Option<VertexId>,
    walk: Walk,
}

fn walk<G: Graph>(graph: &G, args: &TraverseArgs) -> adjgraph_core::Result<Walk> {
    Ok(match (args.edges, args.order, args.start) {
        (false, Order::Bfs, None) => Walk::Vertices(graph.bfs_traversal()),
        (false, Order::Bfs, Some(s)) => Walk::Vertices(graph.bfs_traversal_from(s)?),
        (false, Order::Dfs, None) => Walk::Vertices(graph.dfs_traversal()),
        (false, Order::Dfs, Some(s)) => Walk::Vertices(graph.dfs_traversal_from(s)?),
        (false, Order::DfsRecursive, None) => Walk::Vertices(graph.dfs_traversal_recursive()),
        (false, Order::DfsRecursive, Some(s)) => {
            Walk::Vertices(graph.dfs_traversal_recursive_from(s)?)
        }
        (true, Order::Bfs, None) => Walk::Edges(graph.bfs_edge_traversal()),
        (true, Order::Bfs, Some(s)) => Walk::Edges(graph.bfs_edge_traversal_from(s)?),
        (true, Order::Dfs, None) => Walk::Edges(graph.dfs_edge_traversal()),
        (true, Order::Dfs, Some(s)) => Walk::Edges(graph.dfs_edge_traversal_from(s)?),
        (true, Order::DfsRecursive, None) => Walk::Edges(graph.dfs_edge_traversal_recursive()),
        (true, Order::DfsRecursive, Some(s)) => {
            Walk::Edges(graph.dfs_edge_traversal_recursive_from(s)?)
        }
    })
}

/// Execute `adjg traverse`.
pub fn run_traverse(args: &TraverseArgs, ctx: &Context) -> anyhow::Result<()> {
    let loaded = ctx.load(&args.graph)?;
    let walk = with_graph!(&loaded, g => walk(g, args))?;
    let payload = TraverseOutput {
        order: args.order,
        start: args.start,
        walk,
    };

    render_mode(ctx.output, &payload, render_text, render_pretty)
}

fn crossing_line(c: &EdgeCrossing) -> String {
    let arrow = if c.forward { "->" } else { "<-" };
    format!("{} {arrow} {}", c.from, c.to)
}

fn render_text(p: &TraverseOutput, w: &mut dyn Write) -> std::io::Result<()> {
    match &p.walk {
        Walk::Vertices(order) => writeln!(w, "{}", join(order)),
        Walk::Edges(crossings) => {
            for c in crossings {
                writeln!(w, "{} {} {}", c.from, c.to, if c.forward { "fwd" } else { "back" })?;
            }
            Ok(())
        }
    }
}

fn render_pretty(p: &TraverseOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let heading = match p.start {
        Some(s) => format!("{:?} traversal from {s}", p.order),
        None => format!("{:?} traversal", p.order),
    };
    pretty_section(w, &heading)?;
    match &p.walk {
        Walk::Vertices(order) => {
            for (step, v) in order.iter().enumerate() {
                writeln!(w, "{step:>5}  {v}")?;
            }
        }
        Walk::Edges(crossings) => {
            for (step, c) in crossings.iter().enumerate() {
                writeln!(w, "{step:>5}  {}", crossing_line(c))?;
            }
        }
    }
    Ok(())
}
