//! `adjg topo`: Topological order (reversed DFS post-order).

use std::io::Write;

use adjgraph_core::algo::TopologicalSort;
use adjgraph_core::{Graph, VertexId};
use clap::Args;
use serde::Serialize;

use super::{Context, GraphFile};
use crate::input::with_graph;
use crate::output::{join, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct TopoArgs {
    #[command(flatten)]
    pub graph: GraphFile,

    /// Order only what is reachable from (or, with --backwards, reaches)
    /// this vertex.
    #[arg(long)]
    pub start: Option<VertexId>,

    /// Order by the transposed graph, reversed.
    #[arg(long)]
    pub backwards: bool,
}

#[derive(Debug, Serialize)]
struct TopoOutput {
    backwards: bool,
    start: Option<VertexId>,
    order: Vec<VertexId>,
}

fn order<G>(graph: &G, args: &TopoArgs) -> adjgraph_core::Result<Vec<VertexId>>
where
    G: Graph,
    G::Data: Clone,
{
    match (args.backwards, args.start) {
        (false, None) => Ok(graph.topological_order()),
        (false, Some(s)) => graph.topological_order_from(s),
        (true, None) => Ok(graph.backwards_topological_order()),
        (true, Some(s)) => graph.backwards_topological_order_from(s),
    }
}

/// Execute `adjg topo`.
pub fn run_topo(args: &TopoArgs, ctx: &Context) -> anyhow::Result<()> {
    let loaded = ctx.load(&args.graph)?;
    if !loaded.is_directed() {
        tracing::warn!("topological order of an undirected graph is only a DFS finishing order");
    }
    let payload = TopoOutput {
        backwards: args.backwards,
        start: args.start,
        order: with_graph!(&loaded, g => order(g, args))?,
    };

    render_mode(ctx.output, &payload, render_text, render_pretty)
}

fn render_text(p: &TopoOutput, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "{}", join(&p.order))
}

fn render_pretty(p: &TopoOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let heading = if p.backwards {
        "Backwards topological order"
    } else {
        "Topological order"
    };
    pretty_section(w, heading)?;
    for (rank, v) in p.order.iter().enumerate() {
        writeln!(w, "{rank:>5}  {v}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use adjgraph_core::DirectedGraph;

    fn args(backwards: bool, start: Option<VertexId>) -> TopoArgs {
        TopoArgs {
            graph: GraphFile {
                path: "g.txt".into(),
            },
            start,
            backwards,
        }
    }

    #[test]
    fn forward_and_backward_orders() {
        let graph: DirectedGraph = DirectedGraph::from_edges([(1, 2), (2, 3), (4, 3)]);

        assert_eq!(order(&graph, &args(false, None)).expect("dag"), vec![4, 1, 2, 3]);
        assert_eq!(order(&graph, &args(false, Some(2))).expect("exists"), vec![2, 3]);

        let into_three = order(&graph, &args(true, Some(3))).expect("exists");
        assert_eq!(into_three.last(), Some(&3));
        assert_eq!(into_three.len(), 4);
    }
}
