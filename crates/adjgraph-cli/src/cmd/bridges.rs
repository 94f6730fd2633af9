//! `adjg bridges`: Bridges or articulation points of an undirected graph.

use std::io::Write;

use adjgraph_core::{Graph, VertexId};
use anyhow::bail;
use clap::Args;
use serde::Serialize;

use super::{Context, GraphFile};
use crate::input::{LoadedGraph, with_graph};
use crate::output::{join, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct BridgesArgs {
    #[command(flatten)]
    pub graph: GraphFile,

    /// Report cut vertices instead of bridges.
    #[arg(long)]
    pub articulation_points: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum BridgesOutput {
    Bridges(Vec<(VertexId, VertexId)>),
    ArticulationPoints(Vec<VertexId>),
}

fn analyse(loaded: &LoadedGraph, args: &BridgesArgs) -> anyhow::Result<BridgesOutput> {
    if args.articulation_points {
        let LoadedGraph::Undirected(g) = loaded else {
            bail!("articulation points need an undirected graph (pass --undirected)");
        };
        return Ok(BridgesOutput::ArticulationPoints(g.articulation_points()));
    }
    // Directed graphs surface the library's `Unsupported` error.
    Ok(BridgesOutput::Bridges(with_graph!(loaded, g => g.bridges())?))
}

/// Execute `adjg bridges`.
pub fn run_bridges(args: &BridgesArgs, ctx: &Context) -> anyhow::Result<()> {
    let loaded = ctx.load(&args.graph)?;
    let payload = analyse(&loaded, args)?;

    render_mode(ctx.output, &payload, render_text, render_pretty)
}

fn render_text(p: &BridgesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    match p {
        BridgesOutput::Bridges(edges) => {
            for (u, v) in edges {
                writeln!(w, "{u} {v}")?;
            }
            Ok(())
        }
        BridgesOutput::ArticulationPoints(points) => writeln!(w, "{}", join(points)),
    }
}

fn render_pretty(p: &BridgesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    match p {
        BridgesOutput::Bridges(edges) => {
            pretty_section(w, &format!("Bridges ({})", edges.len()))?;
            for (u, v) in edges {
                writeln!(w, "  {u} -- {v}")?;
            }
        }
        BridgesOutput::ArticulationPoints(points) => {
            pretty_section(w, &format!("Articulation points ({})", points.len()))?;
            for v in points {
                writeln!(w, "  {v}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use adjgraph_core::{DirectedGraph, GraphError, UndirectedGraph};

    fn args(articulation_points: bool) -> BridgesArgs {
        BridgesArgs {
            graph: GraphFile {
                path: "g.txt".into(),
            },
            articulation_points,
        }
    }

    #[test]
    fn undirected_path_is_all_bridges() {
        let loaded = LoadedGraph::Undirected(UndirectedGraph::from_edges([(1, 2), (2, 3)]));

        let BridgesOutput::Bridges(edges) = analyse(&loaded, &args(false)).expect("undirected")
        else {
            panic!("expected bridges");
        };
        assert_eq!(edges, vec![(2, 3), (1, 2)]);

        let BridgesOutput::ArticulationPoints(points) =
            analyse(&loaded, &args(true)).expect("undirected")
        else {
            panic!("expected articulation points");
        };
        assert_eq!(points, vec![2]);
    }

    #[test]
    fn directed_graphs_are_rejected() {
        let loaded = LoadedGraph::Directed(DirectedGraph::from_edges([(1, 2)]));

        let err = analyse(&loaded, &args(false)).expect_err("directed bridges");
        assert!(matches!(
            err.downcast_ref::<GraphError>(),
            Some(GraphError::Unsupported { .. })
        ));
        assert!(analyse(&loaded, &args(true)).is_err());
    }
}
