//! `adjg components`: Strongly connected (directed) or connected
//! (undirected) components.

use std::io::Write;

use adjgraph_core::VertexId;
use clap::Args;
use serde::Serialize;

use super::{Context, GraphFile};
use crate::input::LoadedGraph;
use crate::output::{join, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct ComponentsArgs {
    #[command(flatten)]
    pub graph: GraphFile,
}

#[derive(Debug, Serialize)]
struct ComponentsOutput {
    directed: bool,
    count: usize,
    components: Vec<Vec<VertexId>>,
}

fn components(loaded: &LoadedGraph) -> ComponentsOutput {
    let components = match loaded {
        LoadedGraph::Directed(g) => g.tarjan_scc_list(),
        LoadedGraph::Undirected(g) => g.scc_list(),
    };
    ComponentsOutput {
        directed: loaded.is_directed(),
        count: components.len(),
        components,
    }
}

/// Execute `adjg components`.
pub fn run_components(args: &ComponentsArgs, ctx: &Context) -> anyhow::Result<()> {
    let loaded = ctx.load(&args.graph)?;
    let payload = components(&loaded);

    render_mode(ctx.output, &payload, render_text, render_pretty)
}

fn render_text(p: &ComponentsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for members in &p.components {
        writeln!(w, "{}", join(members))?;
    }
    Ok(())
}

fn render_pretty(p: &ComponentsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let kind = if p.directed {
        "Strongly connected components"
    } else {
        "Connected components"
    };
    pretty_section(w, &format!("{kind} ({})", p.count))?;
    for (index, members) in p.components.iter().enumerate() {
        writeln!(w, "{index:>4}  [{}]  {}", members.len(), join(members))?;
    }
    Ok(())
}
