//! `adjg metrics`: Eccentricity, radius, diameter and center.

use std::io::Write;

use adjgraph_core::algo::Eccentricity;
use adjgraph_core::{Graph, VertexId};
use clap::Args;
use serde::Serialize;

use super::{Context, GraphFile};
use crate::input::with_graph;
use crate::output::{join, pretty_kv, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct MetricsArgs {
    #[command(flatten)]
    pub graph: GraphFile,
}

/// JSON cannot carry infinity, so unbounded values serialize as `null`.
#[derive(Debug, Serialize)]
struct MetricsOutput {
    radius: Option<f64>,
    diameter: Option<f64>,
    central_vertices: Vec<VertexId>,
    eccentricities: Vec<EccentricityRow>,
}

#[derive(Debug, Serialize)]
struct EccentricityRow {
    vertex: VertexId,
    eccentricity: Option<f64>,
}

fn bounded(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn measure<G: Graph>(graph: &G) -> MetricsOutput {
    MetricsOutput {
        radius: graph.radius().and_then(bounded),
        diameter: graph.diameter().and_then(bounded),
        central_vertices: graph.central_vertices(),
        eccentricities: graph
            .eccentricities()
            .into_iter()
            .map(|(vertex, e)| EccentricityRow {
                vertex,
                eccentricity: bounded(e),
            })
            .collect(),
    }
}

/// Execute `adjg metrics`.
pub fn run_metrics(args: &MetricsArgs, ctx: &Context) -> anyhow::Result<()> {
    let loaded = ctx.load(&args.graph)?;
    let payload = with_graph!(&loaded, g => measure(g));

    render_mode(ctx.output, &payload, render_text, render_pretty)
}

fn shown(value: Option<f64>) -> String {
    value.map_or_else(|| "inf".to_string(), |v| v.to_string())
}

fn render_text(p: &MetricsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        w,
        "radius={} diameter={} center={}",
        shown(p.radius),
        shown(p.diameter),
        join(&p.central_vertices)
    )
}

fn render_pretty(p: &MetricsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Eccentricity metrics")?;
    pretty_kv(w, "radius", shown(p.radius))?;
    pretty_kv(w, "diameter", shown(p.diameter))?;
    pretty_kv(w, "center", join(&p.central_vertices))?;
    writeln!(w)?;
    for row in &p.eccentricities {
        writeln!(w, "{:>8}  {}", row.vertex, shown(row.eccentricity))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use adjgraph_core::{DirectedGraph, UndirectedGraph};

    #[test]
    fn star_center_is_hub() {
        let graph: UndirectedGraph = UndirectedGraph::from_edges([(0, 1), (0, 2), (0, 3)]);
        let out = measure(&graph);
        assert_eq!(out.radius, Some(1.0));
        assert_eq!(out.diameter, Some(2.0));
        assert_eq!(out.central_vertices, vec![0]);
    }

    #[test]
    fn unreachable_pairs_make_diameter_unbounded() {
        let graph: DirectedGraph = DirectedGraph::from_edges([(1, 2)]);
        let out = measure(&graph);
        assert_eq!(out.radius, Some(1.0));
        assert_eq!(out.diameter, None);

        let mut buf = Vec::new();
        render_text(&out, &mut buf).expect("write");
        assert_eq!(
            String::from_utf8(buf).expect("utf8"),
            "radius=1 diameter=inf center=1\n"
        );
    }
}
