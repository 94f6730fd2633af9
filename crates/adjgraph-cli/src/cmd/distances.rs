//! `adjg distances`: Single-source distances to every reachable vertex.

use std::collections::BTreeMap;
use std::io::Write;

use adjgraph_core::algo::{ShortestPaths, TopologicalSort};
use adjgraph_core::{Distance, Graph, VertexId};
use clap::{Args, ValueEnum};
use serde::Serialize;

use super::{Context, GraphFile};
use crate::input::with_graph;
use crate::output::{pretty_section, render_mode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceAlgorithm {
    /// Non-negative weights.
    Dijkstra,
    /// Any weights; negative cycles yield `-inf`.
    BellmanFord,
    /// Acyclic graphs only, any weights; cycles are not detected.
    Dag,
}

#[derive(Args, Debug)]
pub struct DistancesArgs {
    #[command(flatten)]
    pub graph: GraphFile,

    #[arg(value_name = "SOURCE")]
    pub source: VertexId,

    #[arg(long, value_enum, default_value = "dijkstra")]
    pub algorithm: DistanceAlgorithm,
}

#[derive(Debug, Serialize)]
struct DistanceRow {
    vertex: VertexId,
    distance: Distance,
}

#[derive(Debug, Serialize)]
struct DistancesOutput {
    source: VertexId,
    algorithm: DistanceAlgorithm,
    negative_cycle: bool,
    distances: Vec<DistanceRow>,
}

fn rows(map: BTreeMap<VertexId, Distance>) -> Vec<DistanceRow> {
    map.into_iter()
        .map(|(vertex, distance)| DistanceRow { vertex, distance })
        .collect()
}

fn finite(map: BTreeMap<VertexId, f64>) -> BTreeMap<VertexId, Distance> {
    map.into_iter().map(|(v, d)| (v, Distance::Finite(d))).collect()
}

fn compute<G: Graph>(graph: &G, args: &DistancesArgs) -> adjgraph_core::Result<DistancesOutput> {
    let distances = match args.algorithm {
        DistanceAlgorithm::Dijkstra => finite(graph.dijkstra(args.source)?),
        DistanceAlgorithm::BellmanFord => graph.bellman_ford(args.source)?,
        DistanceAlgorithm::Dag => {
            finite(graph.topological_order_single_source_shortest_path(args.source)?)
        }
    };

    Ok(DistancesOutput {
        source: args.source,
        algorithm: args.algorithm,
        negative_cycle: distances.values().any(|d| d.is_negative_infinity()),
        distances: rows(distances),
    })
}

/// Execute `adjg distances`.
pub fn run_distances(args: &DistancesArgs, ctx: &Context) -> anyhow::Result<()> {
    let loaded = ctx.load(&args.graph)?;
    let payload = with_graph!(&loaded, g => compute(g, args))?;

    render_mode(ctx.output, &payload, render_text, render_pretty)
}

fn shown(distance: Distance) -> String {
    match distance {
        Distance::Finite(d) => d.to_string(),
        Distance::NegativeInfinity => "-inf".to_string(),
    }
}

fn render_text(p: &DistancesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &p.distances {
        writeln!(w, "{} {}", row.vertex, shown(row.distance))?;
    }
    Ok(())
}

fn render_pretty(p: &DistancesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Distances from {}", p.source))?;
    for row in &p.distances {
        writeln!(w, "{:>8}  {}", row.vertex, shown(row.distance))?;
    }
    if p.negative_cycle {
        writeln!(w, "\nwarning: a negative cycle is reachable from {}", p.source)?;
    }
    Ok(())
}
