#![forbid(unsafe_code)]

mod cmd;
mod config;
mod input;
mod output;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "adjg: run graph algorithms over edge-list files",
    long_about = None
)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output (same as `--format json`).
    #[arg(long, global = true)]
    json: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Treat the graph as undirected, whatever the file or config says.
    #[arg(long, global = true, conflicts_with = "directed")]
    undirected: bool,

    /// Treat the graph as directed, whatever the file or config says.
    #[arg(long, global = true)]
    directed: bool,

    /// Config file to use instead of `./adjg.toml` / the user config.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    const fn direction_override(&self) -> Option<bool> {
        if self.undirected {
            Some(false)
        } else if self.directed {
            Some(true)
        } else {
            None
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Inspect",
        about = "Show size, shape and fingerprint",
        after_help = "EXAMPLES:\n    # Summarize a text edge list\n    adjg summary graph.txt\n\n    # Emit machine-readable output\n    adjg summary graph.json --json"
    )]
    Summary(cmd::summary::SummaryArgs),

    #[command(
        next_help_heading = "Traverse",
        about = "List vertices or edge crossings in BFS/DFS order",
        after_help = "EXAMPLES:\n    # Depth-first from vertex 3\n    adjg traverse graph.txt --order dfs --start 3\n\n    # Edge crossings of a BFS\n    adjg traverse graph.txt --edges"
    )]
    Traverse(cmd::traverse::TraverseArgs),

    #[command(
        next_help_heading = "Paths",
        about = "Find one shortest path",
        after_help = "EXAMPLES:\n    # Fewest hops\n    adjg path graph.txt 0 15\n\n    # Cheapest path with negative weights\n    adjg path graph.txt 1 4 --algorithm bellman-ford"
    )]
    Path(cmd::path::PathArgs),

    #[command(
        next_help_heading = "Paths",
        about = "Distances from one source to every reachable vertex",
        after_help = "EXAMPLES:\n    # Dijkstra\n    adjg distances graph.txt 0\n\n    # DAG relaxation\n    adjg distances dag.txt 0 --algorithm dag"
    )]
    Distances(cmd::distances::DistancesArgs),

    #[command(
        next_help_heading = "Structure",
        about = "Strongly connected / connected components",
        after_help = "EXAMPLES:\n    adjg components graph.txt\n    adjg components graph.txt --undirected --json"
    )]
    Components(cmd::components::ComponentsArgs),

    #[command(
        next_help_heading = "Structure",
        about = "Bridges or articulation points (undirected only)",
        after_help = "EXAMPLES:\n    adjg bridges graph.txt --undirected\n    adjg bridges graph.txt --undirected --articulation-points"
    )]
    Bridges(cmd::bridges::BridgesArgs),

    #[command(
        next_help_heading = "Structure",
        about = "Topological order",
        after_help = "EXAMPLES:\n    adjg topo dag.txt\n    adjg topo dag.txt --backwards --start 7"
    )]
    Topo(cmd::topo::TopoArgs),

    #[command(
        next_help_heading = "Inspect",
        about = "Eccentricity, radius, diameter and center"
    )]
    Metrics(cmd::metrics::MetricsArgs),

    #[command(
        next_help_heading = "Shell",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    adjg completions bash\n    adjg completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("ADJG_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "adjgraph=debug,adjg=debug,info"
        } else {
            "adjgraph=info,warn"
        })
    });

    let format = env::var("ADJG_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays parseable.
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli, output: OutputMode, config: &config::Config) -> anyhow::Result<()> {
    let ctx = cmd::Context {
        output,
        load: input::LoadOptions {
            directed_override: cli.direction_override(),
            default_directed: config.graph.directed,
        },
    };

    match &cli.command {
        Commands::Summary(args) => cmd::summary::run_summary(args, &ctx),
        Commands::Traverse(args) => cmd::traverse::run_traverse(args, &ctx),
        Commands::Path(args) => cmd::path::run_path(args, &ctx),
        Commands::Distances(args) => cmd::distances::run_distances(args, &ctx),
        Commands::Components(args) => cmd::components::run_components(args, &ctx),
        Commands::Bridges(args) => cmd::bridges::run_bridges(args, &ctx),
        Commands::Topo(args) => cmd::topo::run_topo(args, &ctx),
        Commands::Metrics(args) => cmd::metrics::run_metrics(args, &ctx),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args, &mut command, &mut std::io::stdout())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let (output, result) = match config::load(cli.config.as_deref(), &cwd) {
        Ok(config) => {
            let output =
                output::resolve_output_mode(cli.format, cli.json, config.output.format.as_deref());
            debug!(?output, "resolved output mode");
            (output, run(&cli, output, &config))
        }
        Err(err) => (
            output::resolve_output_mode(cli.format, cli.json, None),
            Err(err),
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if output::render_error(output, &CliError::from(&err)).is_err() {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_parses_after_subcommand() {
        let cli = Cli::parse_from(["adjg", "summary", "g.txt", "--json"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Summary(_)));
    }

    #[test]
    fn format_flag_parses() {
        let cli = Cli::parse_from(["adjg", "--format", "text", "metrics", "g.txt"]);
        assert_eq!(cli.format, Some(OutputMode::Text));
    }

    #[test]
    fn direction_flags() {
        let cli = Cli::parse_from(["adjg", "components", "g.txt", "--undirected"]);
        assert_eq!(cli.direction_override(), Some(false));

        let cli = Cli::parse_from(["adjg", "--directed", "components", "g.txt"]);
        assert_eq!(cli.direction_override(), Some(true));

        let cli = Cli::parse_from(["adjg", "components", "g.txt"]);
        assert_eq!(cli.direction_override(), None);

        assert!(
            Cli::try_parse_from(["adjg", "--directed", "--undirected", "components", "g.txt"])
                .is_err()
        );
    }

    #[test]
    fn all_subcommands_listed() {
        let subcommands = [
            vec!["adjg", "summary", "g.txt"],
            vec!["adjg", "traverse", "g.txt", "--order", "dfs-recursive", "--edges"],
            vec!["adjg", "path", "g.txt", "0", "15", "--algorithm", "bellman-ford"],
            vec!["adjg", "distances", "g.txt", "0", "--algorithm", "dag"],
            vec!["adjg", "components", "g.txt"],
            vec!["adjg", "bridges", "g.txt", "--articulation-points"],
            vec!["adjg", "topo", "g.txt", "--start", "3", "--backwards"],
            vec!["adjg", "metrics", "g.txt"],
            vec!["adjg", "completions", "bash"],
        ];
        for args in &subcommands {
            let result = Cli::try_parse_from(args.iter());
            assert!(
                result.is_ok(),
                "Failed to parse: {:?} error: {:?}",
                args,
                result.err()
            );
        }
    }

    #[test]
    fn negative_vertex_ids_are_accepted_as_positionals() {
        let cli = Cli::try_parse_from(["adjg", "path", "g.txt", "--", "-1", "2"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
