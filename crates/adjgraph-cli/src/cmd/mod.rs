pub mod bridges;
pub mod completions;
pub mod components;
pub mod distances;
pub mod metrics;
pub mod path;
pub mod summary;
pub mod topo;
pub mod traverse;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::input::{self, LoadOptions, LoadedGraph};
use crate::output::OutputMode;

/// Resolved global settings handed to every command.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub output: OutputMode,
    pub load: LoadOptions,
}

/// The graph file argument shared by every analysis command.
#[derive(Args, Debug, Clone)]
pub struct GraphFile {
    /// Graph file (`.json`, or text lines of `u v [weight]`).
    #[arg(value_name = "GRAPH")]
    pub path: PathBuf,
}

impl Context {
    pub fn load(&self, file: &GraphFile) -> Result<LoadedGraph> {
        input::load(&file.path, self.load)
    }
}
