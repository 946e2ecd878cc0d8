// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # devpart
//!
//! Command-line interface for the device-aware graph partitioner.
//!
//! ## Usage
//! ```bash
//! # Partition a graph manifest
//! devpart partition --graph ./graphs/resnet.json --level greedy --out clusters.json
//!
//! # Inspect a graph: nodes, edges, device breakdown
//! devpart inspect --graph ./graphs/resnet.json
//! ```

mod commands;
mod config;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "devpart",
    about = "Device-aware DAG partitioner: fuses same-device nodes into acyclic clusters",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (overrides CLI arguments).
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Partition a graph manifest into device clusters.
    Partition {
        /// Path to the graph manifest (JSON).
        #[arg(short, long)]
        graph: std::path::PathBuf,

        /// Optimization level: none, greedy, optimal.
        #[arg(short, long, default_value = "greedy")]
        level: String,

        /// Write the clustering as JSON to this path.
        #[arg(short, long)]
        out: Option<std::path::PathBuf>,
    },

    /// Inspect a graph: print structure and device breakdown.
    Inspect {
        /// Path to the graph manifest (JSON).
        #[arg(short, long)]
        graph: std::path::PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    // A config file, when given, overrides the matching flags.
    let file_config = cli
        .config
        .as_deref()
        .map(config::CliConfig::from_file)
        .transpose()?;

    match cli.command {
        Commands::Partition { graph, level, out } => {
            let (graph, level, out) = match file_config {
                Some(cfg) => cfg.merge(graph, level, out),
                None => (graph, level, out),
            };
            commands::partition::execute(graph, level, out)
        }
        Commands::Inspect { graph } => commands::inspect::execute(graph),
    }
}
