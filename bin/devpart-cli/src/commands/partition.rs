// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `devpart partition` command: run the partitioner and report clusters.

use cluster_partitioner::OptLevel;
use graph_ir::GraphLoader;
use std::path::PathBuf;

pub fn execute(graph: PathBuf, level: String, out: Option<PathBuf>) -> anyhow::Result<()> {
    let level: OptLevel = level
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let tagged = GraphLoader::load(&graph).map_err(|e| {
        anyhow::anyhow!("failed to load graph from '{}': {e}", graph.display())
    })?;
    tracing::debug!(graph = %tagged.name, "manifest loaded");

    let clustering = cluster_partitioner::partition(&tagged, level)?;

    println!("Graph '{}': {}", tagged.name, tagged.graph.summary());
    println!("{}", clustering.summary());
    println!();
    println!("  {:<10} {:<8} {}", "Cluster", "Device", "Members");
    println!("  {}", "-".repeat(50));
    for (&cluster, members) in &clustering.clusters {
        let device = tagged.devices.tag_of(cluster);
        println!("  {:<10} {:<8} {:?}", cluster, device.as_str(), members);
    }

    if let Some(out) = out {
        let json = serde_json::to_string_pretty(&clustering)?;
        std::fs::write(&out, json)?;
        tracing::info!(path = %out.display(), "clustering written");
        println!();
        println!("Clustering written to '{}'", out.display());
    }

    Ok(())
}
