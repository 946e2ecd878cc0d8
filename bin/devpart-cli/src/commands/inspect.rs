// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `devpart inspect` command: display graph structure and device breakdown.

use graph_ir::GraphLoader;
use std::collections::BTreeMap;
use std::path::PathBuf;

pub fn execute(graph: PathBuf) -> anyhow::Result<()> {
    let tagged = GraphLoader::load(&graph).map_err(|e| {
        anyhow::anyhow!("failed to load graph from '{}': {e}", graph.display())
    })?;
    tracing::debug!(graph = %tagged.name, "manifest loaded");

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              devpart · Graph Inspector               ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
    println!("  Graph: {}", tagged.name);
    println!("  Structure: {}", tagged.graph.summary());
    println!("  Sources: {:?}", tagged.graph.source_nodes());
    if let Some(order) = &tagged.supplied_order {
        println!("  Supplied topological order: {} entries", order.len());
    }
    println!();

    // ── Device breakdown ───────────────────────────────────────
    let mut per_device: BTreeMap<&str, usize> = BTreeMap::new();
    for node in tagged.graph.node_ids() {
        *per_device
            .entry(tagged.devices.tag_of(node).as_str())
            .or_default() += 1;
    }

    println!("  {:<12} {:>6}", "Device", "Nodes");
    println!("  {}", "-".repeat(20));
    for (device, count) in &per_device {
        println!("  {device:<12} {count:>6}");
    }
    println!();

    // ── Per-node detail ────────────────────────────────────────
    println!("  {:<6} {:<12} {}", "Node", "Device", "Successors");
    println!("  {}", "-".repeat(40));
    for node in tagged.graph.node_ids() {
        println!(
            "  {:<6} {:<12} {:?}",
            node,
            tagged.devices.tag_of(node).as_str(),
            tagged.graph.successors(node),
        );
    }

    Ok(())
}
