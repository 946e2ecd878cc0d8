// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Graph loading from a JSON manifest file.
//!
//! The loader turns a [`GraphManifest`] into the in-memory bundle the
//! partitioner consumes: the [`DirectedGraph`], the [`DeviceMap`], and
//! the optional externally supplied topological order. The order is
//! carried through unvalidated; the partitioner validates it against
//! the live edge set before its order-based pass.

use crate::{DeviceMap, DirectedGraph, GraphError, GraphManifest, NodeId};
use std::collections::HashMap;
use std::path::Path;

/// A loaded, device-tagged computation graph ready for partitioning.
#[derive(Debug, Clone)]
pub struct TaggedGraph {
    /// Human-readable graph name from the manifest.
    pub name: String,
    /// The node/edge structure.
    pub graph: DirectedGraph,
    /// Per-node device assignment.
    pub devices: DeviceMap,
    /// Caller-supplied topological order, if any (not yet validated).
    pub supplied_order: Option<Vec<NodeId>>,
}

/// Loads a device-tagged graph from a JSON manifest.
///
/// # Example
/// ```no_run
/// use graph_ir::GraphLoader;
/// use std::path::Path;
///
/// let tagged = GraphLoader::load(Path::new("./graphs/resnet.json")).unwrap();
/// println!("loaded '{}': {}", tagged.name, tagged.graph.summary());
/// ```
pub struct GraphLoader;

impl GraphLoader {
    /// Loads and validates a graph from the given manifest file.
    pub fn load(path: &Path) -> Result<TaggedGraph, GraphError> {
        let json = std::fs::read_to_string(path)?;
        let manifest = GraphManifest::from_json(&json)?;
        tracing::debug!(
            graph = %manifest.name,
            nodes = manifest.nodes.len(),
            "parsed graph manifest",
        );
        Self::from_manifest(manifest)
    }

    /// Builds the graph bundle from an already-parsed manifest.
    pub fn from_manifest(manifest: GraphManifest) -> Result<TaggedGraph, GraphError> {
        let successor_lists = manifest
            .nodes
            .iter()
            .map(|n| (n.id, n.successors.clone()));
        let graph = DirectedGraph::build(successor_lists)?;

        let tags: HashMap<NodeId, _> = manifest
            .nodes
            .iter()
            .map(|n| (n.id, n.device.clone()))
            .collect();
        let devices = DeviceMap::build(&graph, tags)?;

        Ok(TaggedGraph {
            name: manifest.name,
            graph,
            devices,
            supplied_order: manifest.topological_order,
        })
    }
}
