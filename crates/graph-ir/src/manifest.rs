// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! JSON graph manifest parsing.
//!
//! The manifest describes a device-tagged computation graph as produced
//! by the upstream graph-construction stage.
//!
//! # Format
//! ```json
//! {
//!   "name": "resnet-block",
//!   "nodes": [
//!     { "id": 0, "device": "npu0", "successors": [1, 2] },
//!     { "id": 1, "device": "npu0", "successors": [3] },
//!     { "id": 2, "device": "host", "successors": [3] },
//!     { "id": 3, "device": "npu0", "successors": [] }
//!   ],
//!   "topological_order": [0, 1, 2, 3]
//! }
//! ```
//!
//! `topological_order` is optional. When present it is *not* trusted:
//! the loader hands it to the partitioner, which validates it against
//! every edge before use.

use crate::{DeviceTag, GraphError, NodeId};
use std::collections::BTreeSet;

/// Top-level graph manifest, deserialized from JSON.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GraphManifest {
    /// Human-readable graph name (e.g., `"resnet-block"`).
    pub name: String,
    /// Node declarations with device tags and successor edges.
    pub nodes: Vec<ManifestNode>,
    /// Optional externally computed topological order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topological_order: Option<Vec<NodeId>>,
}

/// A single node entry in the manifest.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ManifestNode {
    /// Stable integer node id.
    pub id: NodeId,
    /// Execution-target tag for this node.
    pub device: DeviceTag,
    /// Direct successor node ids.
    #[serde(default)]
    pub successors: Vec<NodeId>,
}

impl GraphManifest {
    /// Parses a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let manifest: Self = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Structural validation: no duplicate ids, no dangling successors.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut ids = BTreeSet::new();
        for node in &self.nodes {
            if !ids.insert(node.id) {
                return Err(GraphError::DuplicateNode(node.id));
            }
        }
        for node in &self.nodes {
            for &succ in &node.successors {
                if !ids.contains(&succ) {
                    return Err(GraphError::UnknownNode {
                        from: node.id,
                        to: succ,
                    });
                }
            }
        }
        Ok(())
    }
}
