// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for graph construction and manifest loading.

use crate::NodeId;

/// Errors that can occur when building or loading a computation graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// An edge references a node id with no explicit adjacency entry.
    ///
    /// Phantom nodes are rejected at construction rather than silently
    /// materialized as isolated nodes, so graph-construction bugs
    /// surface immediately instead of as a wrong partition much later.
    #[error("edge {from} -> {to} references unknown node {to}")]
    UnknownNode { from: NodeId, to: NodeId },

    /// The manifest declares the same node id more than once.
    #[error("node {0} is declared more than once")]
    DuplicateNode(NodeId),

    /// The device map does not cover every node in the graph.
    #[error("node {0} has no device tag")]
    MissingTag(NodeId),

    /// The node graph contains a cycle, so no topological order exists.
    #[error("graph is cyclic: no topological order exists (detected at node {0})")]
    Cyclic(NodeId),

    /// A caller-supplied topological order is inconsistent with the graph.
    #[error("supplied topological order is invalid: {0}")]
    InvalidOrder(String),

    /// The graph manifest file could not be read.
    #[error("failed to read graph manifest: {0}")]
    ManifestRead(#[from] std::io::Error),

    /// The manifest JSON is malformed.
    #[error("failed to parse graph manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),
}
