// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Directed computation graph over stable integer node ids.
//!
//! The graph is stored as successor lists; the predecessor map and the
//! source-node set are derived in a single O(V+E) scan at construction.
//! Nodes and edges are fixed for the lifetime of the graph — the
//! partitioner mutates its own cluster state, never the graph.

use crate::GraphError;
use std::collections::BTreeMap;
use std::fmt;

/// Stable integer identifier of one computation node.
pub type NodeId = usize;

/// Immutable directed graph: successor lists plus derived reverse adjacency.
///
/// Every node must have an explicit successor-list entry, even if empty.
/// An edge pointing at an id with no entry is rejected at construction
/// ([`GraphError::UnknownNode`]) rather than silently materializing a
/// phantom node.
#[derive(Debug, Clone)]
pub struct DirectedGraph {
    /// Forward adjacency, deduplicated, insertion order preserved.
    successors: BTreeMap<NodeId, Vec<NodeId>>,
    /// Reverse adjacency, derived at build time.
    predecessors: BTreeMap<NodeId, Vec<NodeId>>,
    /// Nodes with no predecessors, ascending id order.
    sources: Vec<NodeId>,
    /// Total edge count after deduplication.
    num_edges: usize,
}

impl DirectedGraph {
    /// Builds a graph from per-node successor lists.
    ///
    /// Duplicate edges in the input are tolerated and deduplicated.
    /// Fails fast on any edge whose target has no successor-list entry.
    pub fn build(
        successor_lists: impl IntoIterator<Item = (NodeId, Vec<NodeId>)>,
    ) -> Result<Self, GraphError> {
        let mut successors: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
        for (node, succ) in successor_lists {
            let entry = successors.entry(node).or_default();
            for s in succ {
                if !entry.contains(&s) {
                    entry.push(s);
                }
            }
        }

        let mut predecessors: BTreeMap<NodeId, Vec<NodeId>> =
            successors.keys().map(|&n| (n, Vec::new())).collect();
        let mut num_edges = 0;

        for (&from, succ) in &successors {
            for &to in succ {
                let preds = predecessors
                    .get_mut(&to)
                    .ok_or(GraphError::UnknownNode { from, to })?;
                preds.push(from);
                num_edges += 1;
            }
        }

        let sources = predecessors
            .iter()
            .filter(|(_, preds)| preds.is_empty())
            .map(|(&n, _)| n)
            .collect();

        Ok(Self {
            successors,
            predecessors,
            sources,
            num_edges,
        })
    }

    /// Returns the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.successors.len()
    }

    /// Returns the number of (deduplicated) edges.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Returns `true` if `node` exists in the graph.
    pub fn contains(&self, node: NodeId) -> bool {
        self.successors.contains_key(&node)
    }

    /// Iterates over all node ids in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.successors.keys().copied()
    }

    /// Returns the direct successors of `node` (empty for unknown ids).
    pub fn successors(&self, node: NodeId) -> &[NodeId] {
        self.successors.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the direct predecessors of `node` (empty for unknown ids).
    pub fn predecessors(&self, node: NodeId) -> &[NodeId] {
        self.predecessors
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the nodes with no predecessors, in ascending id order.
    pub fn source_nodes(&self) -> &[NodeId] {
        &self.sources
    }

    /// Returns a human-readable one-line summary.
    pub fn summary(&self) -> String {
        format!(
            "{} nodes, {} edges, {} sources",
            self.num_nodes(),
            self.num_edges(),
            self.sources.len(),
        )
    }
}

impl fmt::Display for DirectedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DirectedGraph ({}):", self.summary())?;
        for (&node, succ) in &self.successors {
            writeln!(f, "  {node} -> {succ:?}")?;
        }
        Ok(())
    }
}
