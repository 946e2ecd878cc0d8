// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The two-pass greedy partitioner.
//!
//! Pass A walks a topological order and unconditionally fuses adjacent
//! same-device pairs: two nodes adjacent in a valid topological order
//! of the whole graph cannot be merged into a cycle, because the order
//! already totally orders every dependency chain. Pass B then sweeps
//! the graph breadth-first and attempts every same-device edge with a
//! legality-checked [`ClusterState::try_fuse`] — those pairs need not
//! be topologically adjacent, so an unchecked merge could close a
//! cycle through an unrelated branch.
//!
//! Pass A is O(V); Pass B is O(V·(V+E)) worst case, since each
//! `try_fuse` re-runs the acyclicity DFS.

use crate::{Clustering, ClusterState, PartitionError};
use graph_ir::{topological_order, validate_order, DeviceMap, DirectedGraph, NodeId};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

/// Requested optimization level for a partitioning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptLevel {
    /// Identity partition, one cluster per node. Baseline/debug level.
    None,
    /// Two-pass greedy fusion (Pass A then Pass B).
    Greedy,
    /// Globally optimal clustering. Not implemented; requesting it is a
    /// distinct fatal error, never a silent fallback to `Greedy`.
    Optimal,
}

impl OptLevel {
    /// The level's canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptLevel::None => "none",
            OptLevel::Greedy => "greedy",
            OptLevel::Optimal => "optimal",
        }
    }
}

impl fmt::Display for OptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(OptLevel::None),
            "greedy" => Ok(OptLevel::Greedy),
            "optimal" => Ok(OptLevel::Optimal),
            other => Err(format!(
                "unknown optimization level '{other}' (expected none, greedy, or optimal)",
            )),
        }
    }
}

/// Groups device-tagged nodes into the largest legal single-device
/// clusters, keeping the cluster-level graph acyclic throughout.
pub struct Partitioner<'g> {
    graph: &'g DirectedGraph,
    devices: &'g DeviceMap,
}

impl<'g> Partitioner<'g> {
    pub fn new(graph: &'g DirectedGraph, devices: &'g DeviceMap) -> Self {
        Self { graph, devices }
    }

    /// Runs the partitioner at the requested level.
    ///
    /// A caller-supplied topological order is validated against every
    /// edge before use; when absent, one is computed internally. Either
    /// path errors on a cyclic input graph.
    pub fn partition(
        &self,
        level: OptLevel,
        supplied_order: Option<&[NodeId]>,
    ) -> Result<Clustering, PartitionError> {
        let mut state = ClusterState::new(self.graph);

        match level {
            OptLevel::None => {
                tracing::info!(level = %level, "identity partition requested, skipping fusion");
            }
            OptLevel::Greedy => {
                let order = self.resolve_order(supplied_order)?;

                self.fuse_order_adjacent(&mut state, &order);
                tracing::debug!(
                    clusters = state.num_clusters(),
                    "order-based pass complete",
                );

                self.fuse_bfs_neighbors(&mut state);
                tracing::debug!(
                    clusters = state.num_clusters(),
                    "adjacency-based pass complete",
                );

                debug_assert!(state.is_acyclic(), "greedy fusion broke the cluster DAG");
            }
            OptLevel::Optimal => {
                return Err(PartitionError::UnsupportedLevel(level));
            }
        }

        let clustering = Clustering::from_state(level, &state);
        clustering.validate()?;
        Ok(clustering)
    }

    /// Validates the supplied order, or computes one internally.
    fn resolve_order(
        &self,
        supplied: Option<&[NodeId]>,
    ) -> Result<Vec<NodeId>, PartitionError> {
        match supplied {
            Some(order) => {
                validate_order(self.graph, order)?;
                Ok(order.to_vec())
            }
            None => Ok(topological_order(self.graph)?),
        }
    }

    /// Pass A: fuse pairs adjacent in the topological order.
    ///
    /// Unconditional merges; host-tagged nodes never fuse.
    fn fuse_order_adjacent(&self, state: &mut ClusterState, order: &[NodeId]) {
        for pair in order.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            let tag = self.devices.tag_of(prev);
            if tag.is_host() || tag != self.devices.tag_of(next) {
                continue;
            }
            state.fuse(state.label_of(prev), state.label_of(next));
        }
    }

    /// Pass B: BFS from every source, attempting each same-device edge
    /// with a legality-checked merge.
    ///
    /// Each node is enqueued and marked the first time any predecessor
    /// reaches it, so the traversal visits every reachable node once.
    fn fuse_bfs_neighbors(&self, state: &mut ClusterState) {
        // Node ids are sparse, so visited tracking is a set rather than
        // a dense id-indexed vector.
        let mut visited: HashSet<NodeId> = HashSet::with_capacity(self.graph.num_nodes());
        let mut queue: VecDeque<NodeId> = VecDeque::with_capacity(self.graph.num_nodes());

        for &source in self.graph.source_nodes() {
            visited.insert(source);
            queue.push_back(source);
        }

        while let Some(node) = queue.pop_front() {
            let tag = self.devices.tag_of(node);

            for &succ in self.graph.successors(node) {
                if !tag.is_host() && tag == self.devices.tag_of(succ) {
                    let merged = state.try_fuse(state.label_of(node), state.label_of(succ));
                    if !merged {
                        tracing::trace!(
                            from = node,
                            to = succ,
                            device = %tag,
                            "merge rejected: would close a cluster cycle",
                        );
                    }
                }
                if visited.insert(succ) {
                    queue.push_back(succ);
                }
            }
        }
    }
}
