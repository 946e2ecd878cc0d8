// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Mutable cluster state: the partition under construction.
//!
//! Two parallel structures that must always agree: a label map
//! (node → cluster) and a member map (cluster → ordered node list).
//! Every mutation goes through [`ClusterState::fuse`] or
//! [`ClusterState::try_fuse`], which keep the two in lockstep; the
//! partition invariant — every node in exactly one member list — holds
//! at every point a caller can observe.
//!
//! A cluster's label is always one of its member node ids, and merges
//! always survive under the numerically smaller label, so labels stay
//! stable and deterministic across runs.

use graph_ir::{DirectedGraph, NodeId};
use std::collections::{BTreeMap, HashMap};

/// Integer label of a cluster; equal to its representative node id.
pub type ClusterId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

/// The mutable partition of a graph's nodes into device clusters.
///
/// Starts as the identity partition (one singleton cluster per node)
/// and only ever shrinks: clusters merge, never split.
#[derive(Debug, Clone)]
pub struct ClusterState<'g> {
    graph: &'g DirectedGraph,
    /// node id → cluster label.
    labels: BTreeMap<NodeId, ClusterId>,
    /// cluster label → members, stable first-seen order, deduplicated.
    members: BTreeMap<ClusterId, Vec<NodeId>>,
}

impl<'g> ClusterState<'g> {
    /// Creates the identity partition over `graph`.
    pub fn new(graph: &'g DirectedGraph) -> Self {
        let labels: BTreeMap<NodeId, ClusterId> =
            graph.node_ids().map(|n| (n, n)).collect();
        let members: BTreeMap<ClusterId, Vec<NodeId>> =
            graph.node_ids().map(|n| (n, vec![n])).collect();
        Self {
            graph,
            labels,
            members,
        }
    }

    /// Returns the cluster label of `node`.
    ///
    /// # Panics
    /// Panics for ids that never belonged to the graph.
    pub fn label_of(&self, node: NodeId) -> ClusterId {
        self.labels[&node]
    }

    /// Returns the members of `cluster` in stable first-seen order
    /// (empty for absorbed or unknown labels).
    pub fn members_of(&self, cluster: ClusterId) -> &[NodeId] {
        self.members.get(&cluster).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the current number of clusters.
    pub fn num_clusters(&self) -> usize {
        self.members.len()
    }

    /// Iterates over the live cluster labels in ascending order.
    pub fn cluster_ids(&self) -> impl Iterator<Item = ClusterId> + '_ {
        self.members.keys().copied()
    }

    /// Returns the full node → cluster label map.
    pub fn labels(&self) -> &BTreeMap<NodeId, ClusterId> {
        &self.labels
    }

    /// Clusters reachable from `cluster` by exactly one cross-cluster
    /// edge, deduplicated, in discovery order. Intra-cluster edges are
    /// excluded.
    pub fn successor_clusters(&self, cluster: ClusterId) -> Vec<ClusterId> {
        let mut result = Vec::new();
        for &member in self.members_of(cluster) {
            for &succ in self.graph.successors(member) {
                let target = self.labels[&succ];
                if target != cluster && !result.contains(&target) {
                    result.push(target);
                }
            }
        }
        result
    }

    /// Checks that the cluster graph is acyclic.
    ///
    /// Runs DFS with an explicit recursion stack over the cluster graph,
    /// starting from every cluster that contains a source node of the
    /// underlying graph. Returns `false` the instant a cluster already
    /// on the stack is revisited (back edge ⇒ cycle).
    pub fn is_acyclic(&self) -> bool {
        let mut marks: HashMap<ClusterId, Mark> =
            self.cluster_ids().map(|c| (c, Mark::Unvisited)).collect();
        // (cluster, its successor clusters, next index to visit)
        let mut stack: Vec<(ClusterId, Vec<ClusterId>, usize)> = Vec::new();

        for &source in self.graph.source_nodes() {
            let start = self.labels[&source];
            if marks[&start] != Mark::Unvisited {
                continue;
            }
            marks.insert(start, Mark::OnStack);
            stack.push((start, self.successor_clusters(start), 0));

            while let Some((cluster, succs, next)) = stack.last_mut() {
                if *next < succs.len() {
                    let child = succs[*next];
                    *next += 1;
                    match marks[&child] {
                        Mark::Unvisited => {
                            marks.insert(child, Mark::OnStack);
                            stack.push((child, self.successor_clusters(child), 0));
                        }
                        Mark::OnStack => return false,
                        Mark::Done => {}
                    }
                } else {
                    marks.insert(*cluster, Mark::Done);
                    stack.pop();
                }
            }
        }

        true
    }

    /// Unconditionally merges two clusters.
    ///
    /// The numerically larger label is absorbed into the smaller: its
    /// members are relabeled and appended to the survivor's member list,
    /// and its map entry is removed. No legality check is performed —
    /// that is the caller's responsibility (see [`ClusterState::try_fuse`]).
    pub fn fuse(&mut self, a: ClusterId, b: ClusterId) {
        if a == b {
            return;
        }
        let keep = a.min(b);
        let absorbed = a.max(b);
        debug_assert!(self.members.contains_key(&keep), "fuse of dead cluster {keep}");

        let moved = self.members.remove(&absorbed).unwrap_or_default();
        debug_assert!(!moved.is_empty(), "fuse of dead cluster {absorbed}");

        for &node in &moved {
            self.labels.insert(node, keep);
        }
        self.members.entry(keep).or_default().extend(moved);
    }

    /// Merges two clusters only if the cluster graph stays acyclic.
    ///
    /// Snapshots the affected state, performs the merge, and tests
    /// acyclicity: on failure the snapshot is restored exactly and
    /// `false` is returned. Atomic — no caller ever observes an
    /// intermediate state.
    pub fn try_fuse(&mut self, a: ClusterId, b: ClusterId) -> bool {
        if a == b {
            return true;
        }
        let keep = a.min(b);
        let absorbed = a.max(b);

        // Snapshot only what fuse touches: the survivor's member count
        // and the absorbed cluster's member list (whose label entries
        // all read `absorbed` before the merge).
        let keep_len = self.members_of(keep).len();
        let moved: Vec<NodeId> = self.members_of(absorbed).to_vec();

        self.fuse(a, b);
        if self.is_acyclic() {
            return true;
        }

        if let Some(survivor) = self.members.get_mut(&keep) {
            survivor.truncate(keep_len);
        }
        for &node in &moved {
            self.labels.insert(node, absorbed);
        }
        self.members.insert(absorbed, moved);
        debug_assert_eq!(self.members_of(keep).len(), keep_len, "rollback drift");
        false
    }
}
