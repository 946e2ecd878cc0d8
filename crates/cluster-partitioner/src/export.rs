// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Clustering export: the artifact handed to code generation.
//!
//! A [`Clustering`] carries both the raw node → cluster label map and
//! its inversion, the cluster → ordered member-list map. Inversion is a
//! pure, total function of the label map; running it twice on the same
//! labels yields identical output, so downstream consumers can treat
//! the artifact as deterministic.

use crate::{ClusterId, ClusterState, OptLevel, PartitionError};
use graph_ir::NodeId;
use std::collections::BTreeMap;

/// The final partitioning result.
///
/// The contract between the partitioner and the (out-of-scope) kernel
/// generation stage: each cluster is an ordered, deduplicated list of
/// member node ids, keyed by the cluster's representative label.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Clustering {
    /// Optimization level that produced this clustering.
    pub level: OptLevel,
    /// Raw node id → cluster label map.
    pub labels: BTreeMap<NodeId, ClusterId>,
    /// Cluster label → member node ids, in original relative order.
    pub clusters: BTreeMap<ClusterId, Vec<NodeId>>,
}

impl Clustering {
    /// Inverts a label map into the cluster → member-list map.
    ///
    /// Nodes are grouped by label in their original relative order.
    pub fn from_labels(level: OptLevel, labels: &BTreeMap<NodeId, ClusterId>) -> Self {
        let mut clusters: BTreeMap<ClusterId, Vec<NodeId>> = BTreeMap::new();
        for (&node, &cluster) in labels {
            clusters.entry(cluster).or_default().push(node);
        }
        Self {
            level,
            labels: labels.clone(),
            clusters,
        }
    }

    /// Exports the final state of a partitioning run.
    pub fn from_state(level: OptLevel, state: &ClusterState) -> Self {
        Self::from_labels(level, state.labels())
    }

    /// Returns the cluster label of `node`, if the node exists.
    pub fn label_of(&self, node: NodeId) -> Option<ClusterId> {
        self.labels.get(&node).copied()
    }

    /// Returns the members of `cluster` (empty for unknown labels).
    pub fn members_of(&self, cluster: ClusterId) -> &[NodeId] {
        self.clusters
            .get(&cluster)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the number of clusters.
    pub fn num_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// Returns the number of nodes across all clusters.
    pub fn num_nodes(&self) -> usize {
        self.labels.len()
    }

    /// Consistency check over the exported artifact.
    ///
    /// - Every node appears in exactly one member list.
    /// - Each member's label entry points back at its cluster.
    /// - Each cluster's label equals one of its member ids.
    pub fn validate(&self) -> Result<(), PartitionError> {
        let total: usize = self.clusters.values().map(Vec::len).sum();
        if total != self.labels.len() {
            return Err(PartitionError::InvalidClustering(format!(
                "{} member entries for {} labeled nodes",
                total,
                self.labels.len(),
            )));
        }

        for (&cluster, members) in &self.clusters {
            if members.is_empty() {
                return Err(PartitionError::InvalidClustering(format!(
                    "cluster {cluster} is empty",
                )));
            }
            if !members.contains(&cluster) {
                return Err(PartitionError::InvalidClustering(format!(
                    "cluster {cluster} does not contain its representative",
                )));
            }
            for &node in members {
                if self.labels.get(&node) != Some(&cluster) {
                    return Err(PartitionError::InvalidClustering(format!(
                        "node {node} listed in cluster {cluster} but labeled {:?}",
                        self.labels.get(&node),
                    )));
                }
            }
        }

        Ok(())
    }

    /// Returns a human-readable one-line summary.
    pub fn summary(&self) -> String {
        let sizes: Vec<usize> = self.clusters.values().map(Vec::len).collect();
        let largest = sizes.iter().copied().max().unwrap_or(0);
        format!(
            "level {}: {} nodes in {} clusters, largest {}, sizes {:?}",
            self.level,
            self.num_nodes(),
            self.num_clusters(),
            largest,
            sizes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_labels() -> BTreeMap<NodeId, ClusterId> {
        // Clusters {0,1,3} and {2}.
        BTreeMap::from([(0, 0), (1, 0), (2, 2), (3, 0)])
    }

    #[test]
    fn test_inversion_groups_in_original_order() {
        let c = Clustering::from_labels(OptLevel::Greedy, &sample_labels());
        assert_eq!(c.members_of(0), &[0, 1, 3]);
        assert_eq!(c.members_of(2), &[2]);
        assert_eq!(c.num_clusters(), 2);
        assert_eq!(c.num_nodes(), 4);
    }

    #[test]
    fn test_export_is_deterministic() {
        let labels = sample_labels();
        let a = Clustering::from_labels(OptLevel::Greedy, &labels);
        let b = Clustering::from_labels(OptLevel::Greedy, &labels);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap(),
        );
    }

    #[test]
    fn test_validate_ok() {
        Clustering::from_labels(OptLevel::Greedy, &sample_labels())
            .validate()
            .unwrap();
    }

    #[test]
    fn test_validate_missing_representative() {
        let mut c = Clustering::from_labels(OptLevel::Greedy, &sample_labels());
        // Corrupt: relabel cluster 2's entry under a label that is not
        // a member.
        let members = c.clusters.remove(&2).unwrap();
        c.clusters.insert(7, members);
        c.labels.insert(2, 7);
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_count_mismatch() {
        let mut c = Clustering::from_labels(OptLevel::Greedy, &sample_labels());
        c.clusters.get_mut(&0).unwrap().push(9);
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_serialize_shape() {
        let c = Clustering::from_labels(OptLevel::None, &BTreeMap::from([(0, 0)]));
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["level"], "none");
        assert_eq!(json["clusters"]["0"][0], 0);
    }

    #[test]
    fn test_summary() {
        let s = Clustering::from_labels(OptLevel::Greedy, &sample_labels()).summary();
        assert!(s.contains("4 nodes"));
        assert!(s.contains("2 clusters"));
    }

    #[test]
    fn test_empty_labels() {
        let c = Clustering::from_labels(OptLevel::None, &BTreeMap::new());
        assert_eq!(c.num_clusters(), 0);
        c.validate().unwrap();
    }
}
