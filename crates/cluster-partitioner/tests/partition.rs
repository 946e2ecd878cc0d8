// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: manifest → graph → partitioner → clustering.
//!
//! Exercises the full pipeline across both crates, including the fixed
//! scenarios the partitioner must reproduce exactly every run.

use cluster_partitioner::{partition, ClusterState, OptLevel, Partitioner};
use graph_ir::{DeviceMap, DeviceTag, DirectedGraph, GraphLoader, GraphManifest, NodeId};
use std::collections::HashMap;

// ── Helpers ────────────────────────────────────────────────────

fn build(
    edges: &[(NodeId, &[NodeId])],
    tags: &[(NodeId, &str)],
) -> (DirectedGraph, DeviceMap) {
    let graph =
        DirectedGraph::build(edges.iter().map(|&(n, s)| (n, s.to_vec()))).unwrap();
    let map: HashMap<NodeId, DeviceTag> =
        tags.iter().map(|&(n, t)| (n, DeviceTag::new(t))).collect();
    let devices = DeviceMap::build(&graph, map).unwrap();
    (graph, devices)
}

// ── Fixed scenarios ────────────────────────────────────────────

#[test]
fn chain_with_host_blocker() {
    // 0 -> 1 -> 2 -> 3, tags ACC, ACC, HOST, ACC.
    // Node 2's host tag blocks it from merging with either neighbor.
    let (graph, devices) = build(
        &[(0, &[1]), (1, &[2]), (2, &[3]), (3, &[])],
        &[(0, "acc"), (1, "acc"), (2, "host"), (3, "acc")],
    );
    let clustering = Partitioner::new(&graph, &devices)
        .partition(OptLevel::Greedy, None)
        .unwrap();

    assert_eq!(clustering.members_of(0), &[0, 1]);
    assert_eq!(clustering.members_of(2), &[2]);
    assert_eq!(clustering.members_of(3), &[3]);
}

#[test]
fn diamond_collapses_through_both_paths() {
    // 0 -> 1, 0 -> 2, 1 -> 3, 2 -> 3, all on one accelerator.
    // The BFS pass must fuse along both branches into node 3's cluster.
    let (graph, devices) = build(
        &[(0, &[1, 2]), (1, &[3]), (2, &[3]), (3, &[])],
        &[(0, "acc"), (1, "acc"), (2, "acc"), (3, "acc")],
    );
    let clustering = Partitioner::new(&graph, &devices)
        .partition(OptLevel::Greedy, None)
        .unwrap();

    assert_eq!(clustering.num_clusters(), 1);
    let mut members = clustering.members_of(0).to_vec();
    members.sort_unstable();
    assert_eq!(members, vec![0, 1, 2, 3]);
}

#[test]
fn diamond_stays_acyclic_at_every_bfs_step() {
    // Replay the diamond's same-device merges by hand, checking the
    // cluster DAG after each accepted merge.
    let (graph, _) = build(
        &[(0, &[1, 2]), (1, &[3]), (2, &[3]), (3, &[])],
        &[(0, "acc"), (1, "acc"), (2, "acc"), (3, "acc")],
    );
    let mut state = ClusterState::new(&graph);
    for (a, b) in [(0, 1), (0, 2), (1, 3), (2, 3)] {
        let la = state.label_of(a);
        let lb = state.label_of(b);
        assert!(state.try_fuse(la, lb), "merge {a}+{b} rejected");
        assert!(state.is_acyclic(), "cycle after merging {a}+{b}");
    }
    assert_eq!(state.num_clusters(), 1);
}

#[test]
fn forced_rejection_rolls_back_exactly() {
    // 0 -> 1 -> 2 -> 3 with {0,1} and {2,3} pre-fused: merging the two
    // clusters would be fine. The illegal case is {0,1} with {3} while
    // {2} stands between them: {0,1,3} <-> {2} is a 2-node cycle.
    let (graph, _) = build(
        &[(0, &[1]), (1, &[2]), (2, &[3]), (3, &[])],
        &[(0, "acc"), (1, "acc"), (2, "acc"), (3, "acc")],
    );
    let mut state = ClusterState::new(&graph);
    assert!(state.try_fuse(0, 1));

    let labels_before = state.labels().clone();
    let members_0 = state.members_of(0).to_vec();

    assert!(!state.try_fuse(0, 3));

    assert_eq!(state.labels(), &labels_before);
    assert_eq!(state.members_of(0), members_0.as_slice());
    assert_eq!(state.members_of(3), &[3]);
}

// ── Properties ─────────────────────────────────────────────────

#[test]
fn greedy_preserves_the_dag() {
    // Wider lattice with mixed devices; after greedy fusion the final
    // state must still be acyclic and a true partition.
    let (graph, devices) = build(
        &[
            (0, &[1, 2, 3]),
            (1, &[4]),
            (2, &[4, 5]),
            (3, &[5]),
            (4, &[6]),
            (5, &[6]),
            (6, &[]),
        ],
        &[
            (0, "npu0"),
            (1, "npu0"),
            (2, "gpu0"),
            (3, "npu0"),
            (4, "npu0"),
            (5, "gpu0"),
            (6, "host"),
        ],
    );
    let clustering = Partitioner::new(&graph, &devices)
        .partition(OptLevel::Greedy, None)
        .unwrap();
    clustering.validate().unwrap();

    // Rebuild a state from the final labels and re-check acyclicity.
    let mut state = ClusterState::new(&graph);
    for (&node, &cluster) in clustering.labels.iter() {
        let current = state.label_of(node);
        if current != cluster {
            state.fuse(current, cluster);
        }
    }
    assert!(state.is_acyclic());
}

#[test]
fn identity_level_returns_singleton_labels() {
    let (graph, devices) = build(
        &[(0, &[1]), (1, &[2]), (2, &[])],
        &[(0, "acc"), (1, "acc"), (2, "acc")],
    );
    let clustering = Partitioner::new(&graph, &devices)
        .partition(OptLevel::None, None)
        .unwrap();
    for n in 0..3 {
        assert_eq!(clustering.label_of(n), Some(n));
        assert_eq!(clustering.members_of(n), &[n]);
    }
}

#[test]
fn export_runs_identically_twice() {
    let (graph, devices) = build(
        &[(0, &[1, 2]), (1, &[3]), (2, &[3]), (3, &[])],
        &[(0, "acc"), (1, "acc"), (2, "host"), (3, "acc")],
    );
    let partitioner = Partitioner::new(&graph, &devices);
    let a = partitioner.partition(OptLevel::Greedy, None).unwrap();
    let b = partitioner.partition(OptLevel::Greedy, None).unwrap();
    assert_eq!(a, b);
}

// ── End-to-end from a manifest ─────────────────────────────────

#[test]
fn manifest_to_clustering() {
    let manifest = GraphManifest::from_json(
        r#"{
            "name": "two-branch",
            "nodes": [
                { "id": 0, "device": "npu0", "successors": [1, 2] },
                { "id": 1, "device": "npu0", "successors": [3] },
                { "id": 2, "device": "host", "successors": [3] },
                { "id": 3, "device": "npu0", "successors": [] }
            ],
            "topological_order": [0, 1, 2, 3]
        }"#,
    )
    .unwrap();
    let tagged = GraphLoader::from_manifest(manifest).unwrap();
    let clustering = partition(&tagged, OptLevel::Greedy).unwrap();

    // 0 and 1 fuse in the order pass. The BFS pass must refuse to pull
    // 3 in: {0,1,3} would sit both upstream (via 0 -> 2) and downstream
    // (via 2 -> 3) of the host cluster {2}.
    clustering.validate().unwrap();
    assert_eq!(clustering.members_of(0), &[0, 1]);
    assert_eq!(clustering.members_of(2), &[2]);
    assert_eq!(clustering.members_of(3), &[3]);
}

#[test]
fn optimal_level_fails_end_to_end() {
    let manifest = GraphManifest::from_json(
        r#"{
            "name": "tiny",
            "nodes": [ { "id": 0, "device": "npu0", "successors": [] } ]
        }"#,
    )
    .unwrap();
    let tagged = GraphLoader::from_manifest(manifest).unwrap();
    let err = partition(&tagged, OptLevel::Optimal).unwrap_err();
    assert!(err.to_string().contains("optimal"));
}
