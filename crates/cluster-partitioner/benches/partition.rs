// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for greedy partitioning on synthetic graph shapes.

use cluster_partitioner::{OptLevel, Partitioner};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use graph_ir::{DeviceMap, DeviceTag, DirectedGraph, NodeId};
use std::collections::HashMap;

/// Linear chain of `n` nodes alternating between two accelerators
/// every `run` nodes, with a host node every 16th position.
fn chain(n: usize, run: usize) -> (DirectedGraph, DeviceMap) {
    let graph = DirectedGraph::build(
        (0..n).map(|i| (i, if i + 1 < n { vec![i + 1] } else { vec![] })),
    )
    .unwrap();
    let tags: HashMap<NodeId, DeviceTag> = (0..n)
        .map(|i| {
            let tag = if i % 16 == 15 {
                DeviceTag::host()
            } else if (i / run) % 2 == 0 {
                DeviceTag::new("npu0")
            } else {
                DeviceTag::new("gpu0")
            };
            (i, tag)
        })
        .collect();
    let devices = DeviceMap::build(&graph, tags).unwrap();
    (graph, devices)
}

/// Diamond lattice: `k` parallel two-node branches between a shared
/// entry and exit, all on one accelerator.
fn lattice(k: usize) -> (DirectedGraph, DeviceMap) {
    let entry = 0;
    let exit = 2 * k + 1;
    let mut lists: Vec<(NodeId, Vec<NodeId>)> = Vec::new();
    lists.push((entry, (0..k).map(|b| 2 * b + 1).collect()));
    for b in 0..k {
        lists.push((2 * b + 1, vec![2 * b + 2]));
        lists.push((2 * b + 2, vec![exit]));
    }
    lists.push((exit, vec![]));

    let graph = DirectedGraph::build(lists).unwrap();
    let tags: HashMap<NodeId, DeviceTag> = graph
        .node_ids()
        .map(|n| (n, DeviceTag::new("npu0")))
        .collect();
    let devices = DeviceMap::build(&graph, tags).unwrap();
    (graph, devices)
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_chain");
    for n in [64, 256, 1024] {
        let (graph, devices) = chain(n, 8);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                Partitioner::new(&graph, &devices)
                    .partition(OptLevel::Greedy, None)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_lattice(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_lattice");
    for k in [8, 32, 128] {
        let (graph, devices) = lattice(k);
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, _| {
            b.iter(|| {
                Partitioner::new(&graph, &devices)
                    .partition(OptLevel::Greedy, None)
                    .unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_chain, bench_lattice);
criterion_main!(benches);
