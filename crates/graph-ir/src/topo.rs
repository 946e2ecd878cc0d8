// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Topological ordering: computation and validation.
//!
//! The partitioner's order-based fusion pass is only sound against an
//! order that is consistent with every edge, so a caller-supplied
//! sequence is always run through [`validate_order`] before use —
//! trusting it would let a stale or hand-built order smuggle a cycle
//! past the unchecked fast path.

use crate::{DirectedGraph, GraphError, NodeId};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

/// Computes a topological order via iterative DFS from the source nodes.
///
/// Returns [`GraphError::Cyclic`] if the graph contains a cycle; a node
/// that no DFS from any source ever reaches sits on (or behind) a cycle,
/// since an acyclic graph reaches every node from its sources.
pub fn topological_order(graph: &DirectedGraph) -> Result<Vec<NodeId>, GraphError> {
    let mut marks: BTreeMap<NodeId, Mark> =
        graph.node_ids().map(|n| (n, Mark::Unvisited)).collect();
    let mut postorder = Vec::with_capacity(graph.num_nodes());
    // (node, index of the next successor to visit)
    let mut stack: Vec<(NodeId, usize)> = Vec::new();

    for &source in graph.source_nodes() {
        if marks[&source] != Mark::Unvisited {
            continue;
        }
        marks.insert(source, Mark::OnStack);
        stack.push((source, 0));

        while let Some((node, next)) = stack.last_mut() {
            let node = *node;
            let succ = graph.successors(node);
            if *next < succ.len() {
                let child = succ[*next];
                *next += 1;
                match marks[&child] {
                    Mark::Unvisited => {
                        marks.insert(child, Mark::OnStack);
                        stack.push((child, 0));
                    }
                    Mark::OnStack => return Err(GraphError::Cyclic(child)),
                    Mark::Done => {}
                }
            } else {
                marks.insert(node, Mark::Done);
                postorder.push(node);
                stack.pop();
            }
        }
    }

    if postorder.len() != graph.num_nodes() {
        // Unreached nodes all have predecessors, so at least one cycle
        // with no entry point exists among them.
        let stuck = graph
            .node_ids()
            .find(|n| marks[n] == Mark::Unvisited)
            .unwrap_or_default();
        return Err(GraphError::Cyclic(stuck));
    }

    postorder.reverse();
    Ok(postorder)
}

/// Validates a caller-supplied topological order against the graph.
///
/// Checks that `order` is a permutation of the node set and that every
/// edge points from an earlier to a later position.
pub fn validate_order(graph: &DirectedGraph, order: &[NodeId]) -> Result<(), GraphError> {
    if order.len() != graph.num_nodes() {
        return Err(GraphError::InvalidOrder(format!(
            "order has {} entries but graph has {} nodes",
            order.len(),
            graph.num_nodes(),
        )));
    }

    let mut position: BTreeMap<NodeId, usize> = BTreeMap::new();
    for (pos, &node) in order.iter().enumerate() {
        if !graph.contains(node) {
            return Err(GraphError::InvalidOrder(format!(
                "order contains unknown node {node}",
            )));
        }
        if position.insert(node, pos).is_some() {
            return Err(GraphError::InvalidOrder(format!(
                "node {node} appears more than once",
            )));
        }
    }

    for from in graph.node_ids() {
        for &to in graph.successors(from) {
            if position[&from] >= position[&to] {
                return Err(GraphError::InvalidOrder(format!(
                    "edge {from} -> {to} violates the order",
                )));
            }
        }
    }

    Ok(())
}
