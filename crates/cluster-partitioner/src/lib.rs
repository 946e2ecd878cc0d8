// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # cluster-partitioner
//!
//! Groups the nodes of a device-tagged computation graph into the
//! largest legal single-device clusters, where "legal" means the
//! induced cluster-level graph stays acyclic.
//!
//! # Levels
//!
//! | Level | Behavior |
//! |---|---|
//! | [`OptLevel::None`] | Identity partition, one cluster per node |
//! | [`OptLevel::Greedy`] | Order-based pass, then BFS pass with checked merges |
//! | [`OptLevel::Optimal`] | Unimplemented; fails with a distinct error |
//!
//! # Example
//! ```no_run
//! use cluster_partitioner::{partition, OptLevel};
//! use graph_ir::GraphLoader;
//! use std::path::Path;
//!
//! let tagged = GraphLoader::load(Path::new("./graphs/resnet.json")).unwrap();
//! let clustering = partition(&tagged, OptLevel::Greedy).unwrap();
//! println!("{}", clustering.summary());
//! ```

mod error;
mod export;
mod partitioner;
mod state;

pub use error::PartitionError;
pub use export::Clustering;
pub use partitioner::{OptLevel, Partitioner};
pub use state::{ClusterId, ClusterState};

use graph_ir::TaggedGraph;

/// Partitions a loaded graph at the requested level.
///
/// Convenience wrapper over [`Partitioner`] that feeds through the
/// manifest's optional topological order (validated before use).
pub fn partition(
    tagged: &TaggedGraph,
    level: OptLevel,
) -> Result<Clustering, PartitionError> {
    tracing::info!(
        graph = %tagged.name,
        level = %level,
        nodes = tagged.graph.num_nodes(),
        "partitioning graph",
    );
    let clustering = Partitioner::new(&tagged.graph, &tagged.devices)
        .partition(level, tagged.supplied_order.as_deref())?;
    tracing::info!(
        clusters = clustering.num_clusters(),
        "partitioning complete",
    );
    Ok(clustering)
}
