// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the cluster partitioner.

use crate::OptLevel;

/// Errors that can occur during graph partitioning.
///
/// None of these are retryable: each one indicates either an upstream
/// graph-construction bug or an unimplemented feature, and must surface
/// immediately to the caller of the compilation step. There is no
/// partial or best-effort partition result.
#[derive(Debug, thiserror::Error)]
pub enum PartitionError {
    /// The requested optimization level is not implemented.
    ///
    /// Raised for [`OptLevel::Optimal`]; the partitioner never silently
    /// degrades to [`OptLevel::Greedy`].
    #[error("optimization level '{0}' is not implemented")]
    UnsupportedLevel(OptLevel),

    /// The input graph or a supplied topological order is malformed.
    #[error("graph error: {0}")]
    Graph(#[from] graph_ir::GraphError),

    /// The produced clustering failed its own consistency check.
    #[error("invalid clustering: {0}")]
    InvalidClustering(String),
}
