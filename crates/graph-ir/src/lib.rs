// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # graph-ir
//!
//! A lightweight intermediate representation for device-tagged
//! computation graphs.
//!
//! Rather than depending on a full compiler framework, this crate
//! defines the minimal structure the cluster partitioner needs:
//!
//! - [`DirectedGraph`] — successor-list adjacency with a derived
//!   predecessor map and source-node set.
//! - [`DeviceTag`] / [`DeviceMap`] — per-node execution-target labels,
//!   with a reserved host sentinel.
//! - [`topological_order`] / [`validate_order`] — order computation via
//!   iterative DFS, and validation of externally supplied orders.
//! - [`GraphManifest`] / [`GraphLoader`] — the JSON input surface.
//!
//! # Example
//! ```no_run
//! use graph_ir::GraphLoader;
//! use std::path::Path;
//!
//! let tagged = GraphLoader::load(Path::new("./graphs/resnet.json")).unwrap();
//! println!("{}", tagged.graph.summary());
//! ```

mod device;
mod error;
mod graph;
mod loader;
mod manifest;
mod topo;

pub use device::{DeviceMap, DeviceTag};
pub use error::GraphError;
pub use graph::{DirectedGraph, NodeId};
pub use loader::{GraphLoader, TaggedGraph};
pub use manifest::{GraphManifest, ManifestNode};
pub use topo::{topological_order, validate_order};
