// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Device tags: per-node execution-target labels.
//!
//! Tags are drawn from an open string universe and compared only for
//! equality; the partitioner attaches no meaning to any value except
//! the reserved host sentinel, which both fusion passes treat as
//! unfusable general-purpose fallback.

use crate::{DirectedGraph, GraphError, NodeId};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// An execution-target label for a single node.
///
/// One value, [`DeviceTag::HOST_NAME`], is reserved for the
/// general-purpose host; everything else names an accelerator and is
/// opaque to the partitioner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DeviceTag(String);

impl DeviceTag {
    /// The reserved host sentinel value.
    pub const HOST_NAME: &'static str = "host";

    /// Creates a tag from an arbitrary target name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the reserved host tag.
    pub fn host() -> Self {
        Self(Self::HOST_NAME.to_string())
    }

    /// Returns `true` if this is the reserved host sentinel.
    pub fn is_host(&self) -> bool {
        self.0 == Self::HOST_NAME
    }

    /// Returns the tag's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceTag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Immutable per-node device assignment.
///
/// Supplied by the (out-of-scope) tagging stage; construction verifies
/// that every graph node carries exactly one tag.
#[derive(Debug, Clone)]
pub struct DeviceMap {
    tags: HashMap<NodeId, DeviceTag>,
}

impl DeviceMap {
    /// Builds a device map covering `graph`, failing on any untagged node.
    ///
    /// Tags for ids outside the graph are ignored; a missing tag for a
    /// graph node is a [`GraphError::MissingTag`].
    pub fn build(
        graph: &DirectedGraph,
        tags: HashMap<NodeId, DeviceTag>,
    ) -> Result<Self, GraphError> {
        for node in graph.node_ids() {
            if !tags.contains_key(&node) {
                return Err(GraphError::MissingTag(node));
            }
        }
        Ok(Self { tags })
    }

    /// Returns the tag for `node`.
    ///
    /// # Panics
    /// Panics if `node` was not covered at construction; coverage is
    /// checked in [`DeviceMap::build`], so this only fires on ids that
    /// never belonged to the graph.
    pub fn tag_of(&self, node: NodeId) -> &DeviceTag {
        &self.tags[&node]
    }

    /// Returns the number of distinct tag values in use.
    pub fn num_distinct_tags(&self) -> usize {
        self.tags.values().collect::<HashSet<_>>().len()
    }
}
