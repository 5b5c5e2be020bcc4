use std::fmt;

use super::{BvhNodeId, BvhNodes};

/// Summary of a finished build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BvhStats {
    pub triangles: usize,

    /// Nodes in the in-memory tree, including the (never serialized) root.
    pub nodes: usize,

    pub leaves: usize,
    pub depth: usize,

    /// Size of the serialized tree, terminator included.
    pub bytes: usize,
}

impl BvhStats {
    pub(crate) fn new(
        triangles: usize,
        nodes: &BvhNodes,
        root_id: BvhNodeId,
        bytes: usize,
    ) -> Self {
        Self {
            triangles,
            nodes: nodes.len(),
            leaves: nodes.iter().filter(|node| node.is_leaf()).count(),
            depth: nodes.depth(root_id),
            bytes,
        }
    }
}

impl fmt::Display for BvhStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "triangles={}, nodes={}, leaves={}, depth={}, bytes={}",
            self.triangles, self.nodes, self.leaves, self.depth, self.bytes
        )
    }
}
