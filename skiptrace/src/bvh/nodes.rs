use std::{fmt, ops};

use super::{BvhNode, BvhNodeId};

/// Arena holding the in-memory tree; children are referenced by ids instead
/// of pointers, so tearing the tree down is a single deallocation.
#[derive(Clone, Debug, Default)]
pub struct BvhNodes {
    nodes: Vec<BvhNode>,
}

impl BvhNodes {
    pub fn add(&mut self, node: BvhNode) -> BvhNodeId {
        self.nodes.push(node);

        BvhNodeId::new((self.nodes.len() - 1) as u32)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BvhNode> + '_ {
        self.nodes.iter()
    }

    /// Returns the number of levels below `id` (a lone leaf has depth 1).
    pub fn depth(&self, id: BvhNodeId) -> usize {
        let mut depth = 0;
        let mut stack = vec![(id, 1)];

        while let Some((id, level)) = stack.pop() {
            depth = depth.max(level);

            if let BvhNode::Internal {
                left_id, right_id, ..
            } = self[id]
            {
                stack.push((left_id, level + 1));
                stack.push((right_id, level + 1));
            }
        }

        depth
    }
}

impl ops::Index<BvhNodeId> for BvhNodes {
    type Output = BvhNode;

    fn index(&self, index: BvhNodeId) -> &Self::Output {
        &self.nodes[index.get() as usize]
    }
}

impl ops::IndexMut<BvhNodeId> for BvhNodes {
    fn index_mut(&mut self, index: BvhNodeId) -> &mut Self::Output {
        &mut self.nodes[index.get() as usize]
    }
}

/// Renders the tree as a Graphviz graph.
impl fmt::Display for BvhNodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph G {{")?;

        for (id, node) in self.nodes.iter().enumerate() {
            match node {
                BvhNode::Internal {
                    bounds,
                    left_id,
                    right_id,
                    split_axis,
                    split_cost,
                } => {
                    writeln!(
                        f,
                        "  n{id} [label=\"node({} .. {}) split={split_axis} \
                         cost={split_cost}\"]",
                        bounds.min(),
                        bounds.max(),
                    )?;

                    writeln!(f, "  n{id} -> n{} [label=\"left\"]", left_id.get())?;
                    writeln!(f, "  n{id} -> n{} [label=\"right\"]", right_id.get())?;
                }

                BvhNode::Leaf { triangle_id, .. } => {
                    writeln!(f, "  n{id} [label=\"leaf({triangle_id})\"]")?;
                }
            }
        }

        writeln!(f, "}}")
    }
}
