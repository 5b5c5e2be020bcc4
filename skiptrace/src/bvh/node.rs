use glam::Vec3;

use crate::{gpu, Axis, BoundingBox};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BvhNode {
    Internal {
        bounds: BoundingBox,
        left_id: BvhNodeId,
        right_id: BvhNodeId,
        split_axis: Axis,

        /// Lowest SAH cost found when splitting this node; informational.
        split_cost: f32,
    },

    Leaf {
        bounds: BoundingBox,
        positions: [Vec3; 3],
        triangle_id: gpu::TriangleId,
        material_id: gpu::MaterialId,
    },
}

impl BvhNode {
    pub fn bounds(&self) -> BoundingBox {
        match self {
            BvhNode::Internal { bounds, .. } => *bounds,
            BvhNode::Leaf { bounds, .. } => *bounds,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, BvhNode::Leaf { .. })
    }
}

impl Default for BvhNode {
    fn default() -> Self {
        BvhNode::Leaf {
            bounds: Default::default(),
            positions: Default::default(),
            triangle_id: Default::default(),
            material_id: Default::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BvhNodeId(u32);

impl BvhNodeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}
