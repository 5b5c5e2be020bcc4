use glam::Vec3;

use crate::{gpu, BoundingBox};

/// Triangle as seen by the builder: world-space vertices, their bounding box
/// and the ids the serialized leaf will carry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BvhTriangle {
    pub bounds: BoundingBox,
    pub center: Vec3,
    pub positions: [Vec3; 3],
    pub triangle_id: gpu::TriangleId,
    pub material_id: gpu::MaterialId,
}

impl BvhTriangle {
    pub fn new(
        positions: [Vec3; 3],
        triangle_id: gpu::TriangleId,
        material_id: gpu::MaterialId,
    ) -> Self {
        let bounds: BoundingBox = positions.into_iter().collect();

        Self {
            bounds,
            center: bounds.center(),
            positions,
            triangle_id,
            material_id,
        }
    }
}
