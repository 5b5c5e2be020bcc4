use glam::{Vec2, Vec3};

use crate::{MaterialId, TriangleId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub distance: f32,
    pub point: Vec3,
    pub barycentric: Vec2,
    pub triangle_id: TriangleId,
    pub material_id: MaterialId,
}

impl Hit {
    /// How far to move a hit point away from its surface to avoid
    /// self-intersection when casting secondary rays
    pub const DISTANCE_OFFSET: f32 = 0.01;

    pub fn none() -> Self {
        Self {
            distance: f32::MAX,
            point: Default::default(),
            barycentric: Default::default(),
            triangle_id: Default::default(),
            material_id: Default::default(),
        }
    }

    pub fn is_some(&self) -> bool {
        self.distance < f32::MAX
    }

    pub fn is_none(&self) -> bool {
        !self.is_some()
    }
}

impl Default for Hit {
    fn default() -> Self {
        Self::none()
    }
}
