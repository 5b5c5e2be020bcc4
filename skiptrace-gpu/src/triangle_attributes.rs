use bytemuck::{Pod, Zeroable};
use glam::{vec4, Vec2, Vec3, Vec4, Vec4Swizzles};

/// Per-triangle shading data, stored in a buffer parallel to the BVH and
/// addressed by [`crate::TriangleId`].
///
/// UVs are packed as `[u0, v0, u1, v1]`, `[u2, v2, 0, 0]`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct TriangleAttributes {
    pub normals: [Vec4; 3],
    pub tangents: [Vec4; 3],
    pub uvs: [Vec4; 2],
}

impl TriangleAttributes {
    pub fn new(normals: [Vec3; 3], tangents: [Vec4; 3], uvs: [Vec2; 3]) -> Self {
        Self {
            normals: normals.map(|normal| normal.extend(0.0)),
            tangents,
            uvs: [
                vec4(uvs[0].x, uvs[0].y, uvs[1].x, uvs[1].y),
                vec4(uvs[2].x, uvs[2].y, 0.0, 0.0),
            ],
        }
    }

    pub fn normal(&self, idx: usize) -> Vec3 {
        self.normals[idx].xyz()
    }

    pub fn tangent(&self, idx: usize) -> Vec4 {
        self.tangents[idx]
    }

    pub fn uv(&self, idx: usize) -> Vec2 {
        match idx {
            0 => self.uvs[0].xy(),
            1 => self.uvs[0].zw(),
            2 => self.uvs[1].xy(),
            _ => panic!("triangle has only three vertices"),
        }
    }

    /// Interpolates normal at given barycentric coordinates (as reported by
    /// [`crate::Hit`]).
    pub fn interpolated_normal(&self, barycentric: Vec2) -> Vec3 {
        let (u, v) = (barycentric.x, barycentric.y);

        ((1.0 - u - v) * self.normal(0) + u * self.normal(1) + v * self.normal(2))
            .normalize_or_zero()
    }

    pub fn interpolated_uv(&self, barycentric: Vec2) -> Vec2 {
        let (u, v) = (barycentric.x, barycentric.y);

        self.uv(0) + (self.uv(1) - self.uv(0)) * u + (self.uv(2) - self.uv(0)) * v
    }
}

#[cfg(test)]
mod tests {
    use glam::{vec2, vec3};

    use super::*;

    #[test]
    fn layout() {
        assert_eq!(128, core::mem::size_of::<TriangleAttributes>());
    }

    #[test]
    fn uvs() {
        let target = TriangleAttributes::new(
            [Vec3::Y; 3],
            [Vec4::X; 3],
            [vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(0.0, 1.0)],
        );

        assert_eq!(vec2(1.0, 0.0), target.uv(1));
        assert_eq!(vec2(0.0, 1.0), target.uv(2));
        assert_eq!(vec2(0.25, 0.5), target.interpolated_uv(vec2(0.25, 0.5)));
        assert_eq!(vec3(0.0, 1.0, 0.0), target.interpolated_normal(vec2(0.3, 0.3)));
    }
}
