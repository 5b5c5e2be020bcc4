use bytemuck::{Pod, Zeroable};
use glam::{vec2, Vec3, Vec4, Vec4Swizzles};

use crate::{Hit, MaterialId, Ray, TriangleId, BVH_ELEMENT_SIZE};

/// Internal node of the serialized tree.
///
/// `min.w` is not a coordinate: it holds the negated number of elements
/// occupied by this node's children and their descendants, i.e. the distance
/// from the end of this record to the end of its subtree (written once the
/// subtree has been emitted), or zero for the terminator. `max.w` is unused.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct BvhNodeRecord {
    pub min: Vec4,
    pub max: Vec4,
}

impl BvhNodeRecord {
    pub const ELEMENTS: usize = 2;
    pub const SIZE: usize = Self::ELEMENTS * BVH_ELEMENT_SIZE;

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.extend(0.0),
            max: max.extend(0.0),
        }
    }

    /// Record marking the end of the buffer.
    pub fn terminator() -> Self {
        Self::default()
    }

    pub fn min(&self) -> Vec3 {
        self.min.xyz()
    }

    pub fn max(&self) -> Vec3 {
        self.max.xyz()
    }

    /// Number of elements to jump over (counting from the end of this record)
    /// to leave this node's subtree.
    pub fn skip(&self) -> usize {
        (-self.min.w) as usize
    }

    pub fn is_terminator(&self) -> bool {
        self.min.w == 0.0
    }

    pub fn into_elements(self) -> [Vec4; Self::ELEMENTS] {
        [self.min, self.max]
    }
}

/// Leaf of the serialized tree, i.e. a single triangle stored as a vertex plus
/// two edges.
///
/// `v0.w` holds the record's own stride (always 3 elements), `e1.w` holds the
/// triangle's id in the shading-attribute buffer and `e2.w` holds its
/// material id.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct BvhLeafRecord {
    pub v0: Vec4,
    pub e1: Vec4,
    pub e2: Vec4,
}

impl BvhLeafRecord {
    pub const ELEMENTS: usize = 3;
    pub const SIZE: usize = Self::ELEMENTS * BVH_ELEMENT_SIZE;

    pub fn new(
        [p0, p1, p2]: [Vec3; 3],
        triangle_id: TriangleId,
        material_id: MaterialId,
    ) -> Self {
        Self {
            v0: p0.extend(Self::ELEMENTS as f32),
            e1: (p1 - p0).extend(triangle_id.get() as f32),
            e2: (p2 - p0).extend(material_id.get() as f32),
        }
    }

    pub fn v0(&self) -> Vec3 {
        self.v0.xyz()
    }

    pub fn e1(&self) -> Vec3 {
        self.e1.xyz()
    }

    pub fn e2(&self) -> Vec3 {
        self.e2.xyz()
    }

    /// Reconstructs the vertices; note that `v0 + (v1 - v0)` is subject to
    /// rounding, so `v1` and `v2` are not guaranteed to be bit-exact.
    pub fn positions(&self) -> [Vec3; 3] {
        [self.v0(), self.v0() + self.e1(), self.v0() + self.e2()]
    }

    pub fn stride(&self) -> usize {
        self.v0.w as usize
    }

    pub fn triangle_id(&self) -> TriangleId {
        TriangleId::new(self.e1.w as u32)
    }

    pub fn material_id(&self) -> MaterialId {
        MaterialId::new(self.e2.w as u32)
    }

    pub fn into_elements(self) -> [Vec4; Self::ELEMENTS] {
        [self.v0, self.e1, self.e2]
    }

    /// Möller-Trumbore; updates `hit` only when the intersection is closer
    /// than what `hit` already holds.
    pub fn hit(&self, ray: Ray, hit: &mut Hit) -> bool {
        let e1 = self.e1();
        let e2 = self.e2();

        let pvec = ray.direction().cross(e2);
        let det = e1.dot(pvec);

        if det.abs() < f32::EPSILON {
            return false;
        }

        let inv_det = 1.0 / det;
        let tvec = ray.origin() - self.v0();
        let u = tvec.dot(pvec) * inv_det;
        let qvec = tvec.cross(e1);
        let v = ray.direction().dot(qvec) * inv_det;
        let distance = e2.dot(qvec) * inv_det;

        if (u < 0.0)
            | (u > 1.0)
            | (v < 0.0)
            | (u + v > 1.0)
            | (distance <= 0.0)
            | (distance >= hit.distance)
        {
            return false;
        }

        hit.distance = distance;
        hit.point = ray.at(distance - Hit::DISTANCE_OFFSET);
        hit.barycentric = vec2(u, v);
        hit.triangle_id = self.triangle_id();
        hit.material_id = self.material_id();

        true
    }
}

/// A decoded record, as seen by the traversal routine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BvhRecord {
    Node(BvhNodeRecord),
    Leaf(BvhLeafRecord),
    Terminator,
}

impl BvhRecord {
    /// Number of elements this record occupies in the buffer.
    pub fn elements(&self) -> usize {
        match self {
            BvhRecord::Node(_) | BvhRecord::Terminator => {
                BvhNodeRecord::ELEMENTS
            }
            BvhRecord::Leaf(_) => BvhLeafRecord::ELEMENTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;

    #[test]
    fn layout() {
        assert_eq!(32, core::mem::size_of::<BvhNodeRecord>());
        assert_eq!(48, core::mem::size_of::<BvhLeafRecord>());
        assert_eq!(BvhNodeRecord::SIZE, core::mem::size_of::<BvhNodeRecord>());
        assert_eq!(BvhLeafRecord::SIZE, core::mem::size_of::<BvhLeafRecord>());
    }

    #[test]
    fn leaf_payload() {
        let target = BvhLeafRecord::new(
            [vec3(1.0, 2.0, 3.0), vec3(2.0, 2.0, 3.0), vec3(1.0, 4.0, 3.0)],
            TriangleId::new(1234),
            MaterialId::new(7),
        );

        assert_eq!(vec3(1.0, 2.0, 3.0).extend(3.0), target.v0);
        assert_eq!(vec3(1.0, 0.0, 0.0).extend(1234.0), target.e1);
        assert_eq!(vec3(0.0, 2.0, 0.0).extend(7.0), target.e2);

        assert_eq!(3, target.stride());
        assert_eq!(TriangleId::new(1234), target.triangle_id());
        assert_eq!(MaterialId::new(7), target.material_id());
    }

    #[test]
    fn terminator() {
        let target = BvhNodeRecord::terminator();

        assert!(target.is_terminator());
        assert_eq!(0, target.skip());
    }

    #[test]
    fn leaf_hit() {
        let target = BvhLeafRecord::new(
            [vec3(-1.0, -1.0, 5.0), vec3(1.0, -1.0, 5.0), vec3(-1.0, 1.0, 5.0)],
            TriangleId::new(3),
            MaterialId::new(1),
        );

        let origin = vec3(-0.5, -0.5, 0.0);
        let mut hit = Hit::none();

        assert!(target.hit(Ray::new(origin, Vec3::Z), &mut hit));
        assert_eq!(5.0, hit.distance);
        assert_eq!(vec2(0.25, 0.25), hit.barycentric);
        assert_eq!(TriangleId::new(3), hit.triangle_id);
        assert_eq!(MaterialId::new(1), hit.material_id);

        // Farther than what we've already got
        let mut hit = Hit {
            distance: 4.0,
            ..Hit::none()
        };

        assert!(!target.hit(Ray::new(origin, Vec3::Z), &mut hit));

        // Pointing away
        let mut hit = Hit::none();

        assert!(!target.hit(Ray::new(origin, -Vec3::Z), &mut hit));
        assert!(hit.is_none());
    }
}
