use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::{BvhView, Hit, Ray};

/// Parameters of the ray-traced shadows pass.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ShadowsParams {
    /// Direction towards the light (i.e. the light's direction, negated)
    pub light_dir: Vec3,
    pub _pad0: f32,

    /// Component-wise inverse of `light_dir`, precomputed for slab tests
    pub light_dir_inv: Vec3,
    pub _pad1: f32,
}

impl ShadowsParams {
    pub fn new(light_dir: Vec3) -> Self {
        Self {
            light_dir: -light_dir,
            light_dir_inv: -1.0 / light_dir,
            ..Default::default()
        }
    }

    /// Returns a ray going from `point` towards the light.
    pub fn ray(&self, point: Vec3) -> Ray {
        Ray::with_inv_direction(
            point + self.light_dir * Hit::DISTANCE_OFFSET,
            self.light_dir,
            self.light_dir_inv,
        )
    }
}

/// Parameters of the ray-traced reflections pass.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ReflectionsParams {
    pub eye_pos: Vec3,
    pub _pad0: f32,
}

impl ReflectionsParams {
    pub fn new(eye_pos: Vec3) -> Self {
        Self {
            eye_pos,
            ..Default::default()
        }
    }

    /// Returns a ray mirroring the view direction around `normal` at `point`.
    pub fn ray(&self, point: Vec3, normal: Vec3) -> Ray {
        let incident = (point - self.eye_pos).normalize();
        let reflected = incident - 2.0 * incident.dot(normal) * normal;

        Ray::new(point + reflected * Hit::DISTANCE_OFFSET, reflected)
    }
}

/// Returns whether `point` is occluded from the light.
pub fn trace_shadow(bvh: BvhView, params: &ShadowsParams, point: Vec3) -> bool {
    params.ray(point).trace_any(bvh, f32::MAX)
}

/// Returns what's visible in the mirror direction at `point`.
pub fn trace_reflection(
    bvh: BvhView,
    params: &ReflectionsParams,
    point: Vec3,
    normal: Vec3,
) -> Hit {
    params.ray(point, normal).trace_nearest(bvh).0
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{vec3, Vec4};

    use super::*;
    use crate::{BvhLeafRecord, BvhNodeRecord, MaterialId, TriangleId};

    #[test]
    fn layout() {
        assert_eq!(0, core::mem::size_of::<ShadowsParams>() % 16);
        assert_eq!(0, core::mem::size_of::<ReflectionsParams>() % 16);
    }

    #[test]
    fn shadows_params() {
        let target = ShadowsParams::new(vec3(1.0, -2.0, 4.0));

        assert_eq!(vec3(-1.0, 2.0, -4.0), target.light_dir);
        assert_relative_eq!(target.light_dir_inv.x, -1.0);
        assert_relative_eq!(target.light_dir_inv.y, 0.5);
        assert_relative_eq!(target.light_dir_inv.z, -0.25);
    }

    /// A single occluder hanging at y=5 over the origin.
    fn occluder() -> Vec<Vec4> {
        let mut out = Vec::new();

        out.extend(
            BvhLeafRecord::new(
                [vec3(-1.0, 5.0, -1.0), vec3(1.0, 5.0, -1.0), vec3(-1.0, 5.0, 1.0)],
                TriangleId::new(0),
                MaterialId::new(4),
            )
            .into_elements(),
        );

        out.extend(BvhNodeRecord::terminator().into_elements());
        out
    }

    #[test]
    fn shadow() {
        let buffer = occluder();
        let bvh = BvhView::new(&buffer);

        // Sun shining straight down
        let params = ShadowsParams::new(vec3(0.0, -1.0, 0.0));

        assert!(trace_shadow(bvh, &params, vec3(-0.5, 0.0, -0.5)));
        assert!(!trace_shadow(bvh, &params, vec3(3.0, 0.0, 3.0)));
    }

    #[test]
    fn reflection() {
        let buffer = occluder();
        let bvh = BvhView::new(&buffer);

        // Looking straight down at a mirror floor
        let params = ReflectionsParams::new(vec3(-0.5, 10.0, -0.5));

        let hit =
            trace_reflection(bvh, &params, vec3(-0.5, 0.0, -0.5), Vec3::Y);

        assert!(hit.is_some());
        assert_eq!(MaterialId::new(4), hit.material_id);
    }
}
