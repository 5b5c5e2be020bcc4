use glam::{Vec3, Vec4Swizzles};

use crate::{BvhLeafRecord, BvhNodeRecord, BvhView, Hit};

#[derive(Clone, Copy, Debug, Default)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
    inv_direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self::with_inv_direction(origin, direction, 1.0 / direction)
    }

    /// Creates a ray whose inverse direction has been computed up-front (e.g.
    /// when it comes from a uniform, see [`crate::ShadowsParams`]).
    pub fn with_inv_direction(
        origin: Vec3,
        direction: Vec3,
        inv_direction: Vec3,
    ) -> Self {
        Self {
            origin,
            direction,
            inv_direction,
        }
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }

    /// Traces this ray and returns its nearest hit, together with the number
    /// of records visited on the way.
    pub fn trace_nearest(self, bvh: BvhView) -> (Hit, u32) {
        let mut hit = Hit::none();
        let traversed = self.trace(bvh, TracingMode::Nearest, &mut hit);

        (hit, traversed)
    }

    /// Traces this ray and returns whether it hits anything up to the given
    /// distance.
    pub fn trace_any(self, bvh: BvhView, max_distance: f32) -> bool {
        let mut hit = Hit {
            distance: max_distance,
            ..Hit::none()
        };

        self.trace(bvh, TracingMode::Any, &mut hit);

        hit.distance < max_distance
    }

    /// Walks the buffer front-to-back without a stack: a failed bounding box
    /// test jumps over the node's whole subtree using its skip distance, a
    /// successful one simply proceeds to the next record (the node's first
    /// child).
    fn trace(self, bvh: BvhView, mode: TracingMode, hit: &mut Hit) -> u32 {
        // Index into the `bvh` buffer; points at the currently processed record
        let mut bvh_ptr = 0;

        // Number of records visited so far; useful for debugging
        let mut traversed = 0;

        while bvh_ptr < bvh.len() {
            let d0 = bvh.get(bvh_ptr);

            if d0.w == 0.0 {
                break;
            }

            traversed += 1;

            if d0.w > 0.0 {
                let leaf = BvhLeafRecord {
                    v0: d0,
                    e1: bvh.get(bvh_ptr + 1),
                    e2: bvh.get(bvh_ptr + 2),
                };

                if leaf.hit(self, hit) && mode == TracingMode::Any {
                    break;
                }

                bvh_ptr += leaf.stride();
            } else {
                let d1 = bvh.get(bvh_ptr + 1);
                let distance = self.distance_to_node(d0.xyz(), d1.xyz());

                bvh_ptr += BvhNodeRecord::ELEMENTS;

                if distance >= hit.distance {
                    bvh_ptr += (-d0.w) as usize;
                }
            }
        }

        traversed
    }

    fn distance_to_node(self, aabb_min: Vec3, aabb_max: Vec3) -> f32 {
        let hit_min = (aabb_min - self.origin) * self.inv_direction;
        let hit_max = (aabb_max - self.origin) * self.inv_direction;

        // `0 * inf` happens when the ray is parallel to a slab and starts
        // right on its plane; such a slab doesn't constrain the interval
        let unbounded = hit_min.is_nan_mask() | hit_max.is_nan_mask();

        let tmin = Vec3::select(
            unbounded,
            Vec3::splat(f32::NEG_INFINITY),
            hit_min.min(hit_max),
        )
        .max_element();

        let tmax = Vec3::select(
            unbounded,
            Vec3::splat(f32::INFINITY),
            hit_min.max(hit_max),
        )
        .min_element();

        if tmax >= tmin && tmax >= 0.0 {
            tmin
        } else {
            f32::MAX
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum TracingMode {
    Nearest,
    Any,
}
