use super::{BvhNode, BvhNodeId, BvhNodes, BvhTriangle};
use crate::{Axis, BoundingBox};

/// Builds a binary tree over `triangles` using a full-sweep surface area
/// heuristic, returning the root's id.
///
/// Triangles get reordered in place; every leaf ends up holding exactly one
/// of them.
pub fn run(nodes: &mut BvhNodes, triangles: &mut [BvhTriangle]) -> BvhNodeId {
    assert!(!triangles.is_empty(), "cannot build a BVH out of no triangles");

    let root_id = nodes.add(BvhNode::default());
    let mut stack = vec![(root_id, 0..triangles.len())];
    let mut right_areas = Vec::new();

    while let Some((id, range)) = stack.pop() {
        let triangles = &mut triangles[range.clone()];

        if let [triangle] = *triangles {
            nodes[id] = BvhNode::Leaf {
                bounds: triangle.bounds,
                positions: triangle.positions,
                triangle_id: triangle.triangle_id,
                material_id: triangle.material_id,
            };

            continue;
        }

        let bounds: BoundingBox =
            triangles.iter().map(|triangle| triangle.bounds).collect();

        let plane = find_splitting_plane(triangles, &mut right_areas);

        sort_by_center(triangles, plane.axis);

        let mut left = range.start..(range.start + plane.index);
        let mut right = (range.start + plane.index)..range.end;

        let (left_area, right_area) = {
            let (lhs, rhs) = triangles.split_at(plane.index);

            (union(lhs).area(), union(rhs).area())
        };

        // Larger child goes first, so that rays tend to find a close hit
        // early and can then skip over more of the remaining nodes
        if right_area > left_area {
            (left, right) = (right, left);
        }

        let left_id = nodes.add(BvhNode::default());
        let right_id = nodes.add(BvhNode::default());

        nodes[id] = BvhNode::Internal {
            bounds,
            left_id,
            right_id,
            split_axis: plane.axis,
            split_cost: plane.cost,
        };

        stack.push((right_id, right));
        stack.push((left_id, left));
    }

    root_id
}

#[derive(Clone, Copy, Debug)]
struct SplittingPlane {
    axis: Axis,

    /// Number of triangles that go into the left child.
    index: usize,

    cost: f32,
}

/// Tries every axis and every split position, returning the cheapest one.
///
/// Ties are resolved in favor of the axis checked first and then in favor of
/// the lower index.
fn find_splitting_plane(
    triangles: &mut [BvhTriangle],
    right_areas: &mut Vec<f32>,
) -> SplittingPlane {
    let count = triangles.len();
    let mut best: Option<SplittingPlane> = None;

    for axis in Axis::all() {
        sort_by_center(triangles, axis);

        right_areas.clear();
        right_areas.resize(count, 0.0);

        let mut bounds = BoundingBox::default();

        for idx in (1..count).rev() {
            bounds += triangles[idx].bounds;
            right_areas[idx] = bounds.area();
        }

        let mut bounds = BoundingBox::default();

        for idx in 1..count {
            bounds += triangles[idx - 1].bounds;

            let cost = bounds.area() * (idx as f32)
                + right_areas[idx] * ((count - idx) as f32);

            if best.map_or(true, |best| cost < best.cost) {
                best = Some(SplittingPlane {
                    axis,
                    index: idx,
                    cost,
                });
            }
        }
    }

    // Range has at least two triangles, so at least one candidate was checked
    let Some(best) = best else {
        unreachable!();
    };

    best
}

fn sort_by_center(triangles: &mut [BvhTriangle], axis: Axis) {
    triangles
        .sort_unstable_by(|a, b| a.center[axis].total_cmp(&b.center[axis]));
}

fn union(triangles: &[BvhTriangle]) -> BoundingBox {
    triangles.iter().map(|triangle| triangle.bounds).collect()
}
