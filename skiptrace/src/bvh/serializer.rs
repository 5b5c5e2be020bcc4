use super::{BvhBuffer, BvhNode, BvhNodeId, BvhNodes};
use crate::gpu;

/// Writes the tree into `buffer`, in pre-order, followed by the terminator.
///
/// The root itself is never emitted (rays always start within the scene, so
/// testing its bounds would be wasted work); its children are written
/// directly instead. Each node's skip distance gets patched in once its
/// whole subtree is in the buffer.
pub fn run(nodes: &BvhNodes, root_id: BvhNodeId, buffer: &mut BvhBuffer) {
    let mut stack = match nodes[root_id] {
        BvhNode::Internal {
            left_id, right_id, ..
        } => vec![Step::Visit(right_id), Step::Visit(left_id)],

        BvhNode::Leaf { .. } => vec![Step::Visit(root_id)],
    };

    while let Some(step) = stack.pop() {
        match step {
            Step::Visit(id) => match nodes[id] {
                BvhNode::Internal {
                    bounds,
                    left_id,
                    right_id,
                    ..
                } => {
                    let ptr = buffer.len();
                    let mut record =
                        gpu::BvhNodeRecord::new(bounds.min(), bounds.max());

                    // Placeholder; must be negative so that the record can't
                    // be mistaken for a leaf or the terminator
                    record.min.w = -1.0;

                    buffer.push(&record.into_elements());

                    stack.push(Step::Patch(ptr));
                    stack.push(Step::Visit(right_id));
                    stack.push(Step::Visit(left_id));
                }

                BvhNode::Leaf {
                    positions,
                    triangle_id,
                    material_id,
                    ..
                } => {
                    assert!(
                        triangle_id.get() < gpu::MAX_EXACT_INDEX,
                        "triangle id {triangle_id} cannot be stored exactly"
                    );

                    assert!(
                        material_id.get() < gpu::MAX_EXACT_INDEX,
                        "material id {material_id} cannot be stored exactly"
                    );

                    let record = gpu::BvhLeafRecord::new(
                        positions,
                        triangle_id,
                        material_id,
                    );

                    buffer.push(&record.into_elements());
                }
            },

            Step::Patch(ptr) => {
                let skip = buffer.len() - ptr - gpu::BvhNodeRecord::ELEMENTS;

                buffer.patch_skip(ptr, skip);
            }
        }
    }

    buffer.push(&gpu::BvhNodeRecord::terminator().into_elements());
}

#[derive(Clone, Copy, Debug)]
enum Step {
    Visit(BvhNodeId),

    /// Fills in the skip distance of the node record at given pointer; runs
    /// after both of that node's children have been visited.
    Patch(usize),
}
