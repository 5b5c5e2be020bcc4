use glam::Vec4;

use crate::gpu;

/// Fixed-capacity, host-side copy of the serialized tree.
#[derive(Clone, Debug, Default)]
pub struct BvhBuffer {
    data: Vec<Vec4>,
    capacity: usize,
}

impl BvhBuffer {
    /// Creates an empty buffer that can hold up to `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, elements: &[Vec4]) {
        assert!(
            self.data.len() + elements.len() <= self.capacity,
            "BVH buffer overflow: cannot fit {} more element(s) into {}/{}",
            elements.len(),
            self.data.len(),
            self.capacity,
        );

        self.data.extend_from_slice(elements);
    }

    /// Overwrites the skip distance of the node record located at `ptr`.
    pub(crate) fn patch_skip(&mut self, ptr: usize, skip: usize) {
        let min = &mut self.data[ptr];

        assert!(min.w < 0.0, "element {ptr} does not start a node record");

        assert!(
            skip < gpu::MAX_EXACT_INDEX as usize,
            "skip of {skip} elements cannot be stored exactly"
        );

        min.w = -(skip as f32);
    }

    /// Number of elements written so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of bytes written so far.
    pub fn size(&self) -> usize {
        self.data.len() * gpu::BVH_ELEMENT_SIZE
    }

    pub fn as_slice(&self) -> &[Vec4] {
        &self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    pub fn view(&self) -> gpu::BvhView<'_> {
        gpu::BvhView::new(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use glam::{vec4, Vec3};

    use super::*;

    #[test]
    fn push() {
        let mut target = BvhBuffer::with_capacity(4);

        target.push(&[vec4(1.0, 2.0, 3.0, 4.0)]);
        target.push(&[Vec4::ZERO, Vec4::ONE]);

        assert_eq!(3, target.len());
        assert_eq!(48, target.size());
        assert_eq!(48, target.as_bytes().len());
        assert_eq!(&2.0f32.to_le_bytes(), &target.as_bytes()[4..8]);
    }

    #[test]
    #[should_panic(expected = "BVH buffer overflow")]
    fn overflow() {
        let mut target = BvhBuffer::with_capacity(2);

        target.push(&[Vec4::ZERO]);
        target.push(&[Vec4::ZERO, Vec4::ZERO]);
    }

    #[test]
    fn patch_skip() {
        let mut target = BvhBuffer::with_capacity(2);

        let mut node = gpu::BvhNodeRecord::new(Vec3::ZERO, Vec3::ONE);

        node.min.w = -1.0;

        target.push(&node.into_elements());

        target.patch_skip(0, 12);

        assert_eq!(-12.0, target.as_slice()[0].w);

        let gpu::BvhRecord::Node(node) = target.view().record(0) else {
            panic!("expected a node record");
        };

        assert_eq!(12, node.skip());
    }

    #[test]
    #[should_panic(expected = "cannot be stored exactly")]
    fn patch_skip_past_f32_precision() {
        let mut target = BvhBuffer::with_capacity(2);
        let mut node = gpu::BvhNodeRecord::new(Vec3::ZERO, Vec3::ONE);

        node.min.w = -1.0;

        target.push(&node.into_elements());
        target.patch_skip(0, 16_777_217);
    }
}
