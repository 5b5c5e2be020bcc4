use glam::Vec4;

use crate::{BvhLeafRecord, BvhNodeRecord, BvhRecord};

/// Read-only view over a serialized BVH.
///
/// Pointers handed to and returned from this view are element indices (one
/// element = one `Vec4` = 16 bytes), the same unit the skip distances are
/// expressed in.
#[derive(Clone, Copy, Debug)]
pub struct BvhView<'a> {
    buffer: &'a [Vec4],
}

impl<'a> BvhView<'a> {
    pub fn new(buffer: &'a [Vec4]) -> Self {
        Self { buffer }
    }

    pub fn get(&self, ptr: usize) -> Vec4 {
        self.buffer[ptr]
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Decodes the record starting at `ptr`.
    ///
    /// The first element's `w` tells the record apart: positive for leaves
    /// (it's their stride), negative for nodes (it's their skip) and zero for
    /// the terminator.
    pub fn record(&self, ptr: usize) -> BvhRecord {
        let d0 = self.get(ptr);

        if d0.w == 0.0 {
            BvhRecord::Terminator
        } else if d0.w > 0.0 {
            BvhRecord::Leaf(BvhLeafRecord {
                v0: d0,
                e1: self.get(ptr + 1),
                e2: self.get(ptr + 2),
            })
        } else {
            BvhRecord::Node(BvhNodeRecord {
                min: d0,
                max: self.get(ptr + 1),
            })
        }
    }

    /// Walks all records front-to-back, descending into every node, up to
    /// (but excluding) the terminator.
    pub fn records(&self) -> BvhRecords<'a> {
        BvhRecords {
            view: *self,
            ptr: 0,
        }
    }

    /// Returns all leaves, in the order the traversal routine would reach
    /// them if every bounding box test succeeded.
    pub fn leaves(&self) -> impl Iterator<Item = BvhLeafRecord> + 'a {
        self.records().filter_map(|(_, record)| match record {
            BvhRecord::Leaf(leaf) => Some(leaf),
            _ => None,
        })
    }
}

pub struct BvhRecords<'a> {
    view: BvhView<'a>,
    ptr: usize,
}

impl Iterator for BvhRecords<'_> {
    type Item = (usize, BvhRecord);

    fn next(&mut self) -> Option<Self::Item> {
        if self.ptr >= self.view.len() {
            return None;
        }

        let ptr = self.ptr;
        let record = self.view.record(ptr);

        if let BvhRecord::Terminator = record {
            return None;
        }

        self.ptr += record.elements();

        Some((ptr, record))
    }
}

#[cfg(test)]
mod tests {
    use glam::{vec3, Vec3};

    use super::*;
    use crate::{MaterialId, TriangleId};

    fn leaf(x: f32, id: u32) -> BvhLeafRecord {
        BvhLeafRecord::new(
            [vec3(x, 0.0, 0.0), vec3(x + 1.0, 0.0, 0.0), vec3(x, 1.0, 0.0)],
            TriangleId::new(id),
            MaterialId::new(0),
        )
    }

    /// node(leaf0, leaf1), leaf2, terminator
    fn buffer() -> Vec<Vec4> {
        let mut node = BvhNodeRecord::new(Vec3::ZERO, vec3(2.0, 1.0, 0.0));

        node.min.w = -6.0;

        let mut out = Vec::new();

        out.extend(node.into_elements());
        out.extend(leaf(0.0, 0).into_elements());
        out.extend(leaf(1.0, 1).into_elements());
        out.extend(leaf(5.0, 2).into_elements());
        out.extend(BvhNodeRecord::terminator().into_elements());
        out
    }

    #[test]
    fn records() {
        let buffer = buffer();
        let target = BvhView::new(&buffer);

        let ptrs: Vec<_> = target.records().map(|(ptr, _)| ptr).collect();

        assert_eq!(vec![0, 2, 5, 8], ptrs);
        assert!(matches!(target.record(0), BvhRecord::Node(_)));
        assert!(matches!(target.record(11), BvhRecord::Terminator));

        let ids: Vec<_> =
            target.leaves().map(|leaf| leaf.triangle_id().get()).collect();

        assert_eq!(vec![0, 1, 2], ids);
    }

    #[test]
    fn records_stop_at_buffer_end() {
        let buffer = leaf(0.0, 0).into_elements().to_vec();
        let target = BvhView::new(&buffer);

        assert_eq!(1, target.records().count());
    }
}
