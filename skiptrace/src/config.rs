use crate::gpu;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BvhConfig {
    /// Which objects take part in the BVH.
    pub objects: ObjectFilter,

    /// How much memory to set aside for the serialized tree.
    pub capacity: BufferCapacity,

    /// Debug label for the GPU buffers; the attribute buffer gets an
    /// `-attributes` suffix.
    pub label: String,
}

impl BvhConfig {
    pub fn with_objects(mut self, objects: ObjectFilter) -> Self {
        self.objects = objects;
        self
    }

    pub fn with_capacity(mut self, capacity: BufferCapacity) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub(crate) fn attributes_label(&self) -> String {
        format!("{}-attributes", self.label)
    }
}

impl Default for BvhConfig {
    fn default() -> Self {
        Self {
            objects: Default::default(),
            capacity: Default::default(),
            label: "bvh".into(),
        }
    }
}

/// Selects objects (by their position in the scene's object list) that get
/// ray-traced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ObjectFilter {
    #[default]
    All,

    /// Everything except the last object, which is usually an overlay that
    /// shouldn't cast shadows or show up in reflections.
    AllButLast,

    Only(Vec<usize>),
    Except(Vec<usize>),
}

impl ObjectFilter {
    pub fn contains(&self, idx: usize, len: usize) -> bool {
        match self {
            ObjectFilter::All => true,
            ObjectFilter::AllButLast => idx + 1 < len,
            ObjectFilter::Only(ids) => ids.contains(&idx),
            ObjectFilter::Except(ids) => !ids.contains(&idx),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BufferCapacity {
    /// Enough for `2 * triangles` records of the leaf size: every node of the
    /// tree plus the terminator, each counted as if it was a leaf.
    #[default]
    WorstCase,

    Bytes(usize),
}

impl BufferCapacity {
    /// Returns the capacity in buffer elements (16 bytes each).
    pub fn elements(&self, triangles: usize) -> usize {
        match self {
            BufferCapacity::WorstCase => {
                let max_node_count = 2 * triangles.max(1);

                max_node_count * gpu::BvhLeafRecord::SIZE
                    / gpu::BVH_ELEMENT_SIZE
            }

            BufferCapacity::Bytes(bytes) => bytes / gpu::BVH_ELEMENT_SIZE,
        }
    }
}
