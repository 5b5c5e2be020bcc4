use glam::{Vec2, Vec3, Vec4};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tangent: Vec4,
    pub uv: Vec2,
}

impl MeshVertex {
    pub fn new(position: impl Into<Vec3>) -> Self {
        Self {
            position: position.into(),
            ..Default::default()
        }
    }

    pub fn with_normal(mut self, normal: impl Into<Vec3>) -> Self {
        self.normal = normal.into();
        self
    }

    pub fn with_tangent(mut self, tangent: impl Into<Vec4>) -> Self {
        self.tangent = tangent.into();
        self
    }

    pub fn with_uv(mut self, uv: impl Into<Vec2>) -> Self {
        self.uv = uv.into();
        self
    }
}

/// Triangle mesh, in its local space.
///
/// Without an index list, vertices are consumed in triples, in their natural
/// order; trailing vertices that don't form a full triangle are ignored.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    vertices: Vec<MeshVertex>,
    indices: Option<Vec<u32>>,
}

impl Mesh {
    pub fn new(vertices: Vec<MeshVertex>) -> Self {
        Self {
            vertices,
            indices: None,
        }
    }

    pub fn with_indices(mut self, indices: Vec<u32>) -> Self {
        assert!(
            indices.len() % 3 == 0,
            "index list's length must be a multiple of three (got {})",
            indices.len()
        );

        if let Some(idx) = indices
            .iter()
            .find(|&&idx| idx as usize >= self.vertices.len())
        {
            panic!(
                "index {idx} is out of bounds (the mesh has {} vertices)",
                self.vertices.len()
            );
        }

        self.indices = Some(indices);
        self
    }

    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.vertices.len() / 3,
        }
    }

    pub fn triangle(&self, idx: usize) -> [MeshVertex; 3] {
        let vertex = |n: usize| match &self.indices {
            Some(indices) => self.vertices[indices[3 * idx + n] as usize],
            None => self.vertices[3 * idx + n],
        };

        [vertex(0), vertex(1), vertex(2)]
    }

    pub fn triangles(&self) -> impl Iterator<Item = [MeshVertex; 3]> + '_ {
        (0..self.triangle_count()).map(|idx| self.triangle(idx))
    }
}
