use glam::Affine2;

/// The part of a material the BVH cares about.
///
/// Everything else (textures, shading parameters) lives in the host
/// application's own material table, addressed by the same
/// [`crate::gpu::MaterialId`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub uv_transform: Affine2,
}

impl Material {
    pub fn with_uv_transform(mut self, uv_transform: Affine2) -> Self {
        self.uv_transform = uv_transform;
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            uv_transform: Affine2::IDENTITY,
        }
    }
}
