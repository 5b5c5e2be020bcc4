use glam::Mat4;

use crate::Params;

/// Instance of a mesh placed in the world.
#[derive(Clone, Debug)]
pub struct Object<P>
where
    P: Params,
{
    pub mesh_handle: P::MeshHandle,
    pub material_handle: P::MaterialHandle,

    /// Local-to-world transform; expected to be affine.
    pub transform: Mat4,
}

impl<P> Object<P>
where
    P: Params,
{
    pub fn new(
        mesh_handle: P::MeshHandle,
        material_handle: P::MaterialHandle,
        transform: Mat4,
    ) -> Self {
        Self {
            mesh_handle,
            material_handle,
            transform,
        }
    }
}
