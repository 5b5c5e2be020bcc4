use std::fmt::Debug;
use std::hash::Hash;

/// Types the host application uses to identify its assets.
///
/// The BVH never looks inside those handles; it only uses them to resolve
/// objects into meshes and materials.
pub trait Params
where
    Self: Clone + Debug,
{
    type MeshHandle: Eq + Hash + Clone + Debug;
    type MaterialHandle: Eq + Hash + Clone + Debug;
}
