//! Builds a stackless bounding volume hierarchy over a triangle scene and
//! serializes it into a flat buffer a GPU can walk without pointers.
//!
//! The flow is: scene objects are flattened into world-space triangles
//! ([`ExtractedGeometry`]), a surface-area-heuristic tree is built over them,
//! the tree is written out in pre-order with skip distances embedded into its
//! records and finally the buffer is handed to a [`BvhUploader`].

#![allow(clippy::len_without_is_empty)]

#[cfg(not(target_endian = "little"))]
compile_error!("the serialized BVH layout assumes a little-endian host");

mod buffers;
mod bvh;
mod config;
mod error;
mod material;
mod materials;
mod mesh;
mod meshes;
mod object;
mod params;
mod utils;

#[cfg(test)]
mod test_utils;

pub use skiptrace_gpu as gpu;

pub use self::buffers::*;
pub use self::bvh::*;
pub use self::config::*;
pub use self::error::*;
pub use self::material::*;
pub use self::materials::*;
pub use self::mesh::*;
pub use self::meshes::*;
pub use self::object::*;
pub use self::params::*;
pub use self::utils::*;
