//! Layouts and routines shared between skiptrace's BVH builder and the GPU
//! traversal code.
//!
//! Everything here describes the flat, pointer-free BVH buffer: how records
//! are laid out, how they are decoded and how a ray walks through them using
//! the embedded skip distances.

#![allow(clippy::len_without_is_empty)]
#![allow(clippy::manual_range_contains)]

mod bvh_record;
mod bvh_view;
mod hit;
mod ids;
mod passes;
mod ray;
mod triangle_attributes;

pub use self::bvh_record::*;
pub use self::bvh_view::*;
pub use self::hit::*;
pub use self::ids::*;
pub use self::passes::*;
pub use self::ray::*;
pub use self::triangle_attributes::*;

/// Size of a single buffer element (one `vec4<f32>`), in bytes.
pub const BVH_ELEMENT_SIZE: usize = 16;

/// Largest index that survives a round-trip through an `f32` payload slot.
pub const MAX_EXACT_INDEX: u32 = 1 << 24;
