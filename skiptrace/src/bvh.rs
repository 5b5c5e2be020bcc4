mod buffer;
mod builder;
mod extractor;
mod node;
mod nodes;
mod serializer;
mod stats;
mod triangle;

pub use self::buffer::*;
pub use self::extractor::ExtractedGeometry;
pub use self::node::*;
pub use self::nodes::*;
pub use self::stats::*;
pub use self::triangle::*;
use crate::{
    gpu, utils, BufferCapacity, BvhConfig, BvhUploader, Materials, Meshes,
    Object, Params, UploadError,
};

/// Host-side result of a build: the serialized tree and the shading
/// attributes of its triangles.
#[derive(Clone, Debug)]
pub struct BvhData {
    nodes: BvhNodes,
    buffer: BvhBuffer,
    attributes: Vec<gpu::TriangleAttributes>,
    stats: BvhStats,
}

impl BvhData {
    pub fn build<P>(
        objects: &[Object<P>],
        meshes: &Meshes<P>,
        materials: &Materials<P>,
        config: &BvhConfig,
    ) -> Self
    where
        P: Params,
    {
        let geometry = utils::measure("extract", || {
            extractor::run(objects, meshes, materials, &config.objects)
        });

        Self::from_geometry(geometry, config.capacity)
    }

    pub fn from_geometry(
        geometry: ExtractedGeometry,
        capacity: BufferCapacity,
    ) -> Self {
        let ExtractedGeometry {
            mut triangles,
            attributes,
        } = geometry;

        let mut nodes = BvhNodes::default();
        let mut buffer =
            BvhBuffer::with_capacity(capacity.elements(triangles.len()));

        let stats = if triangles.is_empty() {
            log::debug!("Scene has no triangles; emitting an empty BVH");

            buffer.push(&gpu::BvhNodeRecord::terminator().into_elements());

            BvhStats {
                bytes: buffer.size(),
                ..Default::default()
            }
        } else {
            let root_id = utils::measure("build", || {
                builder::run(&mut nodes, &mut triangles)
            });

            utils::measure("serialize", || {
                serializer::run(&nodes, root_id, &mut buffer)
            });

            BvhStats::new(triangles.len(), &nodes, root_id, buffer.size())
        };

        log::info!("BVH built; {stats}");

        Self {
            nodes,
            buffer,
            attributes,
            stats,
        }
    }

    /// In-memory tree the buffer was serialized from; empty when the scene
    /// had no triangles.
    pub fn nodes(&self) -> &BvhNodes {
        &self.nodes
    }

    pub fn buffer(&self) -> &BvhBuffer {
        &self.buffer
    }

    pub fn attributes(&self) -> &[gpu::TriangleAttributes] {
        &self.attributes
    }

    pub fn stats(&self) -> BvhStats {
        self.stats
    }
}

/// BVH living on the other side of a [`BvhUploader`] (usually on the GPU).
#[derive(Debug)]
pub struct Bvh<H> {
    nodes: H,
    attributes: H,
    stats: BvhStats,
}

impl<H> Bvh<H> {
    /// Builds the BVH and uploads it; the host-side copy is dropped once the
    /// upload is done (or fails).
    pub fn build<P, U>(
        objects: &[Object<P>],
        meshes: &Meshes<P>,
        materials: &Materials<P>,
        config: &BvhConfig,
        uploader: &mut U,
    ) -> Result<Self, UploadError>
    where
        P: Params,
        U: BvhUploader<Handle = H>,
    {
        let data = BvhData::build(objects, meshes, materials, config);

        Self::upload(&data, config, uploader)
    }

    pub fn upload<U>(
        data: &BvhData,
        config: &BvhConfig,
        uploader: &mut U,
    ) -> Result<Self, UploadError>
    where
        U: BvhUploader<Handle = H>,
    {
        let (nodes, attributes) = utils::measure("upload", || {
            let nodes = uploader.upload(&config.label, data.buffer.as_bytes())?;

            let attributes = uploader.upload(
                &config.attributes_label(),
                bytemuck::cast_slice(&data.attributes),
            )?;

            Ok::<_, UploadError>((nodes, attributes))
        })?;

        Ok(Self {
            nodes,
            attributes,
            stats: data.stats,
        })
    }

    /// Handle of the serialized tree.
    pub fn nodes(&self) -> &H {
        &self.nodes
    }

    /// Handle of the shading attributes, addressed by triangle ids stored in
    /// the tree's leaves.
    pub fn attributes(&self) -> &H {
        &self.attributes
    }

    pub fn stats(&self) -> BvhStats {
        self.stats
    }
}
