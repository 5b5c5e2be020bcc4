use super::{Bindable, BvhUploader};
use crate::UploadError;

/// Read-only storage buffer holding bytes produced by the BVH build.
#[derive(Debug)]
pub struct StorageBuffer {
    buffer: wgpu::Buffer,
}

impl StorageBuffer {
    /// Smallest size we allocate; empty bindings are not allowed.
    const MIN_SIZE: u64 = 16;

    pub fn new(
        device: &wgpu::Device,
        label: impl AsRef<str>,
        size: usize,
    ) -> Self {
        let label = label.as_ref();
        let size = (size as u64).max(Self::MIN_SIZE);

        log::debug!("Allocating storage buffer `{label}`; size={size}");

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::STORAGE,
            size,
            mapped_at_creation: false,
        });

        Self { buffer }
    }

    pub fn write(&self, queue: &wgpu::Queue, bytes: &[u8]) {
        queue.write_buffer(&self.buffer, 0, bytes);
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn size(&self) -> u64 {
        self.buffer.size()
    }
}

impl Bindable for StorageBuffer {
    fn bind(
        &self,
        binding: u32,
    ) -> Vec<(wgpu::BindGroupLayoutEntry, wgpu::BindingResource)> {
        let layout = wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT
                | wgpu::ShaderStages::COMPUTE,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only: true },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let resource = self.buffer.as_entire_binding();

        vec![(layout, resource)]
    }
}

/// Uploads buffers into GPU memory through wgpu.
pub struct WgpuUploader<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
}

impl<'a> WgpuUploader<'a> {
    pub fn new(device: &'a wgpu::Device, queue: &'a wgpu::Queue) -> Self {
        Self { device, queue }
    }
}

impl BvhUploader for WgpuUploader<'_> {
    type Handle = StorageBuffer;

    fn upload(
        &mut self,
        label: &str,
        bytes: &[u8],
    ) -> Result<Self::Handle, UploadError> {
        let limits = self.device.limits();
        let size = bytes.len() as u64;

        let limit = limits
            .max_buffer_size
            .min(limits.max_storage_buffer_binding_size as u64);

        if size > limit {
            return Err(UploadError::TooLarge {
                label: label.into(),
                size,
                limit,
            });
        }

        if size % wgpu::COPY_BUFFER_ALIGNMENT != 0 {
            return Err(UploadError::Rejected {
                label: label.into(),
                reason: format!(
                    "size is not a multiple of {}",
                    wgpu::COPY_BUFFER_ALIGNMENT
                ),
            });
        }

        let buffer = StorageBuffer::new(self.device, label, bytes.len());

        if !bytes.is_empty() {
            buffer.write(self.queue, bytes);
        }

        Ok(buffer)
    }
}
