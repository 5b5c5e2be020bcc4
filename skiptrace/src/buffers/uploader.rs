use crate::UploadError;

/// Moves serialized data somewhere the traversal routine can read it from.
///
/// Bytes must be stored as they are; uploaders never reinterpret them.
pub trait BvhUploader {
    type Handle;

    fn upload(
        &mut self,
        label: &str,
        bytes: &[u8],
    ) -> Result<Self::Handle, UploadError>;
}

/// Uploader that keeps everything in host memory; useful for CPU-side
/// traversal and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryUploader {
    limit: Option<usize>,
}

impl MemoryUploader {
    /// Makes the uploader reject buffers larger than `limit` bytes.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl BvhUploader for MemoryUploader {
    type Handle = Vec<u8>;

    fn upload(
        &mut self,
        label: &str,
        bytes: &[u8],
    ) -> Result<Self::Handle, UploadError> {
        if let Some(limit) = self.limit {
            if bytes.len() > limit {
                return Err(UploadError::TooLarge {
                    label: label.into(),
                    size: bytes.len() as u64,
                    limit: limit as u64,
                });
            }
        }

        log::debug!("Storing buffer `{label}` in memory; size={}", bytes.len());

        Ok(bytes.to_vec())
    }
}
