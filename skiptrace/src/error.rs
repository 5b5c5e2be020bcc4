use thiserror::Error;

/// Failure reported by a [`crate::BvhUploader`].
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("buffer `{label}` is too large: {size} bytes (limit: {limit})")]
    TooLarge { label: String, size: u64, limit: u64 },

    #[error("buffer `{label}` was rejected: {reason}")]
    Rejected { label: String, reason: String },
}
