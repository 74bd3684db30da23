use super::{SourceError, UploadError};

/// Top-level error for callers that drive the view directly.
///
/// The view's own entry points (`set_sort`, `on_drop`) absorb failures into
/// notifications; this type is what the lower-level operations return.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ViewError {
    /// Fetching the document list failed.
    #[error("Fetch failed: {0}")]
    Fetch(#[from] SourceError),

    /// Uploading dropped files failed.
    #[error("Upload failed: {0}")]
    Upload(#[from] UploadError),
}
