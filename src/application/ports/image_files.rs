use crate::shared::error::AppError;

/// Local image files referenced by cached image rows.
pub trait ImageFileStore: Send + Sync {
    /// `Ok(None)` when the file is gone; the upload pass skips that image.
    fn read(&self, path: &str) -> Result<Option<Vec<u8>>, AppError>;

    /// Removing an already missing file is not an error.
    fn remove(&self, path: &str) -> Result<(), AppError>;
}
