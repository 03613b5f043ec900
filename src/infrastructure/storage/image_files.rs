use crate::application::ports::ImageFileStore;
use crate::shared::error::AppError;
use std::io::ErrorKind;

/// Image files on the local filesystem, keyed by the path stored in the
/// `images` table.
pub struct LocalImageFiles;

impl LocalImageFiles {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalImageFiles {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageFileStore for LocalImageFiles {
    fn read(&self, path: &str) -> Result<Option<Vec<u8>>, AppError> {
        match std::fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn remove(&self, path: &str) -> Result<(), AppError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            // Already gone is the state we wanted.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_returns_none_for_a_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.jpg");
        let files = LocalImageFiles::new();

        assert_eq!(files.read(path.to_str().unwrap()).unwrap(), None);
    }

    #[test]
    fn read_returns_the_bytes_of_an_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mb_01.jpg");
        std::fs::write(&path, b"jpeg bytes").unwrap();
        let files = LocalImageFiles::new();

        assert_eq!(
            files.read(path.to_str().unwrap()).unwrap(),
            Some(b"jpeg bytes".to_vec())
        );
    }

    #[test]
    fn remove_swallows_a_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.jpg");
        let files = LocalImageFiles::new();

        assert!(files.remove(path.to_str().unwrap()).is_ok());
    }

    #[test]
    fn remove_deletes_an_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sig_02.png");
        std::fs::write(&path, b"png bytes").unwrap();
        let files = LocalImageFiles::new();

        files.remove(path.to_str().unwrap()).unwrap();
        assert!(!path.exists());
    }
}
