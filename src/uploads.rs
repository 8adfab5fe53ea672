//! Employee photo store — writes uploaded bytes under the uploads
//! directory with a UUID filename and returns the reference to persist.

use std::fs;
use std::path::Path;

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Empty upload")]
    Empty,

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Save an uploaded photo. The stored filename is a fresh UUID with the
/// original extension, so uploads never collide or overwrite.
pub fn save_photo(
    uploads_dir: &Path,
    original_name: &str,
    bytes: &[u8],
) -> Result<String, UploadError> {
    if bytes.is_empty() {
        return Err(UploadError::Empty);
    }

    let extension = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(UploadError::UnsupportedType(extension));
    }

    fs::create_dir_all(uploads_dir)?;
    let filename = format!("{}.{extension}", Uuid::new_v4());
    fs::write(uploads_dir.join(&filename), bytes)?;

    tracing::debug!(filename, size = bytes.len(), "Photo stored");
    Ok(filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn saves_with_uuid_name_and_original_extension() {
        let dir = TempDir::new().unwrap();
        let name = save_photo(dir.path(), "portrait.JPG", b"fake-jpeg").unwrap();
        assert!(name.ends_with(".jpg"));
        assert_eq!(fs::read(dir.path().join(&name)).unwrap(), b"fake-jpeg");
    }

    #[test]
    fn two_uploads_never_collide() {
        let dir = TempDir::new().unwrap();
        let a = save_photo(dir.path(), "x.png", b"a").unwrap();
        let b = save_photo(dir.path(), "x.png", b"b").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let err = save_photo(dir.path(), "script.exe", b"mz").unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType(_)));
    }

    #[test]
    fn rejects_empty_body() {
        let dir = TempDir::new().unwrap();
        let err = save_photo(dir.path(), "x.png", b"").unwrap_err();
        assert!(matches!(err, UploadError::Empty));
    }
}
