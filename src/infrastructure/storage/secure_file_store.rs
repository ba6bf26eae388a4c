//! Validated image writes confined to an upload root.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

use super::signature::{ImageType, detect_type};

/// Default maximum upload size: 2 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Reasons an upload is refused.
///
/// Every variant except [`UploadError::Io`] is a permanent rejection of the
/// given payload and is raised before anything touches the disk.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("File too large")]
    InvalidFileSize,

    #[error("Invalid file type")]
    InvalidFileType,

    #[error("Path traversal detected")]
    PathTraversalDetected,

    #[error("Symlink parent forbidden")]
    SymlinkParentForbidden,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// An image written by [`SecureFileStore::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub path: PathBuf,
    pub image_type: ImageType,
    pub size: usize,
}

impl StoredFile {
    /// Base name of the stored file (never the full path).
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Writes uploaded images under a fixed root directory.
///
/// The root must already exist; it is canonicalized on every call so a root
/// that is replaced after startup is still resolved correctly.
///
/// All operations are blocking. Async callers should run them on the
/// blocking thread pool.
#[derive(Debug, Clone)]
pub struct SecureFileStore {
    root: PathBuf,
    max_size_bytes: usize,
}

impl SecureFileStore {
    pub fn new(root: impl Into<PathBuf>, max_size_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_size_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_size_bytes(&self) -> usize {
        self.max_size_bytes
    }

    /// Validates `data` and writes it under a random name.
    ///
    /// # Errors
    ///
    /// - [`UploadError::InvalidFileSize`] if `data` exceeds the size limit
    /// - [`UploadError::InvalidFileType`] if no PNG/JPEG signature matches
    /// - [`UploadError::PathTraversalDetected`] if the destination escapes the root
    /// - [`UploadError::SymlinkParentForbidden`] if a parent directory is a symlink
    /// - [`UploadError::Io`] if the root is missing or the write fails
    pub fn save(&self, data: &[u8]) -> Result<StoredFile, UploadError> {
        if data.len() > self.max_size_bytes {
            return Err(UploadError::InvalidFileSize);
        }

        let image_type = detect_type(data).ok_or(UploadError::InvalidFileType)?;
        let file_name = format!("{}.{}", Uuid::new_v4(), image_type.extension());

        self.write_confined(Path::new(&file_name), data, image_type)
    }

    /// Resolves `relative` under the canonical root and writes `data` there.
    pub(crate) fn write_confined(
        &self,
        relative: &Path,
        data: &[u8],
        image_type: ImageType,
    ) -> Result<StoredFile, UploadError> {
        let root = self.root.canonicalize()?;
        let destination = confine(&root, relative)?;

        write_new(&destination, data)?;

        Ok(StoredFile {
            path: destination,
            image_type,
            size: data.len(),
        })
    }

    /// Returns true if the root exists and is a directory.
    pub fn is_ready(&self) -> bool {
        self.root.canonicalize().map(|p| p.is_dir()).unwrap_or(false)
    }
}

/// Resolves `relative` against the canonical `root`, refusing escapes.
fn confine(root: &Path, relative: &Path) -> Result<PathBuf, UploadError> {
    let candidate = root.join(relative);

    let resolved = resolve_non_strict(&candidate)?;
    if !resolved.starts_with(root) {
        return Err(UploadError::PathTraversalDetected);
    }

    if has_symlink_ancestor(root, &normalize_lexically(&candidate))? {
        return Err(UploadError::SymlinkParentForbidden);
    }

    Ok(resolved)
}

/// Canonicalizes the longest existing prefix of `path` and applies the
/// remaining components lexically.
fn resolve_non_strict(path: &Path) -> io::Result<PathBuf> {
    let components: Vec<Component<'_>> = path.components().collect();

    for split in (1..=components.len()).rev() {
        let prefix: PathBuf = components[..split].iter().collect();
        match prefix.canonicalize() {
            Ok(mut resolved) => {
                for component in &components[split..] {
                    match component {
                        Component::ParentDir => {
                            resolved.pop();
                        }
                        Component::Normal(part) => resolved.push(part),
                        _ => {}
                    }
                }
                return Ok(resolved);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => return Err(e),
        }
    }

    Err(io::Error::new(
        io::ErrorKind::NotFound,
        "no existing ancestor for upload path",
    ))
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                normalized.pop();
            }
            Component::CurDir => {}
            other => normalized.push(other),
        }
    }
    normalized
}

/// Checks directories strictly between `root` and `path` for symlinks.
///
/// An ancestor that cannot be inspected is an error, not a pass.
fn has_symlink_ancestor(root: &Path, path: &Path) -> io::Result<bool> {
    for ancestor in path
        .ancestors()
        .skip(1)
        .take_while(|ancestor| *ancestor != root && ancestor.starts_with(root))
    {
        if is_symlink(ancestor)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// A missing component is not a link; the write itself fails on it.
fn is_symlink(path: &Path) -> io::Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(meta) => Ok(meta.file_type().is_symlink()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

fn write_new(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;

    if let Err(e) = file.write_all(data) {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::signature::{JPEG_EOI, JPEG_SOI, PNG_SIGNATURE};
    use tempfile::tempdir;

    fn png_bytes(payload_len: usize) -> Vec<u8> {
        let mut data = PNG_SIGNATURE.to_vec();
        data.extend(std::iter::repeat_n(0xAB, payload_len));
        data
    }

    #[test]
    fn test_save_png_round_trip() {
        let dir = tempdir().unwrap();
        let store = SecureFileStore::new(dir.path(), DEFAULT_MAX_UPLOAD_BYTES);
        let data = png_bytes(1024);

        let stored = store.save(&data).unwrap();

        let root = dir.path().canonicalize().unwrap();
        assert!(stored.path.starts_with(&root));
        assert_eq!(stored.path.parent(), Some(root.as_path()));
        assert_eq!(stored.image_type, ImageType::Png);
        assert!(stored.file_name().ends_with(".png"));
        assert_eq!(fs::read(&stored.path).unwrap(), data);
    }

    #[test]
    fn test_save_jpeg_uses_jpg_extension() {
        let dir = tempdir().unwrap();
        let store = SecureFileStore::new(dir.path(), DEFAULT_MAX_UPLOAD_BYTES);
        let mut data = JPEG_SOI.to_vec();
        data.extend_from_slice(b"frame");
        data.extend_from_slice(&JPEG_EOI);

        let stored = store.save(&data).unwrap();

        assert_eq!(stored.image_type, ImageType::Jpeg);
        assert!(stored.file_name().ends_with(".jpg"));
    }

    #[test]
    fn test_save_generates_unique_names() {
        let dir = tempdir().unwrap();
        let store = SecureFileStore::new(dir.path(), DEFAULT_MAX_UPLOAD_BYTES);
        let data = png_bytes(16);

        let first = store.save(&data).unwrap();
        let second = store.save(&data).unwrap();

        assert_ne!(first.file_name(), second.file_name());
    }

    #[test]
    fn test_save_rejects_plain_text() {
        let dir = tempdir().unwrap();
        let store = SecureFileStore::new(dir.path(), DEFAULT_MAX_UPLOAD_BYTES);

        let result = store.save(b"not_image");

        assert!(matches!(result, Err(UploadError::InvalidFileType)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_save_rejects_oversized_png() {
        let dir = tempdir().unwrap();
        let store = SecureFileStore::new(dir.path(), 1024);

        let result = store.save(&png_bytes(1024));

        assert!(matches!(result, Err(UploadError::InvalidFileSize)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_save_accepts_exact_limit() {
        let dir = tempdir().unwrap();
        let store = SecureFileStore::new(dir.path(), 1024);

        let result = store.save(&png_bytes(1024 - PNG_SIGNATURE.len()));

        assert!(result.is_ok());
    }

    #[test]
    fn test_size_checked_before_type() {
        let dir = tempdir().unwrap();
        let store = SecureFileStore::new(dir.path(), 4);

        let result = store.save(b"plain text that is long");

        assert!(matches!(result, Err(UploadError::InvalidFileSize)));
    }

    #[test]
    fn test_missing_root_is_not_created() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("missing");
        let store = SecureFileStore::new(&root, DEFAULT_MAX_UPLOAD_BYTES);

        let result = store.save(&png_bytes(8));

        assert!(matches!(result, Err(UploadError::Io(_))));
        assert!(!root.exists());
        assert!(!store.is_ready());
    }

    #[test]
    fn test_parent_dir_escape_detected() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("uploads");
        fs::create_dir(&root).unwrap();
        let store = SecureFileStore::new(&root, DEFAULT_MAX_UPLOAD_BYTES);

        let result = store.write_confined(Path::new("../evil.png"), &png_bytes(8), ImageType::Png);

        assert!(matches!(result, Err(UploadError::PathTraversalDetected)));
        assert!(!dir.path().join("evil.png").exists());
    }

    #[test]
    fn test_absolute_destination_detected() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("uploads");
        fs::create_dir(&root).unwrap();
        let outside = dir.path().join("outside.png");
        let store = SecureFileStore::new(&root, DEFAULT_MAX_UPLOAD_BYTES);

        let result = store.write_confined(&outside, &png_bytes(8), ImageType::Png);

        assert!(matches!(result, Err(UploadError::PathTraversalDetected)));
        assert!(!outside.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escaping_root_detected() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("uploads");
        let outside = dir.path().join("outside");
        fs::create_dir(&root).unwrap();
        fs::create_dir(&outside).unwrap();
        std::os::unix::fs::symlink(&outside, root.join("link")).unwrap();
        let store = SecureFileStore::new(&root, DEFAULT_MAX_UPLOAD_BYTES);

        let result = store.write_confined(Path::new("link/x.png"), &png_bytes(8), ImageType::Png);

        assert!(matches!(result, Err(UploadError::PathTraversalDetected)));
        assert_eq!(fs::read_dir(&outside).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_parent_inside_root_forbidden() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("uploads");
        let real = root.join("real");
        fs::create_dir_all(&real).unwrap();
        std::os::unix::fs::symlink(&real, root.join("alias")).unwrap();
        let store = SecureFileStore::new(&root, DEFAULT_MAX_UPLOAD_BYTES);

        let result = store.write_confined(Path::new("alias/x.png"), &png_bytes(8), ImageType::Png);

        assert!(matches!(result, Err(UploadError::SymlinkParentForbidden)));
        assert_eq!(fs::read_dir(&real).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_root_is_resolved() {
        let dir = tempdir().unwrap();
        let real = dir.path().join("real-uploads");
        fs::create_dir(&real).unwrap();
        let alias = dir.path().join("uploads");
        std::os::unix::fs::symlink(&real, &alias).unwrap();
        let store = SecureFileStore::new(&alias, DEFAULT_MAX_UPLOAD_BYTES);

        let stored = store.save(&png_bytes(8)).unwrap();

        assert!(stored.path.starts_with(real.canonicalize().unwrap()));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_check_fails_closed_on_unreadable_ancestor() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::write(root.join("plain"), b"not a directory").unwrap();

        let result = has_symlink_ancestor(&root, &root.join("plain/sub/x.png"));

        assert!(result.is_err());
        assert!(!has_symlink_ancestor(&root, &root.join("missing/x.png")).unwrap());
    }

    #[test]
    fn test_existing_file_not_overwritten() {
        let dir = tempdir().unwrap();
        let store = SecureFileStore::new(dir.path(), DEFAULT_MAX_UPLOAD_BYTES);
        fs::write(dir.path().join("taken.png"), b"original").unwrap();

        let result = store.write_confined(Path::new("taken.png"), &png_bytes(8), ImageType::Png);

        assert!(matches!(result, Err(UploadError::Io(_))));
        assert_eq!(fs::read(dir.path().join("taken.png")).unwrap(), b"original");
    }
}
