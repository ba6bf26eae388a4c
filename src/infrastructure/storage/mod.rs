//! Confined filesystem storage for uploaded images.
//!
//! - [`signature`] - magic-byte detection of PNG and JPEG payloads
//! - [`secure_file_store`] - validated, traversal-safe writes under a root

pub mod secure_file_store;
pub mod signature;

pub use secure_file_store::{DEFAULT_MAX_UPLOAD_BYTES, SecureFileStore, StoredFile, UploadError};
pub use signature::{ImageType, detect_type};
