//! Magic-byte detection for accepted image formats.

/// PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

/// JPEG start-of-image marker.
pub const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

/// JPEG end-of-image marker.
pub const JPEG_EOI: [u8; 2] = [0xFF, 0xD9];

/// Image formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    Png,
    Jpeg,
}

impl ImageType {
    pub fn mime(&self) -> &'static str {
        match self {
            ImageType::Png => "image/png",
            ImageType::Jpeg => "image/jpeg",
        }
    }

    /// File extension written for this type, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageType::Png => "png",
            ImageType::Jpeg => "jpg",
        }
    }
}

/// Detects the image type from leading (and, for JPEG, trailing) bytes.
///
/// JPEG detection only looks at the SOI and EOI markers; the frame structure
/// in between is not parsed.
pub fn detect_type(data: &[u8]) -> Option<ImageType> {
    if data.starts_with(&PNG_SIGNATURE) {
        return Some(ImageType::Png);
    }

    if data.starts_with(&JPEG_SOI) && data.ends_with(&JPEG_EOI) {
        return Some(ImageType::Jpeg);
    }

    None
}
