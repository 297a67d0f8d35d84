//! Image payloads and MIME handling for coin photos.
//!
//! Uploads are held in memory as a base64 body plus MIME type and rendered
//! as a data URI for the vision providers. Each new upload replaces the
//! previous payload wholesale; no history is kept.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::error::CoinError;

/// Maximum accepted upload size: 20 MiB.
pub const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

/// An in-memory image, base64-encoded with its MIME type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImagePayload {
    /// MIME type, always `image/*`.
    pub mime_type: String,
    /// Base64 body (standard alphabet, padded).
    pub data: String,
    /// Decoded size in bytes.
    pub byte_len: usize,
}

impl ImagePayload {
    /// Validate and encode raw bytes into a payload.
    ///
    /// Rejects non-image MIME types and anything over [`MAX_IMAGE_BYTES`].
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Result<Self, CoinError> {
        if !mime_type.starts_with("image/") {
            return Err(CoinError::Validation("unsupported type".to_string()));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(CoinError::Validation("too large".to_string()));
        }
        Ok(Self {
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
            byte_len: bytes.len(),
        })
    }

    /// Render as a `data:<mime>;base64,<body>` URI.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Detect an image MIME type by file extension.
///
/// Returns `None` for anything that is not a recognized image extension.
pub fn detect_image_mime(path: &Path) -> Option<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png"          => Some("image/png"),
        "gif"          => Some("image/gif"),
        "webp"         => Some("image/webp"),
        "bmp"          => Some("image/bmp"),
        "tiff" | "tif" => Some("image/tiff"),
        _              => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn encodes_small_image() {
        let payload = ImagePayload::from_bytes("image/png", &[1, 2, 3]).unwrap();
        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(payload.byte_len, 3);
        assert_eq!(payload.data_uri(), "data:image/png;base64,AQID");
    }

    #[test]
    fn rejects_non_image_mime() {
        let err = ImagePayload::from_bytes("text/plain", b"hello").unwrap_err();
        assert_eq!(err, CoinError::Validation("unsupported type".to_string()));
    }

    #[test]
    fn rejects_oversized_image() {
        let bytes = vec![0u8; 25 * 1024 * 1024];
        let err = ImagePayload::from_bytes("image/jpeg", &bytes).unwrap_err();
        assert_eq!(err, CoinError::Validation("too large".to_string()));
    }

    #[test]
    fn accepts_exactly_20_mib() {
        let bytes = vec![0u8; MAX_IMAGE_BYTES];
        assert!(ImagePayload::from_bytes("image/jpeg", &bytes).is_ok());
    }

    #[test]
    fn detects_jpeg_extension() {
        assert_eq!(
            detect_image_mime(&PathBuf::from("photo.JPG")),
            Some("image/jpeg")
        );
    }

    #[test]
    fn unknown_extension_is_none() {
        assert_eq!(detect_image_mime(&PathBuf::from("notes.txt")), None);
    }
}
