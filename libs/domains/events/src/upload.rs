//! Uploaded image validation

use crate::error::{EventError, Result};
use axum::body::Bytes;

/// Largest accepted image, 5 MiB.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub const ALLOWED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/jpg",
    "image/gif",
    "image/webp",
];

/// An image file received in a multipart request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Media type without parameters, lowercased.
    pub fn essence(&self) -> String {
        self.content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }

    /// Check the content type, then the size.
    pub fn validate(&self) -> Result<()> {
        let essence = self.essence();
        if !ALLOWED_IMAGE_TYPES.contains(&essence.as_str()) {
            return Err(EventError::InvalidImageType(self.content_type.clone()));
        }
        if self.size() > MAX_IMAGE_BYTES {
            return Err(EventError::ImageTooLarge { size: self.size() });
        }
        Ok(())
    }
}

/// Require an image and validate it.
pub fn validate_image(image: Option<ImageUpload>) -> Result<ImageUpload> {
    let image = image.ok_or(EventError::MissingImage)?;
    image.validate()?;
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(content_type: &str, size: usize) -> ImageUpload {
        ImageUpload::new("cover.png", content_type, vec![0u8; size])
    }

    #[test]
    fn test_missing_image() {
        assert!(matches!(validate_image(None), Err(EventError::MissingImage)));
    }

    #[test]
    fn test_allowed_types_pass() {
        for content_type in ALLOWED_IMAGE_TYPES {
            assert!(image(content_type, 16).validate().is_ok(), "{content_type}");
        }
        assert!(image("IMAGE/PNG; charset=binary", 16).validate().is_ok());
    }

    #[test]
    fn test_other_types_are_rejected() {
        for content_type in ["text/plain", "image/svg+xml", "application/octet-stream", ""] {
            assert!(matches!(
                image(content_type, 16).validate(),
                Err(EventError::InvalidImageType(_))
            ));
        }
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(image("image/jpeg", MAX_IMAGE_BYTES).validate().is_ok());
        assert!(matches!(
            image("image/jpeg", MAX_IMAGE_BYTES + 1).validate(),
            Err(EventError::ImageTooLarge { size }) if size == MAX_IMAGE_BYTES + 1
        ));
    }

    #[test]
    fn test_type_is_checked_before_size() {
        assert!(matches!(
            image("text/plain", MAX_IMAGE_BYTES + 1).validate(),
            Err(EventError::InvalidImageType(_))
        ));
    }
}
