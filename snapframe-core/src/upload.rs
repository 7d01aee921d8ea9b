//! Screenshot upload validation.
//!
//! Runs before any file bytes are read or decoded, so a rejected upload
//! never touches the scene.

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 8 * 1024 * 1024;

#[derive(Clone, Copy, Debug)]
pub struct UploadLimits {
    pub max_bytes: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// User-facing rejection reasons; the messages are shown as-is.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadError {
    #[error("please select a valid image file")]
    NotAnImage,
    #[error("image file is too large, the limit is {limit_bytes} bytes")]
    TooLarge { limit_bytes: u64 },
}

/// Validate a candidate upload by its reported mime type and byte length.
pub fn validate_upload(mime: &str, len_bytes: u64, limits: &UploadLimits) -> Result<(), UploadError> {
    if !mime.starts_with("image/") {
        return Err(UploadError::NotAnImage);
    }
    if len_bytes > limits.max_bytes {
        return Err(UploadError::TooLarge {
            limit_bytes: limits.max_bytes,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_reasonable_images() {
        let limits = UploadLimits::default();
        assert!(validate_upload("image/png", 1024, &limits).is_ok());
        assert!(validate_upload("image/jpeg", DEFAULT_MAX_UPLOAD_BYTES, &limits).is_ok());
    }

    #[test]
    fn rejects_non_images() {
        let limits = UploadLimits::default();
        assert_eq!(validate_upload("application/pdf", 10, &limits), Err(UploadError::NotAnImage));
        assert_eq!(validate_upload("", 10, &limits), Err(UploadError::NotAnImage));
    }

    #[test]
    fn rejects_oversized_files() {
        let limits = UploadLimits { max_bytes: 100 };
        assert_eq!(
            validate_upload("image/png", 101, &limits),
            Err(UploadError::TooLarge { limit_bytes: 100 })
        );
    }
}
