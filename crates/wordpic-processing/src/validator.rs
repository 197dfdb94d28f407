use std::path::Path;

/// Accepted raster image formats for upload.
const ALLOWED_EXTENSIONS: [&str; 3] = ["jpeg", "jpg", "png"];
const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// Validation errors for candidate uploads. Messages are suitable for
/// direct user display.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Images only! File extension '{0}' is not an accepted image format (jpeg, jpg, png)")]
    InvalidExtension(String),

    #[error("Images only! Content type '{0}' is not an accepted image format (image/jpeg, image/png)")]
    InvalidContentType(String),

    #[error("Images only! Filename '{0}' has no file extension")]
    MissingExtension(String),

    #[error("File is empty")]
    EmptyFile,

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },
}

/// Upload file validator
///
/// The name extension and the declared media type must independently match
/// the raster-image allow-list. A mismatched pair (e.g. a `.png` name with
/// a non-image declared type) is rejected even though either signal alone
/// would pass, closing the gap where only one signal is checked. Pure
/// predicate, no I/O.
pub struct ImageFileValidator {
    max_file_size: usize,
}

impl ImageFileValidator {
    pub fn new(max_file_size: usize) -> Self {
        Self { max_file_size }
    }

    /// Validate declared filename and media type.
    pub fn validate(&self, filename: &str, content_type: &str) -> Result<(), ValidationError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| ValidationError::MissingExtension(filename.to_string()))?;

        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ValidationError::InvalidExtension(extension));
        }

        let normalized = content_type.to_lowercase();
        if !ALLOWED_CONTENT_TYPES.contains(&normalized.as_str()) {
            return Err(ValidationError::InvalidContentType(content_type.to_string()));
        }

        Ok(())
    }

    /// Validate payload size once it is known.
    pub fn validate_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }
        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }
        Ok(())
    }
}
