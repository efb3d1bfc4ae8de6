// src/image_validator.rs
use tracing::warn;

use crate::utils::get_file_extension;

#[derive(Debug, Clone)]
pub struct ImageValidationError {
    pub source: String,
    pub error_type: ImageErrorType,
    pub message: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageErrorType {
    EmptySource,
    UnsupportedScheme,
    WrongFormat,
    TooLarge,
}

impl ImageErrorType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptySource => "IMAGE_EMPTY",
            Self::UnsupportedScheme => "IMAGE_UNSUPPORTED_SCHEME",
            Self::WrongFormat => "IMAGE_WRONG_FORMAT",
            Self::TooLarge => "IMAGE_TOO_LARGE",
        }
    }
}

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "svg"];
const DATA_URI_TYPES: [&str; 6] = [
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];
// Encoded payload limit for inline images (max 10MB)
const MAX_DATA_URI_LEN: usize = 10 * 1024 * 1024;

pub struct ImageValidator;

impl ImageValidator {
    /// Validate an image reference (photo or signature) before it is emitted.
    pub fn validate_photo_url(url: &str) -> Result<(), ImageValidationError> {
        let url = url.trim();
        let error = |error_type: ImageErrorType, message: String, suggestion: &str| {
            ImageValidationError {
                source: url.chars().take(80).collect(),
                error_type,
                message,
                suggestion: suggestion.to_string(),
            }
        };

        if url.is_empty() {
            return Err(error(
                ImageErrorType::EmptySource,
                "Image source is empty".to_string(),
                "Provide an image URL or remove the field",
            ));
        }

        let lower = url.to_lowercase();

        if lower.starts_with("https://") || lower.starts_with("http://") {
            return Ok(());
        }

        if let Some(rest) = lower.strip_prefix("data:") {
            let media_type = rest.split([';', ',']).next().unwrap_or_default();
            if !DATA_URI_TYPES.contains(&media_type) {
                return Err(error(
                    ImageErrorType::WrongFormat,
                    format!("Unsupported inline image type: {}", media_type),
                    "Use PNG, JPEG, GIF, WebP or SVG images",
                ));
            }
            if url.len() > MAX_DATA_URI_LEN {
                return Err(error(
                    ImageErrorType::TooLarge,
                    format!(
                        "Inline image too large: {:.1}MB (max 10MB)",
                        url.len() as f64 / 1024.0 / 1024.0
                    ),
                    "Please resize or compress your image and try again",
                ));
            }
            return Ok(());
        }

        // Any other explicit scheme (javascript:, file:, ...) is refused
        if let Some((scheme, _)) = lower.split_once(':') {
            if !scheme.is_empty() && scheme.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(error(
                    ImageErrorType::UnsupportedScheme,
                    format!("Unsupported image URL scheme: {}", scheme),
                    "Use an http(s) URL, a data URI or a relative path",
                ));
            }
        }

        let path = lower.split(['?', '#']).next().unwrap_or_default();
        match get_file_extension(path) {
            Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
            _ => Err(error(
                ImageErrorType::WrongFormat,
                "Image path has no recognised image extension".to_string(),
                "Please use PNG, JPEG, GIF, WebP or SVG files",
            )),
        }
    }

    /// Returns the trimmed URL when it is safe to emit, logging and dropping it otherwise.
    pub fn accept(url: Option<&str>) -> Option<&str> {
        let url = url?.trim();
        if url.is_empty() {
            return None;
        }
        match Self::validate_photo_url(url) {
            Ok(()) => Some(url),
            Err(e) => {
                warn!(
                    code = e.error_type.code(),
                    "Dropping image '{}': {}", e.source, e.message
                );
                None
            }
        }
    }
}
