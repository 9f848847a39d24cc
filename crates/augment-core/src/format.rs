//! Container format detection.
//!
//! Every operation runs [`detect_format`] on the decoded payload before any
//! pixel work happens, so the same bytes are accepted or rejected the same
//! way regardless of which transform was requested.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::decode_base64;

/// Container formats the engine accepts and re-encodes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Bmp,
}

/// The accepted set, in the order it is reported to callers.
pub const ACCEPTED_FORMATS: [ImageFormat; 3] = [ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::Bmp];

impl ImageFormat {
    /// Lowercase container name (`jpeg`, `png`, `bmp`).
    pub fn name(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
            ImageFormat::Bmp => "bmp",
        }
    }

    /// The image crate's format value.
    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
        }
    }

    fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Jpeg => Some(ImageFormat::Jpeg),
            image::ImageFormat::Png => Some(ImageFormat::Png),
            image::ImageFormat::Bmp => Some(ImageFormat::Bmp),
            _ => None,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned by the format gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The payload is not one of the accepted containers.
    #[error("'{detected}' format is not accepted. Accepted file formats: {}", join_names(.accepted))]
    WrongFormat {
        /// Sniffed container name, or `unknown`.
        detected: String,
        accepted: Vec<ImageFormat>,
    },
}

impl FormatError {
    fn wrong(detected: impl Into<String>) -> Self {
        FormatError::WrongFormat {
            detected: detected.into(),
            accepted: ACCEPTED_FORMATS.to_vec(),
        }
    }

    /// The detected container name carried by the error.
    pub fn detected(&self) -> &str {
        match self {
            FormatError::WrongFormat { detected, .. } => detected,
        }
    }
}

fn join_names(formats: &[ImageFormat]) -> String {
    formats
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Detect the container format of raw image bytes from their signature.
///
/// # Errors
///
/// Returns [`FormatError::WrongFormat`] when the signature is not JPEG, PNG
/// or BMP. The error names the detected container (`gif`, `webp`, ...) or
/// `unknown` when no signature matches.
pub fn detect_format(bytes: &[u8]) -> Result<ImageFormat, FormatError> {
    let guessed = image::guess_format(bytes).map_err(|_| FormatError::wrong("unknown"))?;

    ImageFormat::from_image_format(guessed).ok_or_else(|| FormatError::wrong(container_name(guessed)))
}

/// Decode the base64 transport encoding and detect the container format.
///
/// Returns the decoded bytes alongside the format so callers do not decode
/// the payload twice. A payload that is not valid base64 is reported as an
/// `unknown` format.
pub fn detect_encoded_format(encoded: &str) -> Result<(ImageFormat, Vec<u8>), FormatError> {
    let bytes = decode_base64(encoded).map_err(|_| FormatError::wrong("unknown"))?;
    let format = detect_format(&bytes)?;
    Ok((format, bytes))
}

fn container_name(format: image::ImageFormat) -> &'static str {
    match format {
        image::ImageFormat::Jpeg => "jpeg",
        other => other.extensions_str().first().copied().unwrap_or("unknown"),
    }
}
