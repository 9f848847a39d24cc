//! Shared pixel container and decode-side types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures while turning a payload into pixels.
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    /// The transport payload is not valid base64.
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),

    /// Right signature, undecodable body.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// Requested output dimensions are unusable.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Requested output exceeds the pixel budget.
    #[error("Output of {width}x{height} exceeds the limit of {max_pixels} pixels")]
    TooLarge {
        width: u32,
        height: u32,
        max_pixels: u64,
    },
}

/// Interpolation mode for resize operations.
///
/// Parsed from the names `INTER_NEAREST`, `INTER_LINEAR`, `INTER_AREA`,
/// `INTER_CUBIC` and `INTER_LANCZOS4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interpolation {
    /// Nearest neighbor.
    Nearest,
    /// Bilinear interpolation.
    #[default]
    Linear,
    /// Resampling by pixel area relation (box average).
    Area,
    /// Bicubic interpolation over a 4x4 neighborhood.
    Cubic,
    /// Lanczos interpolation.
    Lanczos,
}

impl Interpolation {
    /// All modes, in declaration order.
    pub const ALL: [Interpolation; 5] = [
        Interpolation::Nearest,
        Interpolation::Linear,
        Interpolation::Area,
        Interpolation::Cubic,
        Interpolation::Lanczos,
    ];

    /// Parse an interpolation name.
    ///
    /// Unknown or absent names fall back to [`Interpolation::Linear`].
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some("INTER_NEAREST") => Interpolation::Nearest,
            Some("INTER_AREA") => Interpolation::Area,
            Some("INTER_CUBIC") => Interpolation::Cubic,
            Some("INTER_LANCZOS4") => Interpolation::Lanczos,
            _ => Interpolation::Linear,
        }
    }

    /// The query-parameter name of this mode.
    pub fn name(self) -> &'static str {
        match self {
            Interpolation::Nearest => "INTER_NEAREST",
            Interpolation::Linear => "INTER_LINEAR",
            Interpolation::Area => "INTER_AREA",
            Interpolation::Cubic => "INTER_CUBIC",
            Interpolation::Lanczos => "INTER_LANCZOS4",
        }
    }

    /// Convert to the image crate's FilterType.
    ///
    /// `Area` has no counterpart in the image crate and is resampled by
    /// [`resize`](super::resize) itself, so it returns `None`.
    pub fn to_image_filter(self) -> Option<image::imageops::FilterType> {
        match self {
            Interpolation::Nearest => Some(image::imageops::FilterType::Nearest),
            Interpolation::Linear => Some(image::imageops::FilterType::Triangle),
            Interpolation::Cubic => Some(image::imageops::FilterType::CatmullRom),
            Interpolation::Lanczos => Some(image::imageops::FilterType::Lanczos3),
            Interpolation::Area => None,
        }
    }
}

/// Packed 8-bit RGB raster, row-major, three bytes per pixel.
///
/// Every transform consumes and produces this type. Alpha and palette
/// inputs are flattened to RGB when decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// `width * height * 3` bytes.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 3,
            "RGB buffer does not match {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Copy into an `RgbImage`, or `None` if the buffer length is wrong.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Byte offset of the pixel at `(x, y)`.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 3
    }

    /// The RGB triple at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = self.index(x, y);
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
