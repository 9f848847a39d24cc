//! Image encoding pipeline.
//!
//! This module provides functionality for:
//! - Encoding RGB images to JPEG (configurable quality), PNG or BMP
//! - Encoding container bytes to base64 for transport
//!
//! # Examples
//!
//! ```ignore
//! use augment_core::encode::{encode_base64, encode_image, EncodeOptions};
//! use augment_core::format::ImageFormat;
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let image = DecodedImage::new(100, 100, pixels);
//! let bytes = encode_image(&image, ImageFormat::Jpeg, &EncodeOptions::default()).unwrap();
//! let text = encode_base64(&bytes);
//! ```

mod codec;

pub use codec::{encode_base64, encode_image, EncodeError, EncodeOptions, DEFAULT_JPEG_QUALITY};
