//! Image decoding pipeline.
//!
//! This module provides functionality for:
//! - Decoding the base64 transport encoding
//! - Decoding JPEG, PNG and BMP containers to RGB pixels
//! - Resizing with the five supported interpolation modes
//!
//! # Examples
//!
//! ```ignore
//! use augment_core::decode::{decode_base64, decode_image};
//! use augment_core::format::detect_format;
//!
//! let bytes = decode_base64(&payload)?;
//! let format = detect_format(&bytes)?;
//! let image = decode_image(&bytes, format)?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod codec;
mod resize;
mod types;

pub use codec::{decode_base64, decode_image};
pub use resize::{resize, resize_within, DEFAULT_MAX_OUTPUT_PIXELS};
pub use types::{DecodeError, DecodedImage, Interpolation};
