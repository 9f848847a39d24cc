//! Augment Core - image augmentation engine
//!
//! This crate provides the pixel work behind the augmentation service:
//! container detection, decoding and encoding of JPEG/PNG/BMP, and the
//! resize, crop, rotate and negative transforms.

pub mod augment;
pub mod decode;
pub mod encode;
pub mod format;
pub mod params;
pub mod transform;

pub use augment::{augment, AugmentError, Augmentation, Operation};
pub use encode::EncodeOptions;
pub use format::{detect_format, FormatError, ImageFormat, ACCEPTED_FORMATS};
pub use params::{CropParams, ResizeParams, RotateParams};
