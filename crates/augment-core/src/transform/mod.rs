//! Pixel transforms: crop, rotation and negative.
//!
//! Resize lives with the decoder (see [`crate::decode::resize`]) since it
//! is a resampling of decoded pixels rather than a geometric edit.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downwards
//! - Crop bounds are pixel indices, half-open on the end side
//! - Rotation angles are in degrees, positive = counter-clockwise

mod crop;
mod error;
mod negative;
mod rotation;

pub use crop::apply_crop;
pub use error::TransformError;
pub use negative::{apply_negative, inverted_region};
pub use rotation::{apply_rotation, rotated_canvas, rotation_matrix, AffineMatrix};
