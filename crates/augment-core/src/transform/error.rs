use thiserror::Error;

/// Errors produced by the pixel transforms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The crop window is empty after clamping to the image bounds.
    #[error("Crop window x [{x_begin}, {x_end}) y [{y_begin}, {y_end}) is empty for a {width}x{height} image")]
    EmptyCrop {
        x_begin: u32,
        x_end: u32,
        y_begin: u32,
        y_end: u32,
        width: u32,
        height: u32,
    },

    /// The source image has no pixels.
    #[error("Cannot transform an empty image")]
    EmptyImage,
}
