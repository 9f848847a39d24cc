//! Image cropping by pixel bounds.
//!
//! The window is half-open: `[x_begin, x_end) × [y_begin, y_end)`.
//!
//! # Bounds policy
//!
//! - Every bound is clamped to `[0, width]` / `[0, height]`
//! - Inverted or fully out-of-range bounds leave an empty window, which is
//!   an error (no container can hold a zero-sized image)
//! - Full bounds `(0, width, 0, height)` return a copy of the original image
//!
//! # Example
//!
//! ```ignore
//! // Keep the left half of a 100x100 image
//! let cropped = apply_crop(&image, 0, 50, 0, 100)?;
//! ```

use super::TransformError;
use crate::decode::DecodedImage;

/// Apply a crop to an image using pixel coordinates.
///
/// # Arguments
///
/// * `image` - Source image to crop
/// * `x_begin` - First column kept
/// * `x_end` - One past the last column kept
/// * `y_begin` - First row kept
/// * `y_end` - One past the last row kept
///
/// # Errors
///
/// Returns `TransformError::EmptyCrop` when the clamped window has no pixels.
///
/// # Example
///
/// ```ignore
/// use augment_core::decode::DecodedImage;
/// use augment_core::transform::apply_crop;
///
/// let pixels = vec![128u8; 100 * 100 * 3];
/// let image = DecodedImage::new(100, 100, pixels);
///
/// let cropped = apply_crop(&image, 25, 75, 25, 75).unwrap();
/// assert_eq!(cropped.width, 50);
/// assert_eq!(cropped.height, 50);
/// ```
pub fn apply_crop(
    image: &DecodedImage,
    x_begin: u32,
    x_end: u32,
    y_begin: u32,
    y_end: u32,
) -> Result<DecodedImage, TransformError> {
    let x_begin = x_begin.min(image.width);
    let x_end = x_end.min(image.width);
    let y_begin = y_begin.min(image.height);
    let y_end = y_end.min(image.height);

    if x_begin >= x_end || y_begin >= y_end {
        return Err(TransformError::EmptyCrop {
            x_begin,
            x_end,
            y_begin,
            y_end,
            width: image.width,
            height: image.height,
        });
    }

    tracing::debug!(x_begin, x_end, y_begin, y_end, "Cropping image");

    // Fast path: full crop returns a clone
    if x_begin == 0 && y_begin == 0 && x_end == image.width && y_end == image.height {
        return Ok(image.clone());
    }

    let out_width = x_end - x_begin;
    let out_height = y_end - y_begin;
    let row_bytes = out_width as usize * 3;

    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    // Copy pixel data row by row
    for src_y in y_begin..y_end {
        let start = image.index(x_begin, src_y);
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    Ok(DecodedImage {
        width: out_width,
        height: out_height,
        pixels: output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Grayscale ramp: the pixel at `(x, y)` holds `(y * width + x) % 256`.
    fn ramp(width: u32, height: u32) -> DecodedImage {
        let pixels = (0..width * height)
            .flat_map(|i| [(i % 256) as u8; 3])
            .collect();
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_full_bounds_copy_image() {
        let img = ramp(100, 80);
        assert_eq!(apply_crop(&img, 0, 100, 0, 80).unwrap(), img);
    }

    #[test]
    fn test_window_size() {
        let img = ramp(200, 100);

        let strip = apply_crop(&img, 0, 50, 0, 100).unwrap();
        assert_eq!((strip.width, strip.height), (50, 100));

        let band = apply_crop(&img, 0, 200, 40, 60).unwrap();
        assert_eq!((band.width, band.height), (200, 20));
    }

    #[test]
    fn test_inner_window_pixel_values() {
        let img = ramp(10, 10);
        let result = apply_crop(&img, 2, 8, 3, 9).unwrap();

        assert_eq!(result.width, 6);
        assert_eq!(result.height, 6);

        // (2, 3) and (7, 8) in the source
        assert_eq!(result.pixel(0, 0), [32, 32, 32]);
        assert_eq!(result.pixel(5, 5), [87, 87, 87]);
    }

    #[test]
    fn test_crop_single_pixel() {
        let img = ramp(10, 10);
        let result = apply_crop(&img, 4, 5, 6, 7).unwrap();

        assert_eq!((result.width, result.height), (1, 1));
        assert_eq!(result.pixels, vec![64, 64, 64]);
    }

    #[test]
    fn test_crop_clamps_oversized_end() {
        let img = ramp(10, 10);
        let result = apply_crop(&img, 8, 500, 0, 1000).unwrap();

        assert_eq!(result.width, 2);
        assert_eq!(result.height, 10);
        assert_eq!(result.pixel(0, 0), [8, 8, 8]);
    }

    #[test]
    fn test_crop_inverted_bounds_is_empty() {
        let img = ramp(10, 10);
        let err = apply_crop(&img, 7, 3, 0, 10).unwrap_err();

        assert!(matches!(
            err,
            TransformError::EmptyCrop {
                x_begin: 7,
                x_end: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_crop_equal_bounds_is_empty() {
        let img = ramp(10, 10);
        assert!(apply_crop(&img, 0, 10, 5, 5).is_err());
    }

    #[test]
    fn test_crop_begin_past_edge_is_empty() {
        let img = ramp(10, 10);
        let err = apply_crop(&img, 20, 30, 0, 10).unwrap_err();

        // Both bounds clamp to the width, leaving nothing
        assert_eq!(
            err,
            TransformError::EmptyCrop {
                x_begin: 10,
                x_end: 10,
                y_begin: 0,
                y_end: 10,
                width: 10,
                height: 10,
            }
        );
    }
}
