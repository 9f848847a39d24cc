//! Negative (channel inversion).
//!
//! Every channel of every pixel becomes `255 - value`, with one documented
//! exception: the last row and the last column are left as they are. The
//! inverted region is `[0, width - 1) × [0, height - 1)`. Clients already
//! depend on this framing, so it is kept bit-for-bit.

use crate::decode::DecodedImage;

/// Invert the image, leaving the last row and last column untouched.
///
/// Images with a width or height of 1 (or 0) are returned unchanged.
///
/// # Example
///
/// ```ignore
/// use augment_core::transform::apply_negative;
///
/// let inverted = apply_negative(&image);
/// assert_eq!(inverted.pixel(0, 0)[0], 255 - image.pixel(0, 0)[0]);
/// ```
pub fn apply_negative(image: &DecodedImage) -> DecodedImage {
    let mut output = image.clone();
    let (inner_w, inner_h) = inverted_region(image.width, image.height);

    tracing::debug!(
        width = image.width,
        height = image.height,
        inner_w,
        inner_h,
        "Inverting image"
    );

    let row_bytes = image.width as usize * 3;
    let inner_bytes = inner_w as usize * 3;

    for row in output.pixels.chunks_exact_mut(row_bytes.max(1)).take(inner_h as usize) {
        for value in &mut row[..inner_bytes] {
            *value = 255 - *value;
        }
    }

    output
}

/// Size `(width, height)` of the top-left region that gets inverted.
pub fn inverted_region(width: u32, height: u32) -> (u32, u32) {
    (width.saturating_sub(1), height.saturating_sub(1))
}
