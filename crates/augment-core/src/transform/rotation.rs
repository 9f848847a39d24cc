//! Image rotation about the image center with scaling.
//!
//! # Algorithm
//!
//! The forward transform is the 2x3 affine matrix
//!
//! ```text
//! α = scale·cos(θ), β = scale·sin(θ)
//! [ α  β  (1−α)·cx − β·cy ]
//! [ −β α  β·cx + (1−α)·cy ]
//! ```
//!
//! with `(cx, cy) = (width / 2, height / 2)` using integer division. The
//! rotation uses inverse mapping: every output pixel is mapped back through
//! the inverted matrix and bilinearly sampled. Samples outside the source
//! read as black.
//!
//! # Canvas
//!
//! The output canvas is `height × width` of the source: the dimensions are
//! swapped whatever the angle. Square images keep their size; non-square
//! images are clipped or padded into the swapped frame. Existing clients rely
//! on this framing, so [`rotated_canvas`] is part of the contract.

use super::TransformError;
use crate::decode::DecodedImage;

/// A 2x3 affine matrix in row-major order.
pub type AffineMatrix = [[f64; 3]; 2];

/// Output canvas dimensions `(width, height)` for a rotated image.
///
/// Always the source dimensions swapped.
///
/// # Example
///
/// ```ignore
/// use augment_core::transform::rotated_canvas;
///
/// assert_eq!(rotated_canvas(100, 50), (50, 100));
/// ```
pub fn rotated_canvas(width: u32, height: u32) -> (u32, u32) {
    (height, width)
}

/// Build the forward rotation matrix about `(cx, cy)`.
///
/// Positive angles rotate counter-clockwise as displayed (y axis pointing
/// down).
pub fn rotation_matrix(cx: f64, cy: f64, angle_degrees: f64, scale: f64) -> AffineMatrix {
    let angle_rad = angle_degrees.to_radians();
    let alpha = scale * angle_rad.cos();
    let beta = scale * angle_rad.sin();

    [
        [alpha, beta, (1.0 - alpha) * cx - beta * cy],
        [-beta, alpha, beta * cx + (1.0 - alpha) * cy],
    ]
}

/// Invert an affine matrix. Returns `None` when the determinant is exactly
/// zero (scale 0) or not finite.
fn invert_affine(m: &AffineMatrix) -> Option<AffineMatrix> {
    let [[a, b, c], [d, e, f]] = *m;
    let det = a * e - b * d;
    if det == 0.0 || !det.is_finite() {
        return None;
    }

    Some([
        [e / det, -b / det, (b * f - e * c) / det],
        [-d / det, a / det, (d * c - a * f) / det],
    ])
}

/// Rotate an image about its center by `angle_degrees` and scale it.
///
/// # Arguments
///
/// * `image` - Source image to rotate
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
/// * `scale` - Isotropic scale factor applied with the rotation
///
/// # Returns
///
/// New `DecodedImage` on the swapped canvas (see [`rotated_canvas`]).
/// A zero scale collapses the content and yields a black canvas.
///
/// # Errors
///
/// Returns `TransformError::EmptyImage` if the source has no pixels.
///
/// # Example
///
/// ```ignore
/// use augment_core::transform::apply_rotation;
///
/// let rotated = apply_rotation(&image, 90.0, 1.0)?;
/// assert_eq!((rotated.width, rotated.height), (image.height, image.width));
/// ```
pub fn apply_rotation(
    image: &DecodedImage,
    angle_degrees: f64,
    scale: f64,
) -> Result<DecodedImage, TransformError> {
    if image.is_empty() {
        return Err(TransformError::EmptyImage);
    }

    let (dst_w, dst_h) = rotated_canvas(image.width, image.height);
    let center_x = (image.width / 2) as f64;
    let center_y = (image.height / 2) as f64;

    tracing::debug!(
        angle = angle_degrees,
        scale,
        dst_w,
        dst_h,
        "Rotating image"
    );

    let forward = rotation_matrix(center_x, center_y, angle_degrees, scale);
    let mut output = vec![0u8; dst_w as usize * dst_h as usize * 3];

    let Some(inverse) = invert_affine(&forward) else {
        return Ok(DecodedImage::new(dst_w, dst_h, output));
    };
    let [[ia, ib, ic], [id, ie, if_]] = inverse;

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let (x, y) = (dst_x as f64, dst_y as f64);

            // Apply inverse transform to find source coordinates
            let src_x = ia * x + ib * y + ic;
            let src_y = id * x + ie * y + if_;

            let dst_idx = (dst_y as usize * dst_w as usize + dst_x as usize) * 3;
            let pixel = sample_bilinear(image, src_x, src_y);

            output[dst_idx..dst_idx + 3].copy_from_slice(&pixel);
        }
    }

    Ok(DecodedImage::new(dst_w, dst_h, output))
}

/// Get a pixel as [f64; 3], reading black outside the image.
#[inline]
fn get_pixel_f64(image: &DecodedImage, px: i64, py: i64) -> [f64; 3] {
    if px < 0 || py < 0 || px >= image.width as i64 || py >= image.height as i64 {
        return [0.0; 3];
    }
    let idx = image.index(px as u32, py as u32);
    [
        image.pixels[idx] as f64,
        image.pixels[idx + 1] as f64,
        image.pixels[idx + 2] as f64,
    ]
}

/// Sample a pixel using bilinear interpolation.
///
/// Bilinear interpolation considers the 4 nearest pixels and weights
/// their contribution based on distance. Neighbors outside the source
/// contribute black, so edges fade into the border instead of cutting off.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let (w, h) = (image.width as f64, image.height as f64);

    // Entirely outside, including the one-pixel fade band
    if !(x > -1.0 && x < w && y > -1.0 && y < h) {
        return [0, 0, 0];
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x0 + 1, y0);
    let p01 = get_pixel_f64(image, x0, y0 + 1);
    let p11 = get_pixel_f64(image, x0 + 1, y0 + 1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}
