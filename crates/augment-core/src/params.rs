//! Per-operation parameter records.
//!
//! Each operation normalizes its raw query values in one place. Optional
//! parameters are validated permissively: malformed values fall back to the
//! documented default instead of failing. Required parameters are strict:
//! when they cannot be established, `from_query` returns `None` and the
//! caller reports missing input.

use crate::decode::Interpolation;

/// Parse a plain unsigned decimal (`[0-9]+`).
///
/// Signs, whitespace, decimals and overflow all count as "not given".
fn parse_digits(raw: Option<&str>) -> Option<u32> {
    let raw = raw?;
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Resize parameters.
///
/// Defaults: an unset axis keeps the source dimension; interpolation is
/// linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeParams {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub interpolation: Interpolation,
}

impl ResizeParams {
    /// Normalize raw query values.
    ///
    /// `width`/`height` must be positive plain integers to count as given;
    /// anything else (including `0`) is treated as unset. Returns `None` when
    /// neither axis is given.
    pub fn from_query(
        width: Option<&str>,
        height: Option<&str>,
        interpolation: Option<&str>,
    ) -> Option<Self> {
        let width = parse_digits(width).filter(|&w| w > 0);
        let height = parse_digits(height).filter(|&h| h > 0);
        if width.is_none() && height.is_none() {
            return None;
        }

        Some(Self {
            width,
            height,
            interpolation: Interpolation::from_name(interpolation),
        })
    }

    /// Target `(width, height)` for a source of the given size.
    pub fn resolve(&self, src_width: u32, src_height: u32) -> (u32, u32) {
        (
            self.width.unwrap_or(src_width),
            self.height.unwrap_or(src_height),
        )
    }
}

/// Crop parameters.
///
/// Defaults: the window covers the entire image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CropParams {
    pub x_begin: u32,
    pub x_end: Option<u32>,
    pub y_begin: u32,
    pub y_end: Option<u32>,
}

impl CropParams {
    /// Normalize raw query values. Every bound is optional.
    pub fn from_query(
        x_begin: Option<&str>,
        x_end: Option<&str>,
        y_begin: Option<&str>,
        y_end: Option<&str>,
    ) -> Self {
        Self {
            x_begin: parse_digits(x_begin).unwrap_or(0),
            x_end: parse_digits(x_end),
            y_begin: parse_digits(y_begin).unwrap_or(0),
            y_end: parse_digits(y_end),
        }
    }

    /// Concrete `(x_begin, x_end, y_begin, y_end)` for an image of the given size.
    ///
    /// Ends default to the image size; no clamping happens here.
    pub fn resolve(&self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        (
            self.x_begin,
            self.x_end.unwrap_or(width),
            self.y_begin,
            self.y_end.unwrap_or(height),
        )
    }
}

/// Default rotation scale.
pub const DEFAULT_SCALE: f64 = 1.0;

/// Rotation parameters. The angle is required and never zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateParams {
    pub angle: i64,
    pub scale: f64,
}

impl RotateParams {
    /// Normalize raw query values.
    ///
    /// An angle that does not parse as an integer counts as `0`, and a zero
    /// angle counts as not given, so both return `None`. A scale that does not
    /// parse, or is not finite, falls back to `1.0`.
    pub fn from_query(angle: Option<&str>, scale: Option<&str>) -> Option<Self> {
        let angle = angle
            .and_then(|a| a.trim().parse::<i64>().ok())
            .unwrap_or(0);
        if angle == 0 {
            return None;
        }

        let scale = scale
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|s| s.is_finite())
            .unwrap_or(DEFAULT_SCALE);

        Some(Self { angle, scale })
    }

    /// The angle reduced modulo 360, keeping its sign.
    pub fn normalized_degrees(&self) -> f64 {
        (self.angle % 360) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_digits() {
        assert_eq!(parse_digits(Some("42")), Some(42));
        assert_eq!(parse_digits(Some("007")), Some(7));
        assert_eq!(parse_digits(Some("0")), Some(0));
        assert_eq!(parse_digits(Some("")), None);
        assert_eq!(parse_digits(Some("-3")), None);
        assert_eq!(parse_digits(Some("+3")), None);
        assert_eq!(parse_digits(Some(" 3")), None);
        assert_eq!(parse_digits(Some("3.5")), None);
        assert_eq!(parse_digits(Some("abc")), None);
        assert_eq!(parse_digits(Some("99999999999")), None);
        assert_eq!(parse_digits(None), None);
    }

    #[test]
    fn test_resize_requires_one_axis() {
        assert_eq!(ResizeParams::from_query(None, None, None), None);
        assert_eq!(ResizeParams::from_query(Some("abc"), Some("-1"), None), None);
        assert_eq!(ResizeParams::from_query(Some("0"), Some("0"), None), None);
    }

    #[test]
    fn test_resize_single_axis_keeps_other() {
        let params = ResizeParams::from_query(Some("64"), None, None).unwrap();
        assert_eq!(params.resolve(200, 100), (64, 100));

        let params = ResizeParams::from_query(Some("bogus"), Some("30"), None).unwrap();
        assert_eq!(params.resolve(200, 100), (200, 30));
    }

    #[test]
    fn test_resize_zero_axis_is_unset() {
        let params = ResizeParams::from_query(Some("0"), Some("30"), None).unwrap();
        assert_eq!(params.width, None);
        assert_eq!(params.resolve(200, 100), (200, 30));
    }

    #[test]
    fn test_resize_interpolation() {
        let params = ResizeParams::from_query(Some("1"), Some("1"), Some("INTER_AREA")).unwrap();
        assert_eq!(params.interpolation, Interpolation::Area);

        let params = ResizeParams::from_query(Some("1"), Some("1"), Some("fancy")).unwrap();
        assert_eq!(params.interpolation, Interpolation::Linear);
    }

    #[test]
    fn test_crop_defaults_cover_image() {
        let params = CropParams::from_query(None, None, None, None);
        assert_eq!(params, CropParams::default());
        assert_eq!(params.resolve(640, 480), (0, 640, 0, 480));
    }

    #[test]
    fn test_crop_malformed_bounds_fall_back() {
        let params = CropParams::from_query(Some("x"), Some("-5"), Some("10"), Some("2.5"));
        assert_eq!(params.resolve(50, 40), (0, 50, 10, 40));
    }

    #[test]
    fn test_crop_explicit_bounds() {
        let params = CropParams::from_query(Some("5"), Some("15"), Some("2"), Some("12"));
        assert_eq!(params.resolve(50, 40), (5, 15, 2, 12));
    }

    #[test]
    fn test_rotate_requires_nonzero_angle() {
        assert_eq!(RotateParams::from_query(None, None), None);
        assert_eq!(RotateParams::from_query(Some("0"), None), None);
        assert_eq!(RotateParams::from_query(Some("-0"), None), None);
        assert_eq!(RotateParams::from_query(Some("ninety"), Some("2")), None);
        assert_eq!(RotateParams::from_query(Some("12.5"), None), None);
    }

    #[test]
    fn test_rotate_angle_parsing() {
        let params = RotateParams::from_query(Some("-90"), None).unwrap();
        assert_eq!(params.angle, -90);
        assert_eq!(params.scale, DEFAULT_SCALE);

        let params = RotateParams::from_query(Some(" +45 "), None).unwrap();
        assert_eq!(params.angle, 45);
    }

    #[test]
    fn test_rotate_angle_beyond_32_bits() {
        let params = RotateParams::from_query(Some("5000000000"), None).unwrap();
        assert_eq!(params.angle, 5_000_000_000);
        assert_eq!(params.normalized_degrees(), 320.0);

        let params = RotateParams::from_query(Some("-3600000090"), None).unwrap();
        assert_eq!(params.normalized_degrees(), -90.0);
    }

    #[test]
    fn test_rotate_scale_fallback() {
        let params = RotateParams::from_query(Some("30"), Some("0.5")).unwrap();
        assert_eq!(params.scale, 0.5);

        let params = RotateParams::from_query(Some("30"), Some("big")).unwrap();
        assert_eq!(params.scale, 1.0);

        let params = RotateParams::from_query(Some("30"), Some("inf")).unwrap();
        assert_eq!(params.scale, 1.0);

        let params = RotateParams::from_query(Some("30"), Some("NaN")).unwrap();
        assert_eq!(params.scale, 1.0);

        let params = RotateParams::from_query(Some("30"), Some("2")).unwrap();
        assert_eq!(params.scale, 2.0);
    }
}
