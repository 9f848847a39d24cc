//! End-to-end augmentation pipeline.
//!
//! Every operation runs the same five steps on a base64 payload:
//! detect the container, decode it, apply the transform, re-encode into the
//! detected container, and base64 the result.

use std::fmt;

use thiserror::Error;

use crate::decode::{decode_image, resize_within, DecodeError, DecodedImage};
use crate::encode::{encode_base64, encode_image, EncodeError, EncodeOptions};
use crate::format::{detect_encoded_format, FormatError};
use crate::params::{CropParams, ResizeParams, RotateParams};
use crate::transform::{apply_crop, apply_negative, apply_rotation, TransformError};

/// The four augmentation endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Resize,
    Crop,
    Rotate,
    Negative,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Resize => "resize",
            Operation::Crop => "crop",
            Operation::Rotate => "rotate",
            Operation::Negative => "negative",
        }
    }

    /// Message returned when the image or a required parameter is missing.
    ///
    /// Clients match on these strings, so they are kept exactly as published.
    pub fn missing_input_message(self) -> &'static str {
        match self {
            Operation::Resize => {
                "You must provide an image file and at least one of the following parameters: width or height."
            }
            Operation::Crop => "You must provide an image file.",
            Operation::Rotate => "You must provide an image file and an angle",
            Operation::Negative => "You must provide an image file",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Any failure of the pipeline.
#[derive(Debug, Error)]
pub enum AugmentError {
    /// The image or a required parameter was not supplied.
    #[error("{}", .0.missing_input_message())]
    MissingInput(Operation),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

impl AugmentError {
    /// Whether the request itself is at fault.
    ///
    /// Encoding failures are on our side; everything else traces back to the
    /// payload or its parameters.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AugmentError::Encode(_))
    }
}

/// A transform together with its normalized parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Augmentation {
    Resize(ResizeParams),
    Crop(CropParams),
    Rotate(RotateParams),
    Negative,
}

impl Augmentation {
    pub fn operation(&self) -> Operation {
        match self {
            Augmentation::Resize(_) => Operation::Resize,
            Augmentation::Crop(_) => Operation::Crop,
            Augmentation::Rotate(_) => Operation::Rotate,
            Augmentation::Negative => Operation::Negative,
        }
    }

    /// Apply the transform to decoded pixels.
    ///
    /// Resize targets above `options.max_output_pixels` are rejected.
    pub fn apply(
        &self,
        image: &DecodedImage,
        options: &EncodeOptions,
    ) -> Result<DecodedImage, AugmentError> {
        let output = match self {
            Augmentation::Resize(params) => {
                let (width, height) = params.resolve(image.width, image.height);
                resize_within(
                    image,
                    width,
                    height,
                    params.interpolation,
                    options.max_output_pixels,
                )?
            }
            Augmentation::Crop(params) => {
                let (x_begin, x_end, y_begin, y_end) = params.resolve(image.width, image.height);
                apply_crop(image, x_begin, x_end, y_begin, y_end)?
            }
            Augmentation::Rotate(params) => {
                apply_rotation(image, params.normalized_degrees(), params.scale)?
            }
            Augmentation::Negative => apply_negative(image),
        };
        Ok(output)
    }
}

/// Run an augmentation on a base64 payload and return the base64 result.
///
/// The output is encoded in the same container as the input.
///
/// # Errors
///
/// - `MissingInput` when `encoded` is blank
/// - `Format` when the payload is not JPEG, PNG or BMP (including payloads
///   that are not base64 at all)
/// - `Decode` when the container is corrupted or a resize target is too large
/// - `Transform` when the crop window is empty
/// - `Encode` when re-encoding fails
///
/// # Example
///
/// ```ignore
/// use augment_core::augment::{augment, Augmentation};
/// use augment_core::encode::EncodeOptions;
///
/// let inverted = augment(&payload, &Augmentation::Negative, &EncodeOptions::default())?;
/// ```
pub fn augment(
    encoded: &str,
    augmentation: &Augmentation,
    options: &EncodeOptions,
) -> Result<String, AugmentError> {
    let operation = augmentation.operation();
    if encoded.trim().is_empty() {
        return Err(AugmentError::MissingInput(operation));
    }

    let (format, bytes) = detect_encoded_format(encoded)?;
    let image = decode_image(&bytes, format)?;

    tracing::debug!(
        %operation,
        %format,
        width = image.width,
        height = image.height,
        "Running augmentation"
    );

    let output = augmentation.apply(&image, options)?;
    let encoded_output = encode_image(&output, format, options)?;

    Ok(encode_base64(&encoded_output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_base64;
    use crate::format::{detect_format, ImageFormat, ACCEPTED_FORMATS};

    fn gradient(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 255 / width.max(1)) as u8);
                pixels.push((y * 255 / height.max(1)) as u8);
                pixels.push(90);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    fn payload(image: &DecodedImage, format: ImageFormat) -> String {
        let bytes = encode_image(image, format, &EncodeOptions::default()).unwrap();
        encode_base64(&bytes)
    }

    fn decode_result(encoded: &str) -> (ImageFormat, DecodedImage) {
        let bytes = decode_base64(encoded).unwrap();
        let format = detect_format(&bytes).unwrap();
        (format, decode_image(&bytes, format).unwrap())
    }

    fn all_augmentations() -> Vec<Augmentation> {
        vec![
            Augmentation::Resize(ResizeParams::from_query(Some("12"), Some("7"), None).unwrap()),
            Augmentation::Crop(CropParams::from_query(Some("2"), Some("10"), Some("1"), Some("5"))),
            Augmentation::Rotate(RotateParams::from_query(Some("45"), None).unwrap()),
            Augmentation::Negative,
        ]
    }

    #[test]
    fn test_format_is_preserved_for_every_operation() {
        let image = gradient(16, 10);

        for format in ACCEPTED_FORMATS {
            let input = payload(&image, format);
            for augmentation in all_augmentations() {
                let output = augment(&input, &augmentation, &EncodeOptions::default()).unwrap();
                let (detected, _) = decode_result(&output);
                assert_eq!(detected, format, "{:?} on {}", augmentation, format);
            }
        }
    }

    #[test]
    fn test_output_dimensions() {
        let input = payload(&gradient(16, 10), ImageFormat::Png);
        let expected = [(12, 7), (8, 4), (10, 16), (16, 10)];

        for (augmentation, dims) in all_augmentations().iter().zip(expected) {
            let output = augment(&input, augmentation, &EncodeOptions::default()).unwrap();
            let (_, decoded) = decode_result(&output);
            assert_eq!((decoded.width, decoded.height), dims, "{:?}", augmentation);
        }
    }

    #[test]
    fn test_lossless_negative_round_trip() {
        let image = gradient(9, 9);
        let input = payload(&image, ImageFormat::Bmp);

        let once = augment(&input, &Augmentation::Negative, &EncodeOptions::default()).unwrap();
        let twice = augment(&once, &Augmentation::Negative, &EncodeOptions::default()).unwrap();

        let (_, decoded) = decode_result(&twice);
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_full_crop_is_identical_for_png() {
        let image = gradient(11, 6);
        let input = payload(&image, ImageFormat::Png);
        let crop = Augmentation::Crop(CropParams::default());

        let output = augment(&input, &crop, &EncodeOptions::default()).unwrap();
        let (_, decoded) = decode_result(&output);
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_plain_text_is_rejected_as_unknown_format() {
        let input = encode_base64(b"just some text, not an image");

        for augmentation in all_augmentations() {
            let err = augment(&input, &augmentation, &EncodeOptions::default()).unwrap_err();
            assert!(matches!(err, AugmentError::Format(_)));
            assert_eq!(
                err.to_string(),
                "'unknown' format is not accepted. Accepted file formats: jpeg, png, bmp"
            );
            assert!(err.is_client_error());
        }
    }

    #[test]
    fn test_non_base64_is_rejected_as_unknown_format() {
        let err = augment("%%% not base64 %%%", &Augmentation::Negative, &EncodeOptions::default())
            .unwrap_err();
        assert!(err.to_string().starts_with("'unknown' format"));
    }

    #[test]
    fn test_gif_is_named_in_rejection() {
        let input = encode_base64(b"GIF89a\x01\x00\x01\x00\x00\x00\x00;");
        let err = augment(&input, &Augmentation::Negative, &EncodeOptions::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'gif' format is not accepted. Accepted file formats: jpeg, png, bmp"
        );
    }

    #[test]
    fn test_truncated_png_is_decode_error() {
        let full = encode_image(&gradient(8, 8), ImageFormat::Png, &EncodeOptions::default()).unwrap();
        let input = encode_base64(&full[..24]);

        let err = augment(&input, &Augmentation::Negative, &EncodeOptions::default()).unwrap_err();
        assert!(matches!(err, AugmentError::Decode(DecodeError::CorruptedFile(_))));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_blank_payload_is_missing_input() {
        for augmentation in all_augmentations() {
            let err = augment("  ", &augmentation, &EncodeOptions::default()).unwrap_err();
            assert!(matches!(err, AugmentError::MissingInput(op) if op == augmentation.operation()));
            assert_eq!(err.to_string(), augmentation.operation().missing_input_message());
        }
    }

    #[test]
    fn test_empty_crop_is_transform_error() {
        let input = payload(&gradient(10, 10), ImageFormat::Png);
        let crop = Augmentation::Crop(CropParams::from_query(Some("8"), Some("3"), None, None));

        let err = augment(&input, &crop, &EncodeOptions::default()).unwrap_err();
        assert!(matches!(err, AugmentError::Transform(TransformError::EmptyCrop { .. })));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_oversized_resize_is_client_error() {
        let input = payload(&gradient(1, 1), ImageFormat::Png);
        let huge = Augmentation::Resize(
            ResizeParams::from_query(Some("200000"), Some("200000"), None).unwrap(),
        );

        let err = augment(&input, &huge, &EncodeOptions::default()).unwrap_err();
        assert!(matches!(err, AugmentError::Decode(DecodeError::TooLarge { .. })));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_output_pixel_budget_is_configurable() {
        let input = payload(&gradient(4, 4), ImageFormat::Bmp);
        let resize = Augmentation::Resize(ResizeParams::from_query(Some("10"), Some("10"), None).unwrap());
        let tight = EncodeOptions {
            max_output_pixels: 99,
            ..EncodeOptions::default()
        };

        assert!(augment(&input, &resize, &tight).is_err());
        assert!(augment(&input, &resize, &EncodeOptions::default()).is_ok());
    }

    #[test]
    fn test_encode_error_is_server_side() {
        let err = AugmentError::from(EncodeError::InvalidDimensions { width: 0, height: 0 });
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_missing_input_messages() {
        assert_eq!(
            Operation::Resize.missing_input_message(),
            "You must provide an image file and at least one of the following parameters: width or height."
        );
        assert_eq!(Operation::Crop.missing_input_message(), "You must provide an image file.");
        assert_eq!(
            Operation::Rotate.missing_input_message(),
            "You must provide an image file and an angle"
        );
        assert_eq!(Operation::Negative.missing_input_message(), "You must provide an image file");
    }
}
