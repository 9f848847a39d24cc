//! Request and response bodies.

use serde::{Deserialize, Serialize};

/// JSON body carried by every augmentation request.
#[derive(Debug, Default, Deserialize)]
pub struct ImagePayload {
    #[serde(default)]
    pub image: Option<String>,
}

impl ImagePayload {
    /// Extract the base64 image from a raw request body.
    ///
    /// An empty body, a body that is not a JSON object, a missing or
    /// non-string `image` field, and a blank `image` all count as no image.
    pub fn image_from_body(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<ImagePayload>(body)
            .ok()?
            .image
            .filter(|image| !image.trim().is_empty())
    }
}

/// Successful augmentation result.
#[derive(Debug, Serialize, Deserialize)]
pub struct ImageResponse {
    pub image: String,
}

/// Raw query pairs in request order.
///
/// Values stay strings; normalization happens in the core params. A key
/// given more than once resolves to its last value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams(pub Vec<(String, String)>);

impl QueryParams {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_from_body() {
        assert_eq!(
            ImagePayload::image_from_body(br#"{"image":"aGVsbG8="}"#),
            Some("aGVsbG8=".to_string())
        );
        assert_eq!(ImagePayload::image_from_body(b""), None);
        assert_eq!(ImagePayload::image_from_body(b"not json"), None);
        assert_eq!(ImagePayload::image_from_body(b"{}"), None);
        assert_eq!(ImagePayload::image_from_body(br#"{"image":""}"#), None);
        assert_eq!(ImagePayload::image_from_body(br#"{"image":"  "}"#), None);
        assert_eq!(ImagePayload::image_from_body(br#"{"image":42}"#), None);
        assert_eq!(ImagePayload::image_from_body(br#"{"image":null}"#), None);
    }

    #[test]
    fn test_query_params_last_value_wins() {
        let params = QueryParams(vec![
            ("width".into(), "2".into()),
            ("height".into(), "9".into()),
            ("width".into(), "3".into()),
        ]);

        assert_eq!(params.get("width"), Some("3"));
        assert_eq!(params.get("height"), Some("9"));
        assert_eq!(params.get("angle"), None);
        assert_eq!(QueryParams::default().get("width"), None);
    }

    #[test]
    fn test_image_from_body_ignores_extra_fields() {
        let body = br#"{"image":"abc","name":"photo.png"}"#;
        assert_eq!(ImagePayload::image_from_body(body), Some("abc".to_string()));
    }
}
