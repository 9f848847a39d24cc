//! Server configuration loaded from the environment.

use augment_core::decode::DEFAULT_MAX_OUTPUT_PIXELS;
use augment_core::encode::DEFAULT_JPEG_QUALITY;
use augment_core::EncodeOptions;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MAX_BODY_BYTES: usize = 32 * 1024 * 1024;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body. Base64 payloads are about 4/3 the size
    /// of the image file.
    pub max_body_bytes: usize,
    /// JPEG re-encoding quality (1-100).
    pub jpeg_quality: u8,
    /// Largest `width * height` a resize may produce.
    pub max_output_pixels: u64,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            max_output_pixels: DEFAULT_MAX_OUTPUT_PIXELS,
            log_level: DEFAULT_LOG_LEVEL.into(),
        }
    }
}

impl ServerConfig {
    /// Load from `AUGMENT_*` environment variables, after an optional `.env`.
    pub fn from_env() -> Self {
        // Runs before tracing is installed, so a missing or bad .env is silent
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Malformed values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let g = |key: &str| -> String { lookup(key).unwrap_or_default().trim().to_string() };

        let host = g("AUGMENT_HOST");
        let log_level = g("AUGMENT_LOG_LEVEL");

        Self {
            host: if host.is_empty() { DEFAULT_HOST.into() } else { host },
            port: parse_u16(&g("AUGMENT_PORT"), DEFAULT_PORT),
            max_body_bytes: parse_usize(&g("AUGMENT_MAX_BODY_BYTES"), DEFAULT_MAX_BODY_BYTES),
            jpeg_quality: parse_quality(&g("AUGMENT_JPEG_QUALITY"), DEFAULT_JPEG_QUALITY),
            max_output_pixels: parse_pixel_budget(
                &g("AUGMENT_MAX_OUTPUT_PIXELS"),
                DEFAULT_MAX_OUTPUT_PIXELS,
            ),
            log_level: if log_level.is_empty() {
                DEFAULT_LOG_LEVEL.into()
            } else {
                log_level
            },
        }
    }

    /// Socket address string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            jpeg_quality: self.jpeg_quality,
            max_output_pixels: self.max_output_pixels,
        }
    }
}

fn parse_u16(s: &str, default: u16) -> u16 {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}

fn parse_usize(s: &str, default: usize) -> usize {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}

fn parse_pixel_budget(s: &str, default: u64) -> u64 {
    if s.is_empty() {
        return default;
    }
    match s.parse::<u64>() {
        Ok(p) if p > 0 => p,
        _ => default,
    }
}

fn parse_quality(s: &str, default: u8) -> u8 {
    if s.is_empty() {
        return default;
    }
    match s.parse::<u8>() {
        Ok(q) if (1..=100).contains(&q) => q,
        _ => default,
    }
}
