//! Augmentation server binary.

use tracing_subscriber::EnvFilter;

use augment_server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        jpeg_quality = config.jpeg_quality,
        max_body_bytes = config.max_body_bytes,
        "Starting augmentation server"
    );

    augment_server::start_server(config).await
}
