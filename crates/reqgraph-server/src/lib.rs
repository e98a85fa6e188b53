//!
//! reqgraph-server - HTTP front end for requirement graph extraction
//!
//! Exposes the extraction pipeline over JSON endpoints and backs it with the
//! Gemini text generator.

use std::sync::Arc;

/// API module
pub mod api;

/// Server module
pub mod server;

/// Configuration module
pub mod config;

/// Error module
pub mod error;

/// Gemini client module
pub mod gemini;

// Re-export key types
pub use config::{ModelConfig, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use gemini::GeminiGenerator;
pub use server::RequirementServer;

/// Run function
pub async fn run(config: ServerConfig) -> ServerResult<()> {
    // Initialize logging
    init_logging(&config);

    // Create dependencies
    let generator = GeminiGenerator::new(&config.model)?;
    tracing::info!(endpoint = generator.endpoint(), "Using Gemini text generator");

    // Create and run server
    let server = RequirementServer::new(config, Arc::new(generator));
    server.run().await
}

/// Initialize logging
fn init_logging(config: &ServerConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    // Create filter based on config
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    // A subscriber may already be installed (e.g. by tests)
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
