//! Main requirement graph server implementation
//!
//! This module contains the RequirementServer implementation.

use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use reqgraph_extract::{Extractor, TextGenerator};

use crate::config::ServerConfig;
use crate::error::ServerResult;

/// Main server implementation
#[derive(Debug, Clone)]
pub struct RequirementServer {
    /// Configuration
    pub config: ServerConfig,

    /// Model-backed extractor shared by all requests
    extractor: Extractor,
}

impl RequirementServer {
    /// Create a new RequirementServer
    pub fn new(config: ServerConfig, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            config,
            extractor: Extractor::new(generator),
        }
    }

    /// The extractor handlers run requests through
    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Run the server until Ctrl-C
    pub async fn run(self) -> ServerResult<()> {
        let addr = format!("{}:{}", self.config.bind_address, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!("Starting requirement graph server");

        // Build the API router
        let app = crate::api::build_router(Arc::new(self));

        let addr = listener.local_addr()?;
        info!("Listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

/// Resolves when the process receives Ctrl-C
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down"),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}
