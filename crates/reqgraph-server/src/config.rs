//! Configuration for the requirement graph server
//!
//! This module contains the configuration types and loading functionality.

use serde::{Deserialize, Serialize};
use std::env;
use tracing::{info, warn};

use crate::error::{ServerError, ServerResult};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Host to bind to
    #[serde(default = "default_host")]
    pub bind_address: String,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Language model settings
    #[serde(default)]
    pub model: ModelConfig,
}

/// Settings for the Gemini text generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Gemini API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model name (e.g., "gemini-2.0-flash-001")
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the Generative Language API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Timeout for a single generation request
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_port() -> u16 {
    8086
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash-001".to_string()
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn load() -> ServerResult<Self> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn load_from<F>(lookup: F) -> ServerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Start with defaults
        let mut config = Self::default();

        if let Some(port) = lookup("SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                config.port = port;
            } else {
                warn!("Invalid SERVER_PORT value: {}", port);
            }
        }

        if let Some(host) = lookup("SERVER_HOST") {
            config.bind_address = host;
        }

        if let Some(log_level) = lookup("LOG_LEVEL") {
            config.log_level = log_level;
        }

        if let Some(api_key) = lookup("GEMINI_API_KEY") {
            if !api_key.trim().is_empty() {
                config.model.api_key = Some(api_key);
            }
        }

        if let Some(model) = lookup("GEMINI_MODEL") {
            config.model.model = model;
        }

        if let Some(api_base_url) = lookup("GEMINI_API_URL") {
            config.model.api_base_url = api_base_url.trim_end_matches('/').to_string();
        }

        if let Some(timeout) = lookup("GEMINI_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => config.model.timeout_seconds = secs,
                _ => warn!("Invalid GEMINI_TIMEOUT_SECS value: {}", timeout),
            }
        }

        // Validate required fields
        if config.model.api_key.is_none() {
            return Err(ServerError::ConfigError(
                "GEMINI_API_KEY is required".to_string(),
            ));
        }

        if config.model.model.trim().is_empty() {
            return Err(ServerError::ConfigError(
                "GEMINI_MODEL must not be empty".to_string(),
            ));
        }

        info!(model = %config.model.model, port = config.port, "Loaded server configuration");
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_host(),
            log_level: default_log_level(),
            model: ModelConfig::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            api_base_url: default_api_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
