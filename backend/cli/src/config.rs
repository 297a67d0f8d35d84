use anyhow::{bail, Result};
use serde::Deserialize;

use coinlens_vision::VisionProvider;

/// CoinLens runtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Path to the bundled default coin image
    pub asset_path: String,
    /// OpenAI API key
    pub openai_api_key: Option<String>,
    /// Gemini API key
    pub gemini_api_key: Option<String>,
    /// Override for the OpenAI vision model
    pub vision_model: Option<String>,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            asset_path: "assets/default-coin.png".to_string(),
            openai_api_key: None,
            gemini_api_key: None,
            vision_model: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: std::env::var("COINLENS_BIND")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("COINLENS_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            asset_path: std::env::var("COINLENS_ASSET")
                .unwrap_or_else(|_| "assets/default-coin.png".to_string()),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            vision_model: std::env::var("COINLENS_VISION_MODEL").ok(),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Build the configured vision provider. OpenAI wins when both keys are
    /// set.
    pub fn provider(&self) -> Result<VisionProvider> {
        if let Some(key) = &self.openai_api_key {
            return Ok(match &self.vision_model {
                Some(model) => VisionProvider::openai_with_model(key, model),
                None => VisionProvider::openai(key),
            });
        }
        if let Some(key) = &self.gemini_api_key {
            return Ok(VisionProvider::gemini(key));
        }
        bail!("no vision provider configured: set OPENAI_API_KEY or GEMINI_API_KEY");
    }
}
