//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Path to the random forest ONNX artifact
    pub rf_model_path: String,

    /// Path to the gradient boosting ONNX artifact
    pub gb_model_path: String,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            rf_model_path: env::var("RF_MODEL_PATH")
                .unwrap_or_else(|_| "models/random_forest.onnx".to_string()),

            gb_model_path: env::var("GB_MODEL_PATH")
                .unwrap_or_else(|_| "models/gradient_boosting.onnx".to_string()),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
