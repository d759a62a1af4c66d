//! DDoS Detection Dashboard
//!
//! Self-hosted dashboard that runs two pre-trained flow classifiers
//! (random forest and gradient boosting, exported to ONNX) over an
//! uploaded network-traffic CSV.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                  DDOS DETECTION DASHBOARD                  │
//! ├────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌───────────┐  │
//! │  │  Upload  │  │  Table   │  │ Pipeline │  │  Report   │  │
//! │  │  (Axum)  │─▶│  Loader  │─▶│ Align +  │─▶│ Charts +  │  │
//! │  │          │  │  (CSV)   │  │ Predict  │  │ Rankings  │  │
//! │  └──────────┘  └──────────┘  └────┬─────┘  └───────────┘  │
//! │                                   ▼                        │
//! │                            ┌─────────────┐                 │
//! │                            │ ONNX Models │                 │
//! │                            └─────────────┘                 │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! One upload event is one linear run: load, coerce, align, predict,
//! report. Nothing persists across uploads.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod table;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::Config;
pub use error::{AppError, AppResult};
pub use model::{ClassLabel, Classifier, OnnxClassifier};
pub use table::NumericTable;

/// Uploaded captures can be large; pandas-era datasets easily cross
/// the axum default of 2 MB.
const MAX_UPLOAD_BYTES: usize = 256 * 1024 * 1024;

/// Shared application state
///
/// The loaded classifiers are explicit immutable inputs so the
/// pipeline can be exercised with mock classifiers in tests.
#[derive(Clone)]
pub struct AppState {
    pub models: Arc<Vec<Box<dyn Classifier>>>,
    pub config: Config,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index::page))
        .route("/health", get(handlers::health::check))
        .route("/api/v1/analyze", post(handlers::analyze::analyze))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
