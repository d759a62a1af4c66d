//! DDoS Detection Dashboard - Main Entry Point

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ddos_dashboard::{create_router, AppState, Classifier, Config, OnnxClassifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ddos_dashboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("DDoS Detection Dashboard starting...");
    tracing::info!("Random forest model: {}", config.rf_model_path);
    tracing::info!("Gradient boosting model: {}", config.gb_model_path);

    // Load both classifiers up front. A missing or corrupt artifact
    // refuses to start the dashboard rather than failing per upload.
    let rf = OnnxClassifier::load("random_forest", &config.rf_model_path)
        .context("failed to load random forest model")?;
    let gb = OnnxClassifier::load("gradient_boosting", &config.gb_model_path)
        .context("failed to load gradient boosting model")?;

    let state = AppState {
        models: Arc::new(vec![
            Box::new(rf) as Box<dyn Classifier>,
            Box::new(gb) as Box<dyn Classifier>,
        ]),
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Dashboard listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind listener")?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
