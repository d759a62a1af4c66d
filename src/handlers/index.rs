//! Dashboard page handler

use axum::response::Html;

/// Serve the bundled single-page dashboard.
pub async fn page() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
