//! API route modules.

pub mod health;
pub mod metrics;

use axum::{Router, response::Html, routing::get};

use crate::api::server::AppState;

const LANDING_PAGE: &str = r#"<html>
<head><title>ActiveBackup Exporter</title></head>
<body>
<h1>ActiveBackup Exporter</h1>
<p><a href="/metrics">Metrics</a></p>
</body>
</html>
"#;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing_page))
        .route("/metrics", get(metrics::scrape))
        .nest("/health", health::router())
        .with_state(state)
}

async fn landing_page() -> Html<&'static str> {
    Html(LANDING_PAGE)
}
