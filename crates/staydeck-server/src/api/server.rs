use axum::routing::{get, post};
use axum::{Json, Router};
use review_feed_core::ApprovalStore;
use review_feed_sources::{GoogleClient, HostawayClient};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared application context passed to all handlers.
#[derive(Clone)]
pub struct AppContext {
    pub hostaway: Arc<HostawayClient>,
    pub google: Arc<GoogleClient>,
    pub approvals: Arc<dyn ApprovalStore>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "staydeck".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn router(context: AppContext) -> Router {
    Router::new()
        .route("/health", get(health))
        // Review feeds
        .route("/api/reviews/hostaway", get(super::reviews::list_hostaway))
        .route(
            "/api/reviews/hostaway/trends",
            get(super::reviews::hostaway_trends),
        )
        .route("/api/reviews/google", get(super::reviews::list_google))
        // Manager approvals
        .route("/api/approvals", get(super::approvals::list_approvals))
        .route("/api/approvals", post(super::approvals::upsert_approval))
        // Public property page data
        .route(
            "/api/listings/:listing_id/reviews",
            get(super::listings::approved_reviews),
        )
        .with_state(context)
        // Request spans feed the same subscriber as the rest of the binary
        .layer(TraceLayer::new_for_http())
        // Dashboard and property pages are served from another origin
        .layer(CorsLayer::permissive())
}

/// Bind and serve until the process is stopped.
pub async fn run(context: AppContext, host: &str, port: u16) -> color_eyre::Result<()> {
    let app = router(context);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Starting HTTP server on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
