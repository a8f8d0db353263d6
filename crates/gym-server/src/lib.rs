pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post, put};
use axum::Router;
use std::path::Path;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: state::AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Reads
        .route("/api/clients/{id}", get(routes::clients::get_client))
        .route(
            "/api/clients/{id}/followups",
            get(routes::clients::list_followups),
        )
        .route(
            "/api/clients/{id}/activity",
            get(routes::clients::list_activity),
        )
        // Lifecycle
        .route(
            "/api/clients/{id}/assign",
            post(routes::clients::assign_trainer),
        )
        .route(
            "/api/clients/{id}/first-meeting",
            put(routes::meetings::set_meeting_date),
        )
        .route(
            "/api/clients/{id}/first-meeting/complete",
            post(routes::meetings::complete_meeting),
        )
        .route(
            "/api/clients/{id}/outcome",
            post(routes::outcomes::record_outcome),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the lifecycle API server on the given port.
pub async fn serve(root: &Path, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(root, listener).await
}

/// Start the lifecycle API server on a pre-bound listener.
///
/// Lets the caller read the actual port before starting when `port = 0`.
pub async fn serve_on(root: &Path, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
    // The webhook notifier owns a blocking HTTP client, which must be built
    // off the async runtime.
    let root_buf = root.to_path_buf();
    let app_state = tokio::task::spawn_blocking(move || state::AppState::open(&root_buf))
        .await
        .map_err(|e| anyhow::anyhow!("task join error: {e}"))??;
    let app = build_router(app_state);
    let actual_port = listener.local_addr()?.port();
    tracing::info!("gym lifecycle API listening on http://localhost:{actual_port}");
    axum::serve(listener, app).await?;
    Ok(())
}
