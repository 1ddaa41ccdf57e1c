//! Router assembly and server startup.

use {
    axum::{
        Router,
        routing::{get, post},
    },
    tokio::net::TcpListener,
    tower_http::trace::TraceLayer,
    tracing::info,
};

use crate::{routes, state::AppState, upload_routes};

/// Build the parlo router (shared between production startup and tests).
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/upload", post(upload_routes::upload_audio))
        .route("/upload_text", post(upload_routes::upload_text))
        .route("/script.js", get(routes::script_js))
        .route("/{folder}/{filename}", get(routes::stored_file))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until shutdown.
pub async fn start_server(bind: &str, port: u16, state: AppState) -> anyhow::Result<()> {
    let app = build_app(state);
    let addr = format!("{bind}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "parlo listening");
    axum::serve(listener, app).await?;
    Ok(())
}
