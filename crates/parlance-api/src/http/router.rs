//! Axum router configuration with middleware.
//!
//! The v2 surface is gated by the `x-app-key` extractor inside each
//! handler; the v1 routes (`/new-agent`, `/chat`, `/v1/verify`) are
//! intentionally ungated for backward compatibility.
//! Middleware: CORS, tracing.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::error::AppError;
use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // v2: instruction CRUD
        .route(
            "/v2/instructions",
            get(handlers::instruction::list_instructions)
                .post(handlers::instruction::create_instruction)
                .patch(handlers::instruction::update_instruction)
                .delete(handlers::instruction::delete_instruction),
        )
        // v2: per-(agent, user) chat
        .route(
            "/v2/chat",
            get(handlers::chat::get_history)
                .post(handlers::chat::chat)
                .delete(handlers::chat::delete_history),
        )
        // v1 compatibility surface (ungated)
        .route("/new-agent", post(handlers::legacy::new_agent))
        .route(
            "/chat",
            get(handlers::legacy::get_history).post(handlers::legacy::chat),
        )
        .route("/v1/verify", post(handlers::verify::verify))
        .route("/health", get(health_check))
        .fallback(unknown_route)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Unknown paths get the standard envelope instead of an empty 404.
async fn unknown_route() -> AppError {
    AppError::NotFound("no such route".to_string())
}
