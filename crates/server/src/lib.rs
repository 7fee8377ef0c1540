//! Rolodex API server library.
//!
//! The router is built here rather than in `main.rs` so integration tests can
//! drive it in-process against an in-memory database.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod state;

use axum::{Router, extract::Request};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Build the application router with its middleware stack.
///
/// Sentry layers are added separately with [`with_sentry`].
pub fn app(state: AppState) -> Router {
    let cors = middleware::cors_layer(&state.config().cors_origins);

    let router = routes::routes()
        .fallback(|| async { AppError::NotFound("Not found") })
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state);

    match cors {
        Some(layer) => router.layer(layer),
        None => router,
    }
}

/// Wrap `router` in the Sentry hub and HTTP transaction layers.
///
/// These go outermost so every request, including rejected ones, is covered.
pub fn with_sentry(router: Router) -> Router {
    router
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
