//! # quote-api: Axum API Service for Quote Requests
//!
//! Receives submissions from the quote wizard and emails them to the
//! studio inbox.
//!
//! ## API Surface
//!
//! | Route                   | Module             | Purpose              |
//! |-------------------------|--------------------|----------------------|
//! | `POST /api/send-quote`  | [`routes::quote`]  | Deliver a quote      |
//! | `GET /health/liveness`  | this module        | Process is up        |
//! | `GET /health/readiness` | this module        | Ready to serve       |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → RateLimitMiddleware → Handler
//! ```

pub mod error;
pub mod mailer;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::middleware::from_fn_with_state;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) are mounted outside the rate limiter.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::quote::router())
        .layer(from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
