//! API routes
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | `/` | POST | none (token check) |
//! | `/health` | GET | none |
//! | `/auth` | POST | none |
//! | `/auth/refresh` | POST | none |
//! | `/numberid` | GET | bearer |
//! | `/reservation` | GET, POST | bearer |
//! | `/reservation/{numberId}` | GET, PUT, DELETE | bearer |

pub mod auth;
pub mod health;
pub mod landing;
pub mod reservations;
pub mod utils;

use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::{BoxError, Router, middleware};
use http::HeaderName;
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::logging::logging_middleware;
use crate::state::AppState;
use shared::error::{AppError, ErrorCode};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Routes that require a valid access token
///
/// `route_layer` keeps the guard off the fallback, so unknown paths stay 404.
fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(reservations::router())
        .merge(utils::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

/// Routes reachable without a token
fn public_routes() -> Router<AppState> {
    Router::new()
        .merge(landing::router())
        .merge(health::router())
        .merge(auth::router())
}

async fn route_not_found() -> AppError {
    AppError::not_found("Route")
}

/// Map errors raised by the service layers into `AppError` responses
async fn handle_layer_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        AppError::new(ErrorCode::TimeoutError)
    } else {
        AppError::internal(format!("Unhandled middleware error: {err}"))
    }
}

/// Build the fully configured application
///
/// Used by the HTTP server and by in-process tests.
pub fn create_router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        .merge(public_routes())
        .merge(protected_routes(&state))
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_layer_error))
                .layer(TimeoutLayer::new(timeout)),
        )
        // Runs inside SetRequestIdLayer, so x-request-id is always present
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .with_state(state)
}
