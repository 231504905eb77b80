//! Logging Infrastructure
//!
//! Subscriber setup and the per-request logging middleware.

use std::path::Path;
use std::time::Instant;

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::auth::CurrentUser;

/// Initialize the global subscriber.
///
/// `RUST_LOG` wins over `log_level`. With `log_dir` set (and existing), output
/// goes to a daily rolling file instead of stdout. Calling this twice is a no-op.
pub fn init_logger(log_level: &str, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "reservation_server={log_level},tower_http={log_level},surrealdb=warn,{log_level}"
        ))
    });

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists() {
            let file_appender = tracing_appender::rolling::daily(log_path, "reservation-server");
            let _ = subscriber
                .with_ansi(false)
                .with_writer(file_appender)
                .try_init();
            return;
        }
    }

    let _ = subscriber.try_init();
}

/// Request logging middleware
///
/// Logs request start and completion with:
/// - request id (x-request-id)
/// - method and raw request path
/// - authenticated user (when the guard has run)
/// - response status and latency (ms)
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        user_agent = %user_agent,
        "Request started"
    );

    let response = next.run(req).await;

    let latency = start.elapsed();
    let status = response.status();
    let user = response
        .extensions()
        .get::<CurrentUser>()
        .map(|u| u.username.clone());

    if status.is_server_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            user = ?user,
            "Request completed with server error"
        );
    } else if status.is_client_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            user = ?user,
            "Request completed with client error"
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            user = ?user,
            "Request completed successfully"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, middleware, routing::get};
    use http::StatusCode;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route(
                "/reservation/{number_id}",
                get(|| async {
                    let mut response = Response::new(Body::from("ok"));
                    response.extensions_mut().insert(CurrentUser {
                        username: "admin".to_string(),
                    });
                    response
                }),
            )
            .layer(middleware::from_fn(logging_middleware))
    }

    #[tokio::test]
    async fn test_middleware_passes_responses_through() {
        let response = app()
            .oneshot(Request::get("/reservation/7").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.extensions().get::<CurrentUser>().map(|u| u.username.as_str()),
            Some("admin")
        );

        let missing = app()
            .oneshot(Request::get("/unknown").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
