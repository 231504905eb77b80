//! Authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService, TokenKind};
use crate::security_log;
use crate::state::AppState;

/// Authentication middleware - requires a valid access token
///
/// Extracts and verifies the JWT from `Authorization: Bearer <token>`.
/// On success inserts [`CurrentUser`] into request extensions; otherwise the
/// wrapped handler never runs.
///
/// | Failure | Response |
/// |---------|----------|
/// | No Authorization header | 401 NotAuthenticated |
/// | Malformed header / bad token | 401 TokenInvalid |
/// | Token expired | 401 TokenExpired |
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => match JwtService::extract_from_header(header) {
            Some(token) => token,
            None => {
                security_log!(
                    "WARN",
                    "auth_malformed",
                    uri = format!("{:?}", req.uri())
                );
                return Err(AppError::invalid_token("Invalid authorization header"));
            }
        },
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    match state.jwt.validate_token(token, TokenKind::Access) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user.clone());
            let mut response = next.run(req).await;
            // Visible to the request logging layer
            response.extensions_mut().insert(user);
            Ok(response)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}
