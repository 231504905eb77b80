//! Token check (`POST /?token=...`)
//!
//! Lets a client ask whether the access token it holds is still usable.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::post,
};
use serde::Deserialize;

use crate::auth::TokenKind;
use crate::security_log;
use crate::state::AppState;
use shared::error::{AppError, AppResult, ErrorCode};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(check_token))
}

#[derive(Debug, Deserialize)]
pub struct TokenParams {
    pub token: Option<String>,
}

/// POST / - `true` for a valid access token
pub async fn check_token(
    State(state): State<AppState>,
    params: Result<Query<TokenParams>, QueryRejection>,
) -> AppResult<Json<bool>> {
    let Query(params) = params?;
    let token = params
        .token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::new(ErrorCode::TokenNotProvided))?;

    match state.jwt.validate_token(token, TokenKind::Access) {
        Ok(_) => Ok(Json(true)),
        Err(e) => {
            security_log!("WARN", "token_check_failed", error = format!("{}", e));
            Err(AppError::new(ErrorCode::TokenRejected))
        }
    }
}
