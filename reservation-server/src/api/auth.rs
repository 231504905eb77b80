//! Login and token refresh

use axum::{
    Form, Json, Router,
    extract::{
        State,
        rejection::{FormRejection, JsonRejection},
    },
    routing::post,
};
use serde::Deserialize;

use crate::auth::password::verify_password;
use crate::auth::{TokenKind, TokenPair};
use crate::db::repository::AdminRepository;
use crate::security_log;
use crate::state::AppState;
use shared::error::{AppError, AppResult};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth", post(login))
        .route("/auth/refresh", post(refresh))
}

/// OAuth2 password-style login form
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// POST /auth - exchange admin credentials for a token pair
pub async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> AppResult<Json<TokenPair>> {
    let Form(form) = form?;

    let repo = AdminRepository::new(state.db.clone());
    let admin = repo.find_by_username(&form.username).await?;

    let verified = admin
        .as_ref()
        .is_some_and(|a| verify_password(&form.password, &a.password_hash));
    if !verified {
        security_log!("WARN", "login_failed", username = form.username.clone());
        return Err(AppError::invalid_credentials());
    }

    let pair = state.jwt.generate_pair(&form.username)?;
    security_log!("INFO", "login_success", username = form.username.clone());
    Ok(Json(pair))
}

/// POST /auth/refresh - trade a refresh token for a new pair
pub async fn refresh(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> AppResult<Json<TokenPair>> {
    let Json(payload) = payload?;

    let claims = state
        .jwt
        .validate_token(&payload.refresh_token, TokenKind::Refresh)
        .inspect_err(|e| {
            security_log!("WARN", "refresh_failed", error = format!("{}", e));
        })?;

    let pair = state.jwt.generate_pair(&claims.sub)?;
    Ok(Json(pair))
}
