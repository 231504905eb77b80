//! Utility routes

use axum::{Json, Router, extract::State, routing::get};

use crate::db::repository::ReservationRepository;
use crate::state::AppState;
use shared::error::{AppError, AppResult};

pub fn router() -> Router<AppState> {
    Router::new().route("/numberid", get(max_number_id))
}

/// GET /numberid - highest numberId in use
///
/// Clients use it to pick the next business key.
pub async fn max_number_id(State(state): State<AppState>) -> AppResult<Json<i64>> {
    let repo = ReservationRepository::new(state.db.clone());
    let max = repo
        .max_number_id()
        .await?
        .ok_or_else(|| AppError::not_found("Reservations"))?;
    Ok(Json(max))
}
