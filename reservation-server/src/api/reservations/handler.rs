//! Reservation API Handlers

use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use http::StatusCode;

use crate::auth::CurrentUser;
use crate::db::repository::ReservationRepository;
use crate::filter::ListParams;
use crate::state::AppState;
use shared::error::{AppError, AppResult};
use shared::models::{Reservation, ReservationCreate, ReservationUpdate};

fn parse_number_id(raw: &str) -> AppResult<i64> {
    raw.trim().parse::<i64>().map_err(|_| {
        AppError::invalid_request(format!("numberId must be an integer, got '{}'", raw))
            .with_detail("numberId", raw)
    })
}

/// GET /reservation - filtered, paginated list
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> AppResult<Json<Vec<Reservation>>> {
    let Query(params) = params?;
    let query = params.build()?;
    let repo = ReservationRepository::new(state.db.clone());
    let reservations = repo.find_all(&query).await?;
    Ok(Json(reservations))
}

/// GET /reservation/{numberId}
pub async fn get_by_number_id(
    State(state): State<AppState>,
    Path(number_id): Path<String>,
) -> AppResult<Json<Reservation>> {
    let number_id = parse_number_id(&number_id)?;
    let repo = ReservationRepository::new(state.db.clone());
    let reservation = repo
        .find_by_number_id(number_id)
        .await?
        .ok_or_else(|| AppError::reservation_not_found(number_id))?;
    Ok(Json(reservation))
}

/// POST /reservation
pub async fn create(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    payload: Result<Json<ReservationCreate>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let Json(payload) = payload?;
    let repo = ReservationRepository::new(state.db.clone());
    let reservation = repo.create(payload).await?;

    tracing::info!(
        number_id = reservation.number_id,
        user = %current_user.username,
        "Reservation created"
    );
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// PUT /reservation/{numberId} - partial update
pub async fn update(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(number_id): Path<String>,
    payload: Result<Json<ReservationUpdate>, JsonRejection>,
) -> AppResult<Json<Reservation>> {
    let number_id = parse_number_id(&number_id)?;
    let Json(payload) = payload?;
    let repo = ReservationRepository::new(state.db.clone());
    let reservation = repo
        .update_by_number_id(number_id, payload)
        .await?
        .ok_or_else(|| AppError::reservation_not_found(number_id))?;

    tracing::info!(
        number_id,
        user = %current_user.username,
        "Reservation updated"
    );
    Ok(Json(reservation))
}

/// DELETE /reservation/{numberId}
pub async fn delete(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(number_id): Path<String>,
) -> AppResult<StatusCode> {
    let number_id = parse_number_id(&number_id)?;
    let repo = ReservationRepository::new(state.db.clone());
    if !repo.delete_by_number_id(number_id).await? {
        return Err(AppError::reservation_not_found(number_id));
    }

    tracing::info!(
        number_id,
        user = %current_user.username,
        "Reservation deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}
