//! Reservation API module

mod handler;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reservation", get(handler::list).post(handler::create))
        .route(
            "/reservation/{number_id}",
            get(handler::get_by_number_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
