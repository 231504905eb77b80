//! HTTP status code mapping for error codes
//!
//! This is the single place where the error taxonomy meets HTTP.

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::InvalidDateRange
            | Self::InvalidCredentials
            | Self::TokenRejected => StatusCode::BAD_REQUEST,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::TokenExpired | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }

            // 404 Not Found
            Self::NotFound | Self::ReservationNotFound | Self::TokenNotProvided => {
                StatusCode::NOT_FOUND
            }

            // 409 Conflict
            Self::ReservationNumberExists => StatusCode::CONFLICT,

            // 408 Request Timeout
            Self::TimeoutError => StatusCode::REQUEST_TIMEOUT,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
