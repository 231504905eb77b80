//! Unified error codes for the reservation service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Reservation errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so clients can switch on
/// them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Token check called without a token
    TokenNotProvided = 1005,
    /// Token check rejected the token (invalid or expired)
    TokenRejected = 1006,

    // ==================== 4xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 4001,
    /// A reservation with the same numberId already exists
    ReservationNumberExists = 4002,
    /// Arrival is not strictly before departure
    InvalidDateRange = 4003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Operation timeout
    TimeoutError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Incorrect username or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::TokenNotProvided => "No token provided",
            ErrorCode::TokenRejected => "Token expired or invalid",

            // Reservation
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::ReservationNumberExists => "Duplicated numberId",
            ErrorCode::InvalidDateRange => "Arrival must be before departure",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Could not connect to the database",
            ErrorCode::TimeoutError => "Operation timed out",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::TokenNotProvided),
            1006 => Ok(ErrorCode::TokenRejected),

            // Reservation
            4001 => Ok(ErrorCode::ReservationNotFound),
            4002 => Ok(ErrorCode::ReservationNumberExists),
            4003 => Ok(ErrorCode::InvalidDateRange),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9004 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
