//! Unified error system for the reservation service
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: JSON body of error responses
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Reservation errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::NotFound);
//!
//! let err = AppError::with_message(ErrorCode::ValidationFailed, "rooms must not be empty")
//!     .with_detail("field", "rooms");
//!
//! let response = ApiResponse::error(&err);
//! assert_eq!(response.code, 2);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
