//! Shared types for the reservation service
//!
//! Common types used by the server and its clients: the error system,
//! the reservation data model and small date/money helpers.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
