//! Reservation Server - booking backend for a small hostel
//!
//! # Architecture
//!
//! - **Database** (`db`): embedded SurrealDB store for reservations and the admin credential
//! - **Auth** (`auth`): JWT access/refresh tokens + Argon2 password check
//! - **Filter** (`filter`): query-string → store query translation
//! - **HTTP API** (`api`): RESTful endpoints
//!
//! # Module layout
//!
//! ```text
//! reservation-server/src/
//! ├── config.rs     # environment configuration
//! ├── state.rs      # shared application state
//! ├── auth/         # token service, guard, password hashing
//! ├── db/           # connection, schema, repositories
//! ├── filter.rs     # list filters and pagination
//! ├── api/          # HTTP routes and handlers
//! └── logging.rs    # subscriber setup and request logging
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod filter;
pub mod logging;
pub mod state;

pub use auth::{CurrentUser, JwtService};
pub use config::Config;
pub use state::AppState;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
