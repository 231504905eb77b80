//! Repository Module
//!
//! CRUD operations over the SurrealDB tables.

pub mod admin;
pub mod reservation;

pub use admin::AdminRepository;
pub use reservation::ReservationRepository;

use shared::error::AppError;
use shared::models::InvalidReservation;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error(transparent)]
    Invalid(#[from] InvalidReservation),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Invalid(e) => e.into(),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
