//! Database Module
//!
//! Opens the embedded SurrealDB store (RocksDB on disk, or in memory) and
//! applies the schema.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::auth::password::hash_password;
use crate::config::Config;
use repository::AdminRepository;
use shared::error::AppError;

/// Tables and unique indexes; safe to apply on every start
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS reservation SCHEMALESS;
DEFINE INDEX IF NOT EXISTS reservation_number_id ON TABLE reservation FIELDS numberId UNIQUE;
DEFINE TABLE IF NOT EXISTS admin SCHEMALESS;
DEFINE INDEX IF NOT EXISTS admin_username ON TABLE admin FIELDS username UNIQUE;
"#;

/// Open the configured store and apply the schema
pub async fn connect(config: &Config) -> Result<Surreal<Db>, AppError> {
    let db = if config.uses_memory_store() {
        Surreal::new::<Mem>(()).await
    } else {
        Surreal::new::<RocksDb>(config.database_path.as_str()).await
    }
    .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

    db.use_ns(config.database_namespace.as_str())
        .use_db(config.database_name.as_str())
        .await
        .map_err(|e| AppError::database(format!("Failed to select database: {e}")))?;

    tracing::info!(
        path = %config.database_path,
        namespace = %config.database_namespace,
        database = %config.database_name,
        "Database connection established"
    );

    apply_schema(&db).await?;
    Ok(db)
}

async fn apply_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(SCHEMA)
        .await
        .and_then(|response| response.check())
        .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;
    tracing::info!("Database schema applied");
    Ok(())
}

/// Create the admin account from configuration when it does not exist yet
pub async fn seed_admin(db: &Surreal<Db>, config: &Config) -> Result<(), AppError> {
    let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password)
    else {
        tracing::debug!("ADMIN_USERNAME/ADMIN_PASSWORD not set, skipping admin seed");
        return Ok(());
    };

    let repo = AdminRepository::new(db.clone());
    if repo.find_by_username(username).await?.is_some() {
        return Ok(());
    }

    let hash = hash_password(password)
        .map_err(|e| AppError::internal(format!("Failed to hash admin password: {e}")))?;
    repo.create(username, hash).await?;
    tracing::info!(username = %username, "Admin account created");
    Ok(())
}
