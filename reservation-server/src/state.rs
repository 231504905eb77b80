//! Application state shared by every handler

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::config::Config;
use crate::db;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Surreal<Db>,
    pub jwt: Arc<JwtService>,
}

impl AppState {
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        let jwt = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config: Arc::new(config),
            db,
            jwt,
        }
    }

    /// Open the store, apply the schema and seed the admin account
    pub async fn initialize(config: Config) -> anyhow::Result<Self> {
        let db = db::connect(&config).await?;
        db::seed_admin(&db, &config).await?;
        Ok(Self::new(config, db))
    }
}
