//! Admin Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::AdminRecord;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "admin";

#[derive(Clone)]
pub struct AdminRepository {
    base: BaseRepository,
}

impl AdminRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<AdminRecord>> {
        let username_owned = username.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT username, password_hash FROM admin WHERE username = $username LIMIT 1")
            .bind(("username", username_owned))
            .await?;
        let admins: Vec<AdminRecord> = result.take(0)?;
        Ok(admins.into_iter().next())
    }

    pub async fn create(&self, username: &str, password_hash: String) -> RepoResult<AdminRecord> {
        if self.find_by_username(username).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Admin '{}' already exists",
                username
            )));
        }

        let admin = AdminRecord {
            username: username.to_string(),
            password_hash,
        };
        let created: Option<AdminRecord> = self.base.db().create(TABLE).content(admin).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create admin".to_string()))
    }
}
