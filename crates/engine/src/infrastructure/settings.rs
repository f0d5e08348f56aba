//! SQLite-backed module settings storage.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use condtrack_domain::MODULE_ID;

use crate::infrastructure::ports::{ClockPort, ModuleSettingsRepo, RepoError};

/// SQLite implementation for world-scoped module settings.
pub struct SqliteSettingsRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteSettingsRepo {
    pub async fn new(db_path: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("module_settings", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS module_settings (
                namespace TEXT NOT NULL,
                key TEXT NOT NULL,
                value_json TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (namespace, key)
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("module_settings", e))?;

        Ok(Self { pool, clock })
    }
}

#[async_trait]
impl ModuleSettingsRepo for SqliteSettingsRepo {
    async fn get(&self, key: &str) -> Result<Option<Value>, RepoError> {
        let row = sqlx::query(
            "SELECT value_json FROM module_settings WHERE namespace = ? AND key = ?",
        )
        .bind(MODULE_ID)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("module_settings", e))?;

        match row {
            Some(row) => {
                let json: String = row.get("value_json");
                let value = serde_json::from_str(&json).map_err(RepoError::serialization)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), RepoError> {
        let json = serde_json::to_string(value).map_err(RepoError::serialization)?;
        let now = self.clock.now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO module_settings (namespace, key, value_json, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(namespace, key) DO UPDATE SET
                value_json = excluded.value_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(MODULE_ID)
        .bind(key)
        .bind(json)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("module_settings", e))?;

        Ok(())
    }
}
