//! SQLite-backed token flag storage.
//!
//! One row per (token, namespace, flag key). The tracker only ever touches
//! its own namespace and the `conditions` key.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use condtrack_domain::{TokenConditionState, TokenId, CONDITIONS_FLAG, MODULE_ID};

use crate::infrastructure::ports::{ClockPort, ConditionFlagRepo, RepoError};

/// SQLite implementation of per-token condition flags.
pub struct SqliteFlagRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteFlagRepo {
    pub async fn new(db_path: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("token_flags", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS token_flags (
                token_id TEXT NOT NULL,
                namespace TEXT NOT NULL,
                flag_key TEXT NOT NULL,
                value_json TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (token_id, namespace, flag_key)
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("token_flags", e))?;

        Ok(Self { pool, clock })
    }
}

#[async_trait]
impl ConditionFlagRepo for SqliteFlagRepo {
    async fn get(&self, token_id: &TokenId) -> Result<Option<TokenConditionState>, RepoError> {
        let row = sqlx::query(
            r#"
            SELECT value_json FROM token_flags
            WHERE token_id = ? AND namespace = ? AND flag_key = ?
            "#,
        )
        .bind(token_id.as_str())
        .bind(MODULE_ID)
        .bind(CONDITIONS_FLAG)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("token_flags", e))?;

        match row {
            Some(row) => {
                let json: String = row.get("value_json");
                let state = serde_json::from_str(&json).map_err(RepoError::serialization)?;
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, token_id: &TokenId, state: &TokenConditionState) -> Result<(), RepoError> {
        let json = serde_json::to_string(state).map_err(RepoError::serialization)?;
        let now = self.clock.now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO token_flags (token_id, namespace, flag_key, value_json, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(token_id, namespace, flag_key) DO UPDATE SET
                value_json = excluded.value_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(token_id.as_str())
        .bind(MODULE_ID)
        .bind(CONDITIONS_FLAG)
        .bind(json)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("token_flags", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use chrono::TimeZone;
    use condtrack_domain::AbilityId;

    async fn repo(dir: &tempfile::TempDir) -> SqliteFlagRepo {
        let path = dir.path().join("flags.db");
        let now = chrono::Utc
            .timestamp_opt(1_700_000_000, 0)
            .single()
            .expect("valid timestamp");
        let clock: Arc<dyn ClockPort> = Arc::new(FixedClock(now));
        SqliteFlagRepo::new(&path.to_string_lossy(), clock)
            .await
            .expect("open flag db")
    }

    fn sample_state() -> TokenConditionState {
        let mut state = TokenConditionState::new();
        state.add_from_definition("shocked");
        state.add_from_definition("frostbite");
        state.increment("frostbite", 3);
        state.add_custom("Cold Burn", AbilityId::wis()).expect("valid label");
        state
    }

    #[tokio::test]
    async fn untracked_token_has_no_flag() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = repo(&dir).await;
        assert_eq!(repo.get(&TokenId::from("tok-1")).await.expect("get"), None);
    }

    #[tokio::test]
    async fn state_round_trips_with_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = repo(&dir).await;
        let token = TokenId::from("tok-1");
        let state = sample_state();

        repo.set(&token, &state).await.expect("set");
        let loaded = repo.get(&token).await.expect("get").expect("stored");

        assert_eq!(loaded, state);
        assert_eq!(
            loaded.keys().collect::<Vec<_>>(),
            vec!["shocked", "frostbite", "cold-burn"]
        );
    }

    #[tokio::test]
    async fn tokens_are_isolated_and_last_write_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = repo(&dir).await;
        let a = TokenId::from("tok-a");
        let b = TokenId::from("tok-b");

        repo.set(&a, &sample_state()).await.expect("set a");
        repo.set(&a, &TokenConditionState::new()).await.expect("overwrite a");

        assert_eq!(repo.get(&a).await.expect("get a"), Some(TokenConditionState::new()));
        assert_eq!(repo.get(&b).await.expect("get b"), None);
    }
}
