//! In-memory adapters for development and testing.
//!
//! Nothing here persists past the process. The token directory can be
//! seeded from a JSON file so the CLI host has actors to work with.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::path::Path;

use condtrack_domain::{TokenConditionState, TokenId};

use crate::infrastructure::ports::{
    ConditionFlagRepo, ModuleSettingsRepo, RepoError, TokenRepo, TokenSnapshot,
};

/// Token flags held in a concurrent map.
#[derive(Default)]
pub struct InMemoryFlagRepo {
    flags: DashMap<TokenId, TokenConditionState>,
}

impl InMemoryFlagRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConditionFlagRepo for InMemoryFlagRepo {
    async fn get(&self, token_id: &TokenId) -> Result<Option<TokenConditionState>, RepoError> {
        Ok(self.flags.get(token_id).map(|entry| entry.value().clone()))
    }

    async fn set(&self, token_id: &TokenId, state: &TokenConditionState) -> Result<(), RepoError> {
        self.flags.insert(token_id.clone(), state.clone());
        Ok(())
    }
}

/// Module settings held in a concurrent map.
#[derive(Default)]
pub struct InMemorySettingsRepo {
    values: DashMap<String, Value>,
}

impl InMemorySettingsRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ModuleSettingsRepo for InMemorySettingsRepo {
    async fn get(&self, key: &str) -> Result<Option<Value>, RepoError> {
        Ok(self.values.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), RepoError> {
        self.values.insert(key.to_string(), value.clone());
        Ok(())
    }
}

/// Read-only token directory.
#[derive(Default)]
pub struct InMemoryTokenRepo {
    tokens: DashMap<TokenId, TokenSnapshot>,
}

impl InMemoryTokenRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshots(snapshots: impl IntoIterator<Item = TokenSnapshot>) -> Self {
        let repo = Self::new();
        for snapshot in snapshots {
            repo.insert(snapshot);
        }
        repo
    }

    /// Load a JSON array of `{id, name, actor}` records.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RepoError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RepoError::database("tokens_file", format!("{}: {}", path.display(), e)))?;
        let snapshots: Vec<TokenSnapshot> =
            serde_json::from_str(&raw).map_err(RepoError::serialization)?;
        tracing::debug!(count = snapshots.len(), path = %path.display(), "Loaded token directory");
        Ok(Self::from_snapshots(snapshots))
    }

    pub fn insert(&self, snapshot: TokenSnapshot) {
        self.tokens.insert(snapshot.id.clone(), snapshot);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl TokenRepo for InMemoryTokenRepo {
    async fn get(&self, token_id: &TokenId) -> Result<Option<TokenSnapshot>, RepoError> {
        Ok(self.tokens.get(token_id).map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use condtrack_domain::ActorData;
    use serde_json::json;
    use std::io::Write;

    #[tokio::test]
    async fn flag_repo_round_trips() {
        let repo = InMemoryFlagRepo::new();
        let token = TokenId::from("tok-1");
        let mut state = TokenConditionState::new();
        state.add_from_definition("frostbite");

        assert_eq!(repo.get(&token).await.expect("get"), None);
        repo.set(&token, &state).await.expect("set");
        assert_eq!(repo.get(&token).await.expect("get"), Some(state));
    }

    #[tokio::test]
    async fn settings_repo_round_trips() {
        let repo = InMemorySettingsRepo::new();
        repo.set("gmOnly", &json!(false)).await.expect("set");
        assert_eq!(repo.get("gmOnly").await.expect("get"), Some(json!(false)));
        assert_eq!(repo.get("definitions").await.expect("get"), None);
    }

    #[tokio::test]
    async fn token_repo_loads_json_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"[
                {{"id": "tok-1", "name": "Brakka", "actor": {{"system": {{"attributes": {{"prof": 3}}}}}}}},
                {{"id": "tok-2", "name": "Lantern"}}
            ]"#
        )
        .expect("write tokens");

        let repo = InMemoryTokenRepo::from_json_file(file.path())
            .await
            .expect("load tokens");
        assert_eq!(repo.len(), 2);

        let brakka = repo.get(&TokenId::from("tok-1")).await.expect("get").expect("present");
        assert_eq!(brakka.name, "Brakka");
        assert_eq!(
            brakka.actor_data(),
            ActorData::new(json!({"system": {"attributes": {"prof": 3}}}))
        );

        let lantern = repo.get(&TokenId::from("tok-2")).await.expect("get").expect("present");
        assert_eq!(lantern.actor_data(), ActorData::empty());
    }

    #[tokio::test]
    async fn token_repo_reports_missing_file() {
        let result = InMemoryTokenRepo::from_json_file("/nonexistent/tokens.json").await;
        assert!(matches!(result, Err(RepoError::Database { .. })));
    }
}
