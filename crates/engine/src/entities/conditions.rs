//! Conditions entity module.
//!
//! Loads and saves a token's condition state through the flag port.

use std::sync::Arc;

use condtrack_domain::{TokenConditionState, TokenId};

use crate::infrastructure::ports::{ConditionFlagRepo, RepoError};

/// Conditions entity - per-token condition state storage.
pub struct Conditions {
    repo: Arc<dyn ConditionFlagRepo>,
}

impl Conditions {
    pub fn new(repo: Arc<dyn ConditionFlagRepo>) -> Self {
        Self { repo }
    }

    /// Stored state for a token, empty if it has never been tracked.
    pub async fn load(&self, token_id: &TokenId) -> Result<TokenConditionState, RepoError> {
        let stored = self.repo.get(token_id).await?;
        Ok(TokenConditionState::ensure(stored))
    }

    pub async fn save(
        &self,
        token_id: &TokenId,
        state: &TokenConditionState,
    ) -> Result<(), RepoError> {
        self.repo.set(token_id, state).await
    }
}
