//! Repository port traits for host storage access.

use async_trait::async_trait;
use condtrack_domain::{TokenConditionState, TokenId};
use serde_json::Value;

use super::error::RepoError;
use super::types::TokenSnapshot;

// =============================================================================
// Token Flag Storage
// =============================================================================

/// Per-token durable storage of the condition state.
///
/// Adapters namespace the value under the module id and the `conditions`
/// flag key, mirroring the host's `token.getFlag(module, "conditions")`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConditionFlagRepo: Send + Sync {
    /// Stored state, or `None` when the token has never been tracked.
    async fn get(&self, token_id: &TokenId) -> Result<Option<TokenConditionState>, RepoError>;

    /// Replace the stored state. Completes only once the write is durable.
    async fn set(&self, token_id: &TokenId, state: &TokenConditionState) -> Result<(), RepoError>;
}

// =============================================================================
// Settings Storage
// =============================================================================

/// World-scoped module settings, stored as raw JSON values by key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModuleSettingsRepo: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, RepoError>;
    async fn set(&self, key: &str, value: &Value) -> Result<(), RepoError>;
}

// =============================================================================
// Token / Actor Data (read-only)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepo: Send + Sync {
    async fn get(&self, token_id: &TokenId) -> Result<Option<TokenSnapshot>, RepoError>;
}
