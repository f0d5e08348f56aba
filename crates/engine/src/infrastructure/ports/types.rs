//! Helper types for port operations.

use condtrack_domain::{ActorData, TokenId};
use serde::{Deserialize, Serialize};

/// A token as the host describes it: id, display name, and its actor's data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSnapshot {
    pub id: TokenId,
    pub name: String,
    /// Unlinked or actor-less tokens have no actor data.
    #[serde(default)]
    pub actor: Option<ActorData>,
}

impl TokenSnapshot {
    pub fn new(id: impl Into<TokenId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            actor: None,
        }
    }

    pub fn with_actor(mut self, actor: ActorData) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Actor data for threshold lookups; empty when the token has no actor.
    pub fn actor_data(&self) -> ActorData {
        self.actor.clone().unwrap_or_default()
    }
}
