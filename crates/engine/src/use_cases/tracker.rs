//! Condition tracker use case.
//!
//! Joins token state, the definition registry and actor data into the panel
//! view, and routes panel actions through load, apply and save.

use std::sync::Arc;

use condtrack_domain::{
    build_view, ActionOutcome, ConditionAction, ConditionView, DomainError, ModuleSettings,
    TokenConditionState, TokenId,
};

use crate::entities::{Conditions, Settings, SettingsError};
use crate::infrastructure::ports::{RepoError, TokenRepo, TokenSnapshot};

/// Per-token condition tracking.
pub struct ConditionTracker {
    conditions: Arc<Conditions>,
    settings: Arc<Settings>,
    tokens: Arc<dyn TokenRepo>,
}

impl ConditionTracker {
    pub fn new(
        conditions: Arc<Conditions>,
        settings: Arc<Settings>,
        tokens: Arc<dyn TokenRepo>,
    ) -> Self {
        Self {
            conditions,
            settings,
            tokens,
        }
    }

    /// Resolve a token or fail with [`TrackerError::TokenNotFound`].
    pub async fn token(&self, token_id: &TokenId) -> Result<TokenSnapshot, TrackerError> {
        self.tokens
            .get(token_id)
            .await?
            .ok_or_else(|| TrackerError::TokenNotFound(token_id.clone()))
    }

    pub async fn module_settings(&self) -> Result<ModuleSettings, TrackerError> {
        Ok(self.settings.get().await?)
    }

    /// Build the panel view for a token from what is currently stored.
    pub async fn get_data(&self, token_id: &TokenId) -> Result<ConditionView, TrackerError> {
        let token = self.token(token_id).await?;
        let definitions = self.settings.definitions().await?;
        let state = self.conditions.load(token_id).await?;
        Ok(build_view(&state, &definitions, &token.actor_data()))
    }

    /// Apply one action and persist the result if anything changed.
    ///
    /// Returns the state as stored once the write has completed. A failed
    /// write leaves storage untouched and surfaces as [`TrackerError::Repo`].
    pub async fn dispatch(
        &self,
        token_id: &TokenId,
        action: &ConditionAction,
    ) -> Result<TokenConditionState, TrackerError> {
        let mut state = self.conditions.load(token_id).await?;
        let outcome = state.apply(action)?;

        match &outcome {
            ActionOutcome::Noop => {
                tracing::debug!(
                    token_id = %token_id,
                    action = action.name(),
                    key = action.key().unwrap_or_default(),
                    "Condition action had no effect"
                );
                return Ok(state);
            }
            ActionOutcome::Replaced { key } => {
                tracing::warn!(
                    token_id = %token_id,
                    key = %key,
                    "Custom condition replaced an existing entry"
                );
            }
            ActionOutcome::Applied => {}
        }

        self.conditions.save(token_id, &state).await?;
        tracing::info!(
            token_id = %token_id,
            action = action.name(),
            key = action.key().unwrap_or_default(),
            tracked = state.len(),
            "Condition state updated"
        );
        Ok(state)
    }
}

/// Errors from tracker operations.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
    #[error("Token not found: {0}")]
    TokenNotFound(TokenId),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl TrackerError {
    /// True for input problems the user can fix, shown as a warning.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_validation())
    }
}

impl From<SettingsError> for TrackerError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::Repo(e) => Self::Repo(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::{InMemoryFlagRepo, InMemorySettingsRepo, InMemoryTokenRepo};
    use crate::infrastructure::ports::{
        ConditionFlagRepo, MockConditionFlagRepo, MockModuleSettingsRepo, MockTokenRepo,
    };
    use condtrack_domain::{AbilityId, ActorData};
    use serde_json::json;

    fn brakka() -> TokenSnapshot {
        TokenSnapshot::new("tok-1", "Brakka").with_actor(ActorData::new(json!({
            "system": {
                "abilities": { "con": { "value": 14 }, "dex": { "value": 12 } },
                "attributes": { "prof": 2 }
            }
        })))
    }

    fn tracker_with(flags: Arc<dyn ConditionFlagRepo>) -> ConditionTracker {
        ConditionTracker::new(
            Arc::new(Conditions::new(flags)),
            Arc::new(Settings::new(Arc::new(InMemorySettingsRepo::new()))),
            Arc::new(InMemoryTokenRepo::from_snapshots([brakka()])),
        )
    }

    fn tracker() -> ConditionTracker {
        tracker_with(Arc::new(InMemoryFlagRepo::new()))
    }

    fn inc(key: &str, step: u32) -> ConditionAction {
        ConditionAction::Increment {
            key: key.into(),
            step,
        }
    }

    #[tokio::test]
    async fn frostbite_scenario_thresholds() {
        let tracker = tracker();
        let token = TokenId::from("tok-1");

        tracker
            .dispatch(&token, &ConditionAction::AddCondition { key: "frostbite".into() })
            .await
            .expect("add");
        tracker.dispatch(&token, &inc("frostbite", 3)).await.expect("inc");

        let view = tracker.get_data(&token).await.expect("view");
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].current, 3);
        assert_eq!(view.rows[0].threshold, 28);
        assert!(view.add_choices.iter().all(|d| d.key != "frostbite"));

        tracker
            .dispatch(&token, &ConditionAction::Escalate { key: "frostbite".into() })
            .await
            .expect("escalate");
        let view = tracker.get_data(&token).await.expect("view");
        assert_eq!(view.rows[0].current, 0);
        assert_eq!(view.rows[0].threshold, 42);

        for _ in 0..5 {
            tracker
                .dispatch(&token, &ConditionAction::LowerBonusOffset { key: "frostbite".into() })
                .await
                .expect("pb-");
        }
        let view = tracker.get_data(&token).await.expect("view");
        assert_eq!(view.rows[0].pb_offset, -5);
        assert_eq!(view.rows[0].threshold, 14);
    }

    #[tokio::test]
    async fn custom_condition_shows_with_its_own_label() {
        let tracker = tracker();
        let token = TokenId::from("tok-1");

        let state = tracker
            .dispatch(
                &token,
                &ConditionAction::AddCustom {
                    label: "  Cold  Burn  ".into(),
                    ability: AbilityId::dex(),
                },
            )
            .await
            .expect("add custom");
        assert!(state.contains("cold-burn"));

        let view = tracker.get_data(&token).await.expect("view");
        assert_eq!(view.rows[0].label, "Cold  Burn");
        assert_eq!(view.rows[0].ability, AbilityId::dex());
        assert_eq!(view.rows[0].threshold, 24);
    }

    #[tokio::test]
    async fn empty_custom_label_is_a_validation_error() {
        let tracker = tracker();
        let token = TokenId::from("tok-1");

        let err = tracker
            .dispatch(
                &token,
                &ConditionAction::AddCustom {
                    label: "   ".into(),
                    ability: AbilityId::default(),
                },
            )
            .await
            .expect_err("blank label rejected");
        assert!(err.is_validation());

        let view = tracker.get_data(&token).await.expect("view");
        assert!(view.rows.is_empty());
    }

    #[tokio::test]
    async fn missing_key_is_not_persisted() {
        let mut flags = MockConditionFlagRepo::new();
        flags.expect_get().returning(|_| Ok(None));
        flags.expect_set().never();

        let tracker = tracker_with(Arc::new(flags));
        let state = tracker
            .dispatch(&TokenId::from("tok-1"), &inc("frostbite", 1))
            .await
            .expect("noop dispatch");
        assert!(state.is_empty());
    }

    #[tokio::test]
    async fn failed_save_is_not_shown_as_durable() {
        let mut flags = MockConditionFlagRepo::new();
        flags.expect_get().returning(|_| Ok(None));
        flags
            .expect_set()
            .returning(|_, _| Err(RepoError::database("set_flag", "database is locked")));

        let tracker = tracker_with(Arc::new(flags));
        let token = TokenId::from("tok-1");

        let err = tracker
            .dispatch(&token, &ConditionAction::AddCondition { key: "frostbite".into() })
            .await
            .expect_err("save fails");
        assert!(matches!(err, TrackerError::Repo(_)));
        assert!(!err.is_validation());

        let view = tracker.get_data(&token).await.expect("view");
        assert!(view.rows.is_empty());
    }

    #[tokio::test]
    async fn unknown_token_is_reported() {
        let tracker = tracker();
        let err = tracker
            .get_data(&TokenId::from("nobody"))
            .await
            .expect_err("unknown token");
        assert!(matches!(err, TrackerError::TokenNotFound(id) if id.as_str() == "nobody"));
    }

    #[tokio::test]
    async fn token_repo_errors_propagate() {
        let mut tokens = MockTokenRepo::new();
        tokens
            .expect_get()
            .returning(|_| Err(RepoError::database("get_token", "unavailable")));

        let tracker = ConditionTracker::new(
            Arc::new(Conditions::new(Arc::new(InMemoryFlagRepo::new()))),
            Arc::new(Settings::new(Arc::new(InMemorySettingsRepo::new()))),
            Arc::new(tokens),
        );
        let err = tracker
            .get_data(&TokenId::from("tok-1"))
            .await
            .expect_err("repo failure");
        assert!(matches!(err, TrackerError::Repo(_)));
    }

    #[tokio::test]
    async fn settings_failures_surface_as_repo_errors() {
        let mut settings = MockModuleSettingsRepo::new();
        settings
            .expect_get()
            .returning(|_| Err(RepoError::serialization("bad json")));

        let tracker = ConditionTracker::new(
            Arc::new(Conditions::new(Arc::new(InMemoryFlagRepo::new()))),
            Arc::new(Settings::new(Arc::new(settings))),
            Arc::new(InMemoryTokenRepo::from_snapshots([brakka()])),
        );
        let err = tracker
            .get_data(&TokenId::from("tok-1"))
            .await
            .expect_err("settings failure");
        assert!(matches!(err, TrackerError::Repo(RepoError::Serialization(_))));
    }

    #[tokio::test]
    async fn reset_all_keeps_custom_metadata() {
        let tracker = tracker();
        let token = TokenId::from("tok-1");

        tracker
            .dispatch(
                &token,
                &ConditionAction::AddCustom {
                    label: "Hex".into(),
                    ability: AbilityId::wis(),
                },
            )
            .await
            .expect("add");
        tracker.dispatch(&token, &inc("hex", 4)).await.expect("inc");
        tracker
            .dispatch(&token, &ConditionAction::Escalate { key: "hex".into() })
            .await
            .expect("escalate");

        let state = tracker
            .dispatch(&token, &ConditionAction::ResetAll)
            .await
            .expect("reset");
        let entry = state.get("hex").expect("entry kept");
        assert_eq!((entry.current, entry.escalations, entry.pb_offset), (0, 0, 0));
        assert_eq!(entry.custom_label.as_deref(), Some("Hex"));
        assert_eq!(entry.ability, Some(AbilityId::wis()));
    }
}
