//! Application state and composition.

use std::sync::Arc;

use condtrack_domain::{ConditionAction, TokenConditionState, TokenId};

use crate::entities::{Conditions, Settings};
use crate::infrastructure::ports::{ConditionFlagRepo, ModuleSettingsRepo, TokenRepo};
use crate::use_cases::{
    hud_button_for, ConditionTracker, HostUser, HudButton, PanelError, TrackerError, TrackerPanel,
};

/// Main application state.
///
/// Holds the entity modules and the tracker use case built from the
/// injected ports.
pub struct App {
    pub entities: Entities,
    pub tracker: Arc<ConditionTracker>,
}

/// Container for entity modules.
pub struct Entities {
    pub conditions: Arc<Conditions>,
    pub settings: Arc<Settings>,
}

impl App {
    pub fn new(
        flags: Arc<dyn ConditionFlagRepo>,
        settings: Arc<dyn ModuleSettingsRepo>,
        tokens: Arc<dyn TokenRepo>,
    ) -> Self {
        let entities = Entities {
            conditions: Arc::new(Conditions::new(flags)),
            settings: Arc::new(Settings::new(settings)),
        };
        let tracker = Arc::new(ConditionTracker::new(
            entities.conditions.clone(),
            entities.settings.clone(),
            tokens,
        ));
        Self { entities, tracker }
    }

    /// The HUD control for this user, if they may use the tracker.
    pub async fn hud_button(&self, user: &HostUser) -> Result<Option<HudButton>, TrackerError> {
        let settings = self.tracker.module_settings().await?;
        Ok(hud_button_for(user, &settings))
    }

    pub async fn open_panel(
        &self,
        user: HostUser,
        token_id: &TokenId,
    ) -> Result<TrackerPanel, PanelError> {
        TrackerPanel::open(self.tracker.clone(), user, token_id).await
    }

    pub async fn dispatch(
        &self,
        token_id: &TokenId,
        action: &ConditionAction,
    ) -> Result<TokenConditionState, TrackerError> {
        self.tracker.dispatch(token_id, action).await
    }
}
