//! Token HUD button and tracker panel.
//!
//! The host shows a button on the token HUD; clicking it opens a panel for
//! that token. Everything the panel draws is re-read from storage after
//! each action.

use std::sync::Arc;

use serde::Serialize;

use condtrack_domain::{
    AbilityId, ConditionAction, ConditionDefinition, DomainError, ModuleSettings, TokenId, UserId, ViewRow,
    MODULE_ID,
};

use super::tracker::{ConditionTracker, TrackerError};
use crate::infrastructure::ports::TokenSnapshot;

pub const PANEL_WIDTH: u32 = 640;

/// The user interacting with the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostUser {
    pub id: UserId,
    pub name: String,
    pub is_gm: bool,
}

impl HostUser {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, is_gm: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_gm,
        }
    }
}

/// HUD column the button is placed in. The tracker only uses the right one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HudColumn {
    Right,
}

/// The tracker's token HUD control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HudButton {
    pub css_class: String,
    pub title: String,
    pub icon: String,
    pub label: String,
    pub column: HudColumn,
}

impl HudButton {
    pub fn tracker() -> Self {
        Self {
            css_class: format!("{MODULE_ID}-btn"),
            title: "Condition Tracker".into(),
            icon: "fas fa-gauge-high".into(),
            label: "Cond.".into(),
            column: HudColumn::Right,
        }
    }
}

/// Button for this user, or `None` when the panel is restricted to GMs.
pub fn hud_button_for(user: &HostUser, settings: &ModuleSettings) -> Option<HudButton> {
    if settings.gm_only && !user.is_gm {
        return None;
    }
    Some(HudButton::tracker())
}

/// Window options for the tracker panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelOptions {
    pub id: String,
    pub title: String,
    pub width: u32,
    pub resizable: bool,
}

impl PanelOptions {
    fn for_token(token_name: &str) -> Self {
        Self {
            id: format!("{MODULE_ID}-app"),
            title: format!("Conditions: {token_name}"),
            width: PANEL_WIDTH,
            resizable: true,
        }
    }
}

/// One entry of the custom-condition ability picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilityOption {
    pub value: AbilityId,
    pub label: String,
}

/// Template data for one render of the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelView {
    pub is_gm: bool,
    pub token_name: String,
    pub rows: Vec<ViewRow>,
    pub add_choices: Vec<ConditionDefinition>,
    pub abilities: Vec<AbilityOption>,
}

/// Result of handling a panel action: the re-rendered view, plus a warning
/// to show the user when the action was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelOutcome {
    pub view: PanelView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("Condition tracker is restricted to GMs")]
    Forbidden,
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

/// An open tracker panel bound to one token and one user.
pub struct TrackerPanel {
    tracker: Arc<ConditionTracker>,
    user: HostUser,
    token: TokenSnapshot,
    options: PanelOptions,
}

impl TrackerPanel {
    /// Open the panel for a token.
    pub async fn open(
        tracker: Arc<ConditionTracker>,
        user: HostUser,
        token_id: &TokenId,
    ) -> Result<Self, PanelError> {
        let settings = tracker.module_settings().await?;
        if settings.gm_only && !user.is_gm {
            tracing::debug!(user_id = %user.id, token_id = %token_id, "Panel refused for non-GM");
            return Err(PanelError::Forbidden);
        }

        let token = tracker.token(token_id).await?;
        let options = PanelOptions::for_token(&token.name);
        tracing::debug!(user_id = %user.id, token_id = %token_id, "Opened condition panel");
        Ok(Self {
            tracker,
            user,
            token,
            options,
        })
    }

    pub fn options(&self) -> &PanelOptions {
        &self.options
    }

    pub fn token_id(&self) -> &TokenId {
        &self.token.id
    }

    pub async fn render(&self) -> Result<PanelView, PanelError> {
        let view = self.tracker.get_data(&self.token.id).await?;
        Ok(PanelView {
            is_gm: self.user.is_gm,
            token_name: self.token.name.clone(),
            rows: view.rows,
            add_choices: view.add_choices,
            abilities: ability_options(),
        })
    }

    /// Dispatch an action and re-render.
    ///
    /// An `add-cond` with nothing selected is ignored. Validation failures
    /// come back as a warning and leave the token unchanged.
    pub async fn handle(&self, action: &ConditionAction) -> Result<PanelOutcome, PanelError> {
        let mut warning = None;

        let ignored = matches!(action, ConditionAction::AddCondition { key } if key.trim().is_empty());
        if !ignored {
            match self.tracker.dispatch(&self.token.id, action).await {
                Ok(_) => {}
                Err(TrackerError::Domain(DomainError::Validation(message))) => {
                    tracing::debug!(token_id = %self.token.id, %message, "Panel action rejected");
                    warning = Some(message);
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(PanelOutcome {
            view: self.render().await?,
            warning,
        })
    }
}

fn ability_options() -> Vec<AbilityOption> {
    AbilityId::all_standard()
        .into_iter()
        .map(|ability| AbilityOption {
            label: ability.display_name().to_string(),
            value: ability,
        })
        .collect()
}
