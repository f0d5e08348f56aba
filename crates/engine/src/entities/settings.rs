//! Settings entity module.
//!
//! Reads and writes the tracker's world settings, falling back to defaults
//! for anything that was never stored.

use std::sync::Arc;

use serde_json::Value;

use condtrack_domain::{
    settings_metadata, ConditionDefinition, ModuleSettings, SettingsFieldMetadata,
    DEFINITIONS_SETTING, GM_ONLY_SETTING,
};

use crate::infrastructure::ports::{ModuleSettingsRepo, RepoError};

/// Settings entity - module settings with defaults.
pub struct Settings {
    repo: Arc<dyn ModuleSettingsRepo>,
}

impl Settings {
    pub fn new(repo: Arc<dyn ModuleSettingsRepo>) -> Self {
        Self { repo }
    }

    /// Current settings. Missing keys take their registered defaults.
    pub async fn get(&self) -> Result<ModuleSettings, SettingsError> {
        let mut settings = ModuleSettings::default();
        if let Some(definitions) = self.repo.get(DEFINITIONS_SETTING).await? {
            settings = settings.with_definitions(definitions);
        }
        if let Some(gm_only) = self.repo.get(GM_ONLY_SETTING).await? {
            match gm_only.as_bool() {
                Some(flag) => settings = settings.with_gm_only(flag),
                None => tracing::warn!(
                    value = %gm_only,
                    "Stored gmOnly setting is not a boolean, using default"
                ),
            }
        }
        Ok(settings)
    }

    /// Normalized definition list.
    ///
    /// A stored value that cannot be used is replaced by the built-in list
    /// and logged; it is never an error.
    pub async fn definitions(&self) -> Result<Vec<ConditionDefinition>, SettingsError> {
        let settings = self.get().await?;
        let loaded = settings.definitions();
        if loaded.is_degraded() {
            tracing::warn!(
                setting = DEFINITIONS_SETTING,
                "Stored condition definitions are unusable, falling back to defaults"
            );
        }
        Ok(loaded.into_definitions())
    }

    pub async fn set_definitions(&self, definitions: &Value) -> Result<(), SettingsError> {
        self.repo.set(DEFINITIONS_SETTING, definitions).await?;
        tracing::info!(setting = DEFINITIONS_SETTING, "Updated condition definitions");
        Ok(())
    }

    pub async fn set_gm_only(&self, gm_only: bool) -> Result<(), SettingsError> {
        self.repo.set(GM_ONLY_SETTING, &Value::Bool(gm_only)).await?;
        tracing::info!(setting = GM_ONLY_SETTING, gm_only, "Updated GM-only setting");
        Ok(())
    }

    /// Store defaults for any setting that has no value yet.
    pub async fn register_defaults(&self) -> Result<(), SettingsError> {
        for field in settings_metadata() {
            if self.repo.get(&field.key).await?.is_none() {
                self.repo.set(&field.key, &field.default_value).await?;
                tracing::debug!(setting = %field.key, "Registered setting default");
            }
        }
        Ok(())
    }

    /// Metadata for the host's configuration UI.
    pub fn metadata(&self) -> Vec<SettingsFieldMetadata> {
        settings_metadata()
    }
}

/// Errors that can occur during settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
