//! Module settings and their registration metadata.
//!
//! The host keeps two world-scoped settings for the tracker: the condition
//! definition list and the GM-only switch for the panel.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::{default_definitions, load_definitions, LoadedDefinitions};

/// Namespace for settings and token flags.
pub const MODULE_ID: &str = "fvtt-condition-tracker";

/// Token flag key holding the condition state.
pub const CONDITIONS_FLAG: &str = "conditions";

/// Setting key of the definition list.
pub const DEFINITIONS_SETTING: &str = "definitions";

/// Setting key of the GM-only switch.
pub const GM_ONLY_SETTING: &str = "gmOnly";

/// Where a setting value lives in the host. Tracker settings are all
/// shared by every user of the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingScope {
    World,
}

/// Current values of the tracker's settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSettings {
    /// Raw definition list as stored; normalized on read.
    pub definitions: Value,
    /// Only GMs see the HUD button and may open the panel.
    pub gm_only: bool,
}

impl Default for ModuleSettings {
    fn default() -> Self {
        Self {
            definitions: default_definitions_value(),
            gm_only: true,
        }
    }
}

impl ModuleSettings {
    pub fn with_definitions(mut self, definitions: Value) -> Self {
        self.definitions = definitions;
        self
    }

    pub fn with_gm_only(mut self, gm_only: bool) -> Self {
        self.gm_only = gm_only;
        self
    }

    /// Normalized definition list, reporting whether it degraded to defaults.
    pub fn definitions(&self) -> LoadedDefinitions {
        load_definitions(&self.definitions)
    }
}

fn default_definitions_value() -> Value {
    serde_json::to_value(default_definitions()).unwrap_or(Value::Null)
}

/// Metadata describing a single setting for the host's configuration UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsFieldMetadata {
    /// Field key (matches the stored setting key)
    pub key: String,
    /// Display name for UI
    pub display_name: String,
    /// Description/help text
    pub description: String,
    /// Field type: "object", "boolean"
    pub field_type: String,
    /// Default value
    pub default_value: Value,
    pub scope: SettingScope,
    /// Shown in the host's module configuration dialog
    pub config: bool,
}

/// Get metadata for all tracker settings, in registration order.
pub fn settings_metadata() -> Vec<SettingsFieldMetadata> {
    vec![
        SettingsFieldMetadata {
            key: DEFINITIONS_SETTING.into(),
            display_name: "Condition Definitions".into(),
            description: "List of conditions (label + targeted ability).".into(),
            field_type: "object".into(),
            default_value: default_definitions_value(),
            scope: SettingScope::World,
            config: true,
        },
        SettingsFieldMetadata {
            key: GM_ONLY_SETTING.into(),
            display_name: "GM-Only UI".into(),
            description: "Only GMs see the HUD button and can open the tracker dialog.".into(),
            field_type: "boolean".into(),
            default_value: Value::Bool(true),
            scope: SettingScope::World,
            config: true,
        },
    ]
}
