//! Value objects - immutable, validated domain values.

mod ability;
mod action;
mod actor_data;
mod settings;

pub use ability::AbilityId;
pub(crate) use ability::{lenient_ability, optional_ability};
pub use action::ConditionAction;
pub use actor_data::ActorData;
pub use settings::{
    settings_metadata, ModuleSettings, SettingScope, SettingsFieldMetadata, CONDITIONS_FLAG,
    DEFINITIONS_SETTING, GM_ONLY_SETTING, MODULE_ID,
};
