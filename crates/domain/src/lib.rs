//! Condition tracker domain.
//!
//! Pure types and rules for per-token buildup conditions:
//!
//! - `entities/` - condition definitions (the registry) and token condition state
//! - `game_systems/` - ability/proficiency resolution and threshold arithmetic
//! - `value_objects/` - ability ids, actor data, panel actions, module settings
//! - `view` - the panel read model
//!
//! Nothing in this crate performs I/O; storage and host access are ports in
//! the engine crate.

pub mod common;
pub mod entities;
pub mod error;
pub mod game_systems;
pub mod ids;
pub mod value_objects;
pub mod view;

pub use entities::{
    default_definitions, find_definition, load_definitions, load_definitions_or_default,
    ActionOutcome, AddCustomOutcome, ConditionDefinition, ConditionEntry, LoadedDefinitions,
    TokenConditionState,
};
pub use error::DomainError;
pub use game_systems::{
    ability_score, effective_bonus, proficiency_bonus, threshold, DEFAULT_ABILITY_SCORE,
    DEFAULT_PROFICIENCY_BONUS,
};
pub use ids::{TokenId, UserId};
pub use value_objects::{
    settings_metadata, AbilityId, ActorData, ConditionAction, ModuleSettings, SettingScope,
    SettingsFieldMetadata, CONDITIONS_FLAG, DEFINITIONS_SETTING, GM_ONLY_SETTING, MODULE_ID,
};
pub use view::{build_view, ConditionView, ViewRow};
