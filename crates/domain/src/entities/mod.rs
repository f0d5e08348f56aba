//! Domain entities - condition definitions and per-token condition state.

pub mod condition_state;
pub mod definition;

pub use condition_state::{ActionOutcome, AddCustomOutcome, ConditionEntry, TokenConditionState};
pub use definition::{
    default_definitions, find as find_definition, load as load_definitions_or_default,
    load_definitions, ConditionDefinition, LoadedDefinitions,
};
