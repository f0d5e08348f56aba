//! Read model for the tracker panel.
//!
//! Rows are rebuilt from scratch on every render; nothing here is cached or
//! persisted.

use serde::{Deserialize, Serialize};

use crate::entities::{find_definition, ConditionDefinition, ConditionEntry, TokenConditionState};
use crate::game_systems::{ability_score, proficiency_bonus, threshold};
use crate::value_objects::{AbilityId, ActorData};

/// One tracked condition joined with its definition and computed threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRow {
    pub key: String,
    pub label: String,
    pub ability: AbilityId,
    pub current: u32,
    pub escalations: u32,
    pub pb_offset: i32,
    pub threshold: i64,
    pub notes: String,
}

/// Everything the panel needs to draw one token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionView {
    pub rows: Vec<ViewRow>,
    /// Registry conditions not yet tracked on the token.
    pub add_choices: Vec<ConditionDefinition>,
}

/// Definition for an entry whose key is not in the registry.
fn synthesize_definition(key: &str, entry: &ConditionEntry) -> ConditionDefinition {
    ConditionDefinition {
        key: key.to_string(),
        label: entry.custom_label.clone().unwrap_or_else(|| key.to_string()),
        ability: entry.ability.clone().unwrap_or_default(),
        notes: String::new(),
    }
}

/// Join token state with the registry and actor data.
pub fn build_view(
    state: &TokenConditionState,
    definitions: &[ConditionDefinition],
    actor: &ActorData,
) -> ConditionView {
    let base_bonus = proficiency_bonus(actor);

    let rows = state
        .iter()
        .map(|(key, entry)| {
            let definition = find_definition(definitions, key)
                .cloned()
                .unwrap_or_else(|| synthesize_definition(key, entry));
            let score = ability_score(actor, &definition.ability);
            ViewRow {
                key: key.to_string(),
                threshold: threshold(score, base_bonus, entry.escalations, entry.pb_offset),
                label: definition.label,
                ability: definition.ability,
                current: entry.current,
                escalations: entry.escalations,
                pb_offset: entry.pb_offset,
                notes: definition.notes,
            }
        })
        .collect();

    let add_choices = definitions
        .iter()
        .filter(|d| !state.contains(&d.key))
        .cloned()
        .collect();

    ConditionView { rows, add_choices }
}
