//! Ability score and proficiency bonus lookups.
//!
//! Paths follow the D&D 5e system data layout. Missing data means "assume a
//! baseline character": score 10, proficiency +2.

use crate::value_objects::{AbilityId, ActorData};

/// Score used when the actor has no value for the ability.
pub const DEFAULT_ABILITY_SCORE: i64 = 10;

/// Bonus used when the actor has no proficiency value.
pub const DEFAULT_PROFICIENCY_BONUS: i64 = 2;

const PROFICIENCY_PATH: &str = "system.attributes.prof";

/// Score for `ability`: `system.abilities.<id>.value`, then `.score`, then 10.
pub fn ability_score(actor: &ActorData, ability: &AbilityId) -> i64 {
    let base = format!("system.abilities.{}", ability.as_str());
    actor
        .lookup_number(&format!("{base}.value"))
        .or_else(|| actor.lookup_number(&format!("{base}.score")))
        .unwrap_or(DEFAULT_ABILITY_SCORE)
}

/// Proficiency bonus at `system.attributes.prof`, or 2.
pub fn proficiency_bonus(actor: &ActorData) -> i64 {
    actor
        .lookup_number(PROFICIENCY_PATH)
        .unwrap_or(DEFAULT_PROFICIENCY_BONUS)
}
