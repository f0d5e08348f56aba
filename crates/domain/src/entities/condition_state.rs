//! Per-token condition state and its transition rules.
//!
//! The host stores one `TokenConditionState` per token. Every rule here is a
//! pure, synchronous mutation; persisting the result is the engine's job.
//!
//! Mutations against a key that is not tracked are no-ops (except the two add
//! operations) and report that nothing was applied, so callers can skip the
//! write.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::common::{
    clamped_count, clamped_offset, condition_key_from_label, none_if_blank, optional_string,
};
use crate::error::DomainError;
use crate::value_objects::{optional_ability, AbilityId, ConditionAction};

/// One tracked condition on a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionEntry {
    /// Running buildup counter.
    #[serde(default, deserialize_with = "clamped_count")]
    pub current: u32,
    /// Escalation tier; each tier adds one to the effective bonus.
    #[serde(default, deserialize_with = "clamped_count")]
    pub escalations: u32,
    /// Manual bonus adjustment, may be negative.
    #[serde(default, deserialize_with = "clamped_offset")]
    pub pb_offset: i32,
    /// Only set for ad-hoc conditions that are not in the registry.
    #[serde(
        default,
        deserialize_with = "optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_label: Option<String>,
    /// Only set for ad-hoc conditions that are not in the registry.
    #[serde(
        default,
        deserialize_with = "optional_ability",
        skip_serializing_if = "Option::is_none"
    )]
    pub ability: Option<AbilityId>,
}

impl ConditionEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn custom(label: impl Into<String>, ability: AbilityId) -> Self {
        Self {
            custom_label: Some(label.into()),
            ability: Some(ability),
            ..Self::default()
        }
    }

    fn reset_counters(&mut self) {
        self.current = 0;
        self.escalations = 0;
        self.pb_offset = 0;
    }
}

/// Result of [`TokenConditionState::add_custom`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddCustomOutcome {
    /// A new entry was created under the derived key.
    Inserted { key: String },
    /// An entry with the same derived key already existed and was overwritten.
    Replaced { key: String },
}

impl AddCustomOutcome {
    pub fn key(&self) -> &str {
        match self {
            Self::Inserted { key } | Self::Replaced { key } => key,
        }
    }
}

/// Result of applying a [`ConditionAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// State changed; persist it.
    Applied,
    /// A custom condition overwrote the entry at `key`; persist it.
    Replaced { key: String },
    /// Nothing happened; skip the write.
    Noop,
}

impl ActionOutcome {
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Noop)
    }

    fn from_applied(applied: bool) -> Self {
        if applied {
            Self::Applied
        } else {
            Self::Noop
        }
    }
}

/// All conditions tracked on one token, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConditionState {
    #[serde(default)]
    pub items: IndexMap<String, ConditionEntry>,
}

impl TokenConditionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored state, or a fresh empty one when the token has none yet.
    pub fn ensure(stored: Option<Self>) -> Self {
        stored.unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&ConditionEntry> {
        self.items.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConditionEntry)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Start tracking a registry condition with zeroed counters.
    ///
    /// Already-tracked keys are left exactly as they are.
    pub fn add_from_definition(&mut self, key: &str) -> bool {
        if self.items.contains_key(key) {
            return false;
        }
        self.items.insert(key.to_string(), ConditionEntry::new());
        true
    }

    /// Start tracking an ad-hoc condition.
    ///
    /// The label is trimmed and the key derived from it. An existing entry at
    /// the derived key, custom or registry, is overwritten.
    pub fn add_custom(
        &mut self,
        label: &str,
        ability: AbilityId,
    ) -> Result<AddCustomOutcome, DomainError> {
        let label = none_if_blank(label).ok_or_else(|| DomainError::validation("Enter a custom name."))?;
        let key = condition_key_from_label(label);
        if key.is_empty() {
            return Err(DomainError::validation(format!(
                "\"{label}\" has no letters or digits to build a key from."
            )));
        }

        let previous = self
            .items
            .insert(key.clone(), ConditionEntry::custom(label, ability));
        Ok(match previous {
            Some(_) => AddCustomOutcome::Replaced { key },
            None => AddCustomOutcome::Inserted { key },
        })
    }

    pub fn increment(&mut self, key: &str, step: u32) -> bool {
        self.update(key, |e| e.current = e.current.saturating_add(step))
    }

    /// Lower the counter, stopping at zero.
    pub fn decrement(&mut self, key: &str, step: u32) -> bool {
        self.update(key, |e| e.current = e.current.saturating_sub(step))
    }

    pub fn reset_current(&mut self, key: &str) -> bool {
        self.update(key, |e| e.current = 0)
    }

    /// Raise the tier. Buildup restarts from zero at the new tier.
    pub fn escalate(&mut self, key: &str) -> bool {
        self.update(key, |e| {
            e.escalations = e.escalations.saturating_add(1);
            e.current = 0;
        })
    }

    /// Lower the tier, stopping at zero. The counter is kept.
    pub fn deescalate(&mut self, key: &str) -> bool {
        self.update(key, |e| e.escalations = e.escalations.saturating_sub(1))
    }

    pub fn adjust_bonus_offset(&mut self, key: &str, delta: i32) -> bool {
        self.update(key, |e| e.pb_offset = e.pb_offset.saturating_add(delta))
    }

    /// Stop tracking a condition. Remaining entries keep their order.
    pub fn remove(&mut self, key: &str) -> bool {
        self.items.shift_remove(key).is_some()
    }

    /// Zero counters, tiers and offsets everywhere. Custom labels and
    /// abilities survive. Returns `false` only when nothing is tracked.
    pub fn reset_all(&mut self) -> bool {
        self.items.values_mut().for_each(ConditionEntry::reset_counters);
        !self.items.is_empty()
    }

    /// Route a panel action to its rule.
    pub fn apply(&mut self, action: &ConditionAction) -> Result<ActionOutcome, DomainError> {
        let outcome = match action {
            ConditionAction::AddCondition { key } => {
                ActionOutcome::from_applied(self.add_from_definition(key))
            }
            ConditionAction::AddCustom { label, ability } => {
                match self.add_custom(label, ability.clone())? {
                    AddCustomOutcome::Inserted { .. } => ActionOutcome::Applied,
                    AddCustomOutcome::Replaced { key } => ActionOutcome::Replaced { key },
                }
            }
            ConditionAction::Increment { key, step } => {
                ActionOutcome::from_applied(self.increment(key, *step))
            }
            ConditionAction::Decrement { key, step } => {
                ActionOutcome::from_applied(self.decrement(key, *step))
            }
            ConditionAction::ResetCurrent { key } => {
                ActionOutcome::from_applied(self.reset_current(key))
            }
            ConditionAction::Escalate { key } => ActionOutcome::from_applied(self.escalate(key)),
            ConditionAction::Deescalate { key } => {
                ActionOutcome::from_applied(self.deescalate(key))
            }
            ConditionAction::RaiseBonusOffset { key } => {
                ActionOutcome::from_applied(self.adjust_bonus_offset(key, 1))
            }
            ConditionAction::LowerBonusOffset { key } => {
                ActionOutcome::from_applied(self.adjust_bonus_offset(key, -1))
            }
            ConditionAction::Remove { key } => ActionOutcome::from_applied(self.remove(key)),
            ConditionAction::ResetAll => ActionOutcome::from_applied(self.reset_all()),
        };
        Ok(outcome)
    }

    fn update(&mut self, key: &str, f: impl FnOnce(&mut ConditionEntry)) -> bool {
        match self.items.get_mut(key) {
            Some(entry) => {
                f(entry);
                true
            }
            None => false,
        }
    }
}
