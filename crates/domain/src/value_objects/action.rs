//! Panel action vocabulary.
//!
//! Every button in the tracker panel maps to exactly one variant. The wire
//! form is `{"action": "<name>", ...params}` using the host's action names.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::AbilityId;
use crate::common::null_as_default;

/// A user action against one token's condition state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum ConditionAction {
    /// Add a registry condition (zeroed). Ignored if already tracked.
    #[serde(rename = "add-cond")]
    AddCondition { key: String },

    /// Add an ad-hoc condition with its own label and governing ability.
    #[serde(rename = "add-custom")]
    AddCustom {
        label: String,
        #[serde(default, deserialize_with = "null_as_default")]
        ability: AbilityId,
    },

    #[serde(rename = "inc")]
    Increment {
        key: String,
        #[serde(default = "default_step", deserialize_with = "step_or_one")]
        step: u32,
    },

    #[serde(rename = "dec")]
    Decrement {
        key: String,
        #[serde(default = "default_step", deserialize_with = "step_or_one")]
        step: u32,
    },

    /// Clear the running counter.
    #[serde(rename = "set0")]
    ResetCurrent { key: String },

    #[serde(rename = "escalate")]
    Escalate { key: String },

    #[serde(rename = "deescalate")]
    Deescalate { key: String },

    /// Raise the manual bonus offset by one.
    #[serde(rename = "pb+")]
    RaiseBonusOffset { key: String },

    /// Lower the manual bonus offset by one.
    #[serde(rename = "pb-")]
    LowerBonusOffset { key: String },

    #[serde(rename = "remove")]
    Remove { key: String },

    /// Zero every counter, tier and offset on the token.
    #[serde(rename = "reset-all")]
    ResetAll,
}

impl ConditionAction {
    /// Host-facing action name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddCondition { .. } => "add-cond",
            Self::AddCustom { .. } => "add-custom",
            Self::Increment { .. } => "inc",
            Self::Decrement { .. } => "dec",
            Self::ResetCurrent { .. } => "set0",
            Self::Escalate { .. } => "escalate",
            Self::Deescalate { .. } => "deescalate",
            Self::RaiseBonusOffset { .. } => "pb+",
            Self::LowerBonusOffset { .. } => "pb-",
            Self::Remove { .. } => "remove",
            Self::ResetAll => "reset-all",
        }
    }

    /// Condition key the action targets, if it targets a single entry.
    ///
    /// `add-custom` derives its key from the label, so it reports none here.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::AddCondition { key }
            | Self::Increment { key, .. }
            | Self::Decrement { key, .. }
            | Self::ResetCurrent { key }
            | Self::Escalate { key }
            | Self::Deescalate { key }
            | Self::RaiseBonusOffset { key }
            | Self::LowerBonusOffset { key }
            | Self::Remove { key } => Some(key),
            Self::AddCustom { .. } | Self::ResetAll => None,
        }
    }
}

fn default_step() -> u32 {
    1
}

/// Panel buttons send their step as a `data-step` attribute, so accept numbers
/// and numeric strings. Missing, non-numeric and non-positive steps mean 1.
fn step_or_one<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let step = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(match step {
        Some(s) if s.is_finite() && s >= 1.0 => s.trunc().min(f64::from(u32::MAX)) as u32,
        _ => default_step(),
    })
}
