//! Condition definitions and the definition registry.
//!
//! Definitions come from the world-scoped `definitions` setting. Anything
//! that is not a list of records degrades to the built-in set.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::lenient_string;
use crate::value_objects::{lenient_ability, AbilityId};

/// Static description of a trackable condition.
///
/// Every field reads leniently: a record with a missing or odd-typed field
/// still loads, with that field empty (or Constitution for `ability`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionDefinition {
    #[serde(default, deserialize_with = "lenient_string")]
    pub key: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_ability")]
    pub ability: AbilityId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub notes: String,
}

impl ConditionDefinition {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        ability: AbilityId,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            ability,
            notes: notes.into(),
        }
    }
}

/// The four elemental buildups shipped with the tracker.
pub fn default_definitions() -> Vec<ConditionDefinition> {
    vec![
        ConditionDefinition::new(
            "frostbite",
            "Frostbite",
            AbilityId::con(),
            "Cold buildup; threshold uses Constitution.",
        ),
        ConditionDefinition::new(
            "scorched",
            "Scorched",
            AbilityId::dex(),
            "Fire buildup; threshold uses Dexterity.",
        ),
        ConditionDefinition::new(
            "corroded",
            "Corroded",
            AbilityId::dex(),
            "Acid buildup; threshold uses Dexterity.",
        ),
        ConditionDefinition::new(
            "shocked",
            "Shocked",
            AbilityId::con(),
            "Lightning buildup; threshold uses Constitution.",
        ),
    ]
}

/// Outcome of reading the definitions setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedDefinitions {
    /// The configured list, unchanged.
    Configured(Vec<ConditionDefinition>),
    /// The raw value was unusable; built-in defaults are in effect.
    Degraded(Vec<ConditionDefinition>),
}

impl LoadedDefinitions {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }

    pub fn into_definitions(self) -> Vec<ConditionDefinition> {
        match self {
            Self::Configured(defs) | Self::Degraded(defs) => defs,
        }
    }
}

/// Reads the raw definitions setting, reporting whether it had to degrade.
///
/// A JSON array is taken as-is: no deduplication and no checks on the
/// records. Elements that are not objects are skipped on their own. Any
/// value other than an array yields the built-in defaults.
pub fn load_definitions(raw: &Value) -> LoadedDefinitions {
    let Value::Array(items) = raw else {
        return LoadedDefinitions::Degraded(default_definitions());
    };
    let defs = items
        .iter()
        .filter(|item| item.is_object())
        .filter_map(|item| ConditionDefinition::deserialize(item).ok())
        .collect();
    LoadedDefinitions::Configured(defs)
}

/// Like [`load_definitions`] but never tells the caller it degraded.
pub fn load(raw: &Value) -> Vec<ConditionDefinition> {
    load_definitions(raw).into_definitions()
}

/// First definition with a matching key. Duplicate keys resolve to the earliest.
pub fn find<'a>(definitions: &'a [ConditionDefinition], key: &str) -> Option<&'a ConditionDefinition> {
    definitions.iter().find(|d| d.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_set() {
        let defs = default_definitions();
        let keys: Vec<&str> = defs.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["frostbite", "scorched", "corroded", "shocked"]);
        assert_eq!(defs[0].ability, AbilityId::con());
        assert_eq!(defs[1].ability, AbilityId::dex());
        assert_eq!(defs[2].ability, AbilityId::dex());
        assert_eq!(defs[3].ability, AbilityId::con());
    }

    #[test]
    fn test_load_configured_list_unchanged() {
        let raw = json!([
            { "key": "bleed", "label": "Bleeding", "ability": "con", "notes": "Blood loss." },
            { "key": "bleed", "label": "Bleeding again", "ability": "str", "notes": "" }
        ]);
        let loaded = load_definitions(&raw);
        assert!(!loaded.is_degraded());
        let defs = loaded.into_definitions();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[1].label, "Bleeding again");
        assert_eq!(defs[1].ability, AbilityId::str());
    }

    #[test]
    fn test_load_empty_list_is_configured() {
        assert_eq!(load_definitions(&json!([])), LoadedDefinitions::Configured(vec![]));
    }

    #[test]
    fn test_load_non_list_degrades() {
        for raw in [
            json!(null),
            json!({ "frostbite": { "label": "Frostbite" } }),
            json!("frostbite"),
            json!(3),
        ] {
            let loaded = load_definitions(&raw);
            assert!(loaded.is_degraded(), "{raw} should degrade");
            assert_eq!(loaded.into_definitions(), default_definitions());
        }
    }

    #[test]
    fn test_load_skips_only_non_records() {
        let loaded = load_definitions(&json!([
            "frostbite",
            { "key": "bleed", "label": "Bleeding", "ability": "con", "notes": "" },
            7
        ]));
        assert!(!loaded.is_degraded());
        let keys: Vec<String> = loaded.into_definitions().into_iter().map(|d| d.key).collect();
        assert_eq!(keys, vec!["bleed"]);
    }

    #[test]
    fn test_half_typed_record_keeps_the_rest_of_the_list() {
        let defs = load(&json!([
            { "key": "bleed", "label": "Bleeding", "ability": "con", "notes": "" },
            { "label": "Half-typed entry" },
            { "key": 9, "label": ["x"], "ability": false, "notes": { "a": 1 } }
        ]));
        assert_eq!(defs.len(), 3);
        assert_eq!(defs[0].key, "bleed");
        assert_eq!(defs[1].key, "");
        assert_eq!(defs[1].label, "Half-typed entry");
        assert_eq!(defs[1].ability, AbilityId::con());
        assert_eq!(defs[2].key, "9");
        assert_eq!(defs[2].label, "");
        assert_eq!(defs[2].ability, AbilityId::con());
        assert_eq!(defs[2].notes, "");
    }

    #[test]
    fn test_missing_fields_fill_in() {
        let defs = load(&json!([{ "key": "bleed" }]));
        assert_eq!(defs[0].label, "");
        assert_eq!(defs[0].ability, AbilityId::con());
        assert_eq!(defs[0].notes, "");
    }

    #[test]
    fn test_null_fields_fill_in() {
        let defs = load(&json!([{ "key": "bleed", "label": "Bleeding", "notes": null, "ability": null }]));
        assert_eq!(defs[0].notes, "");
        assert_eq!(defs[0].ability, AbilityId::con());
    }

    #[test]
    fn test_find_first_match_wins() {
        let defs = vec![
            ConditionDefinition::new("x", "First", AbilityId::con(), ""),
            ConditionDefinition::new("x", "Second", AbilityId::dex(), ""),
        ];
        assert_eq!(find(&defs, "x").map(|d| d.label.as_str()), Some("First"));
        assert!(find(&defs, "y").is_none());
    }
}
