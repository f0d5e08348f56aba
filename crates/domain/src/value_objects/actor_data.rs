//! Read-only view over a host actor document.
//!
//! The host hands actor data over as loosely-typed JSON. Lookups use dotted
//! paths ("system.abilities.con.value") and treat JSON `null` as absent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::coerce_number;

/// Actor data as supplied by the host. Never mutated by the tracker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorData(Value);

impl ActorData {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// An actor with no data at all; every lookup falls back.
    pub fn empty() -> Self {
        Self(Value::Null)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Resolve a dotted path. Missing segments and `null` leaves yield `None`.
    ///
    /// Array segments are addressed by index ("items.0.name").
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut current = &self.0;
        for segment in path.split('.') {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        if current.is_null() {
            None
        } else {
            Some(current)
        }
    }

    /// Resolve a dotted path and coerce the leaf to an integer.
    ///
    /// Integers pass through, floats truncate toward zero, numeric strings
    /// are parsed and booleans count as 1/0. Anything else is `None`.
    pub fn lookup_number(&self, path: &str) -> Option<i64> {
        coerce_number(self.lookup(path)?)
    }
}

impl From<Value> for ActorData {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn actor() -> ActorData {
        ActorData::new(json!({
            "system": {
                "abilities": {
                    "con": { "value": 14 },
                    "dex": { "value": null, "score": "16" },
                    "str": { "value": 12.9 },
                    "wis": { "value": "tall" }
                },
                "attributes": { "prof": 3 },
                "tags": ["brave", "tired"]
            }
        }))
    }

    #[test]
    fn test_lookup_nested_path() {
        assert_eq!(
            actor().lookup("system.abilities.con.value"),
            Some(&json!(14))
        );
    }

    #[test]
    fn test_lookup_null_is_absent() {
        assert_eq!(actor().lookup("system.abilities.dex.value"), None);
    }

    #[test]
    fn test_lookup_missing_segment() {
        assert_eq!(actor().lookup("system.abilities.cha.value"), None);
        assert_eq!(actor().lookup("system.attributes.prof.deep"), None);
    }

    #[test]
    fn test_lookup_array_index() {
        assert_eq!(actor().lookup("system.tags.1"), Some(&json!("tired")));
        assert_eq!(actor().lookup("system.tags.7"), None);
    }

    #[test]
    fn test_lookup_number_coercions() {
        let actor = actor();
        assert_eq!(actor.lookup_number("system.abilities.con.value"), Some(14));
        assert_eq!(actor.lookup_number("system.abilities.dex.score"), Some(16));
        assert_eq!(actor.lookup_number("system.abilities.str.value"), Some(12));
        assert_eq!(actor.lookup_number("system.abilities.wis.value"), None);
    }

    #[test]
    fn test_empty_actor_has_nothing() {
        assert_eq!(ActorData::empty().lookup("system"), None);
        assert_eq!(ActorData::default().lookup_number("system.attributes.prof"), None);
    }
}
