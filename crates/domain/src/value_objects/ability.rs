//! Ability identifier value object.
//!
//! Ability keys follow the host system's short lower-case names ("con", "dex").
//! Unknown keys are preserved verbatim so configured and custom conditions
//! round-trip through storage; they simply resolve to the fallback score.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Key of the ability that governs a condition's threshold.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbilityId(String);

impl AbilityId {
    pub const STR: &'static str = "str";
    pub const DEX: &'static str = "dex";
    pub const CON: &'static str = "con";
    pub const INT: &'static str = "int";
    pub const WIS: &'static str = "wis";
    pub const CHA: &'static str = "cha";

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn str() -> Self {
        Self::new(Self::STR)
    }

    pub fn dex() -> Self {
        Self::new(Self::DEX)
    }

    pub fn con() -> Self {
        Self::new(Self::CON)
    }

    pub fn int() -> Self {
        Self::new(Self::INT)
    }

    pub fn wis() -> Self {
        Self::new(Self::WIS)
    }

    pub fn cha() -> Self {
        Self::new(Self::CHA)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full name for the six standard abilities, the raw key otherwise.
    pub fn display_name(&self) -> &str {
        match self.0.as_str() {
            Self::STR => "Strength",
            Self::DEX => "Dexterity",
            Self::CON => "Constitution",
            Self::INT => "Intelligence",
            Self::WIS => "Wisdom",
            Self::CHA => "Charisma",
            other => other,
        }
    }

    /// The six standard abilities, in sheet order.
    pub fn all_standard() -> [AbilityId; 6] {
        [
            Self::str(),
            Self::dex(),
            Self::con(),
            Self::int(),
            Self::wis(),
            Self::cha(),
        ]
    }

    pub fn is_standard(&self) -> bool {
        Self::all_standard().iter().any(|a| a == self)
    }
}

/// Conditions without an explicit ability are governed by Constitution.
impl Default for AbilityId {
    fn default() -> Self {
        Self::con()
    }
}

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AbilityId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        match key.as_str() {
            "" => Err(DomainError::parse("ability id cannot be empty")),
            "strength" => Ok(Self::str()),
            "dexterity" => Ok(Self::dex()),
            "constitution" => Ok(Self::con()),
            "intelligence" => Ok(Self::int()),
            "wisdom" => Ok(Self::wis()),
            "charisma" => Ok(Self::cha()),
            _ => Ok(Self(key)),
        }
    }
}

/// Deserializes an ability key, reading blanks and non-strings as Constitution.
pub(crate) fn lenient_ability<'de, D>(deserializer: D) -> Result<AbilityId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_ability(deserializer)?.unwrap_or_default())
}

/// Deserializes an ability key, reading blanks and non-strings as `None`.
pub(crate) fn optional_ability<'de, D>(deserializer: D) -> Result<Option<AbilityId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(key) if !key.trim().is_empty() => Some(AbilityId(key)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_constitution() {
        assert_eq!(AbilityId::default(), AbilityId::con());
        assert_eq!(AbilityId::default().as_str(), "con");
    }

    #[test]
    fn test_from_str_accepts_short_and_long_names() {
        assert_eq!(AbilityId::from_str("DEX"), Ok(AbilityId::dex()));
        assert_eq!(AbilityId::from_str("Wisdom"), Ok(AbilityId::wis()));
        assert_eq!(AbilityId::from_str(" con "), Ok(AbilityId::con()));
    }

    #[test]
    fn test_from_str_keeps_unknown_keys() {
        let ability = AbilityId::from_str("San").expect("non-empty key");
        assert_eq!(ability.as_str(), "san");
        assert!(!ability.is_standard());
        assert_eq!(ability.display_name(), "san");
    }

    #[test]
    fn test_from_str_rejects_empty() {
        assert!(AbilityId::from_str("  ").is_err());
    }

    #[test]
    fn test_serde_is_bare_string() {
        let json = serde_json::to_string(&AbilityId::dex()).expect("serialize");
        assert_eq!(json, "\"dex\"");
        let back: AbilityId = serde_json::from_str("\"cha\"").expect("deserialize");
        assert_eq!(back, AbilityId::cha());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(AbilityId::con().display_name(), "Constitution");
        assert_eq!(AbilityId::dex().display_name(), "Dexterity");
    }

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "lenient_ability")]
        ability: AbilityId,
        #[serde(default, deserialize_with = "optional_ability")]
        custom: Option<AbilityId>,
    }

    #[test]
    fn test_lenient_ability_fields() {
        let row: Row = serde_json::from_str(r#"{"ability":"dex","custom":"wis"}"#).expect("strings");
        assert_eq!(row.ability, AbilityId::dex());
        assert_eq!(row.custom, Some(AbilityId::wis()));

        let row: Row = serde_json::from_str(r#"{"ability":3,"custom":"  "}"#).expect("odd types");
        assert_eq!(row.ability, AbilityId::con());
        assert_eq!(row.custom, None);

        let row: Row = serde_json::from_str("{}").expect("missing");
        assert_eq!(row.ability, AbilityId::con());
        assert_eq!(row.custom, None);
    }
}
