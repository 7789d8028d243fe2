//! Domain primitives: CharacterId, SkillId, UserId, RpgClass.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Store-assigned character identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub i64);

impl CharacterId {
    pub fn new(id: i64) -> Self {
        CharacterId(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Skill catalogue identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(pub i64);

impl SkillId {
    pub fn new(id: i64) -> Self {
        SkillId(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for SkillId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Authenticated user identity. Characters keep only this reference to their owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        UserId(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when parsing an unknown class name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown character class: {0}")]
pub struct ClassParseError(pub String);

/// Character class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RpgClass {
    #[default]
    Knight,
    Mage,
    Cleric,
}

impl RpgClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RpgClass::Knight => "Knight",
            RpgClass::Mage => "Mage",
            RpgClass::Cleric => "Cleric",
        }
    }
}

impl std::fmt::Display for RpgClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RpgClass {
    type Err = ClassParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "knight" => Ok(RpgClass::Knight),
            "mage" => Ok(RpgClass::Mage),
            "cleric" => Ok(RpgClass::Cleric),
            _ => Err(ClassParseError(s.to_string())),
        }
    }
}
