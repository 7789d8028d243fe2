//! Storage abstraction shared by the persistent and in-memory backends.

use crate::domain::{
    Character, CharacterId, CharacterUpdate, NewCharacter, Skill, SkillId, UserId, Weapon,
};
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Whether reads and writes are restricted to the calling owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnershipScope {
    /// Every lookup is filtered by the caller's user id.
    #[default]
    Scoped,
    /// Any caller can see and mutate any character.
    Shared,
}

impl OwnershipScope {
    /// The owner filter to apply for `caller`, if any.
    pub fn filter(&self, caller: UserId) -> Option<UserId> {
        match self {
            OwnershipScope::Scoped => Some(caller),
            OwnershipScope::Shared => None,
        }
    }

    pub fn permits(&self, caller: UserId, owner: UserId) -> bool {
        self.filter(caller).map_or(true, |c| c == owner)
    }
}

impl FromStr for OwnershipScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scoped" => Ok(OwnershipScope::Scoped),
            "shared" => Ok(OwnershipScope::Shared),
            other => Err(format!("must be scoped or shared, got {}", other)),
        }
    }
}

impl fmt::Display for OwnershipScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnershipScope::Scoped => write!(f, "scoped"),
            OwnershipScope::Shared => write!(f, "shared"),
        }
    }
}

/// Character storage contract.
///
/// Every method that takes a `caller` honors the store's [`OwnershipScope`]:
/// characters outside the scope behave exactly like missing ones.
#[async_trait]
pub trait CharacterStore: Send + Sync + fmt::Debug {
    /// Characters visible to `caller`, with weapon and skills, ascending by id.
    async fn list_characters(&self, caller: UserId) -> Result<Vec<Character>, StoreError>;

    async fn find_character(
        &self,
        caller: UserId,
        id: CharacterId,
    ) -> Result<Option<Character>, StoreError>;

    /// Persist a new character owned by `caller`. The store assigns the id.
    async fn insert_character(
        &self,
        caller: UserId,
        input: &NewCharacter,
    ) -> Result<Character, StoreError>;

    /// Overwrite the mutable fields. Returns `None` when the id is not visible.
    async fn update_character(
        &self,
        caller: UserId,
        update: &CharacterUpdate,
    ) -> Result<Option<Character>, StoreError>;

    /// Returns `true` when a visible character was removed.
    async fn delete_character(&self, caller: UserId, id: CharacterId)
        -> Result<bool, StoreError>;

    async fn find_skill(&self, id: SkillId) -> Result<Option<Skill>, StoreError>;

    /// Associate a skill with a character. Attaching a known skill again is a no-op.
    async fn attach_skill(
        &self,
        character_id: CharacterId,
        skill_id: SkillId,
    ) -> Result<(), StoreError>;

    /// Set or replace the character's weapon.
    async fn equip_weapon(
        &self,
        character_id: CharacterId,
        weapon: &Weapon,
    ) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}
