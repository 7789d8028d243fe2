//! In-process store for demos and tests without a database.

use super::{CharacterStore, OwnershipScope, StoreError};
use crate::domain::{
    default_skills, Character, CharacterId, CharacterUpdate, NewCharacter, Skill, SkillId, UserId,
    Weapon,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
    characters: BTreeMap<CharacterId, Character>,
    skills: BTreeMap<SkillId, Skill>,
}

/// Character store backed by an ordered map behind a lock.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    scope: OwnershipScope,
}

impl MemoryStore {
    /// Create an empty store seeded with the default skill catalogue.
    pub fn new(scope: OwnershipScope) -> Self {
        let skills = default_skills().into_iter().map(|s| (s.id, s)).collect();
        Self {
            inner: RwLock::new(Inner {
                characters: BTreeMap::new(),
                skills,
            }),
            scope,
        }
    }

    /// Add (or replace) a catalogue skill.
    pub fn with_skill(self, skill: Skill) -> Self {
        let mut inner = self.inner.into_inner();
        inner.skills.insert(skill.id, skill);
        Self {
            inner: RwLock::new(inner),
            scope: self.scope,
        }
    }

    /// Add a character fixture as-is, keeping its id.
    pub fn with_character(self, character: Character) -> Self {
        let mut inner = self.inner.into_inner();
        inner.characters.insert(character.id, character);
        Self {
            inner: RwLock::new(inner),
            scope: self.scope,
        }
    }

    fn visible<'a>(
        &self,
        inner: &'a Inner,
        caller: UserId,
        id: CharacterId,
    ) -> Option<&'a Character> {
        inner
            .characters
            .get(&id)
            .filter(|c| self.scope.permits(caller, c.owner))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(OwnershipScope::default())
    }
}

#[async_trait]
impl CharacterStore for MemoryStore {
    async fn list_characters(&self, caller: UserId) -> Result<Vec<Character>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .characters
            .values()
            .filter(|c| self.scope.permits(caller, c.owner))
            .cloned()
            .collect())
    }

    async fn find_character(
        &self,
        caller: UserId,
        id: CharacterId,
    ) -> Result<Option<Character>, StoreError> {
        let inner = self.inner.read().await;
        Ok(self.visible(&inner, caller, id).cloned())
    }

    async fn insert_character(
        &self,
        caller: UserId,
        input: &NewCharacter,
    ) -> Result<Character, StoreError> {
        let mut inner = self.inner.write().await;
        let next_id = inner
            .characters
            .keys()
            .next_back()
            .map_or(1, |id| id.as_i64() + 1);

        let character = Character {
            id: CharacterId::new(next_id),
            name: input.name.clone(),
            hit_points: input.hit_points,
            strength: input.strength,
            defense: input.defense,
            intelligence: input.intelligence,
            class: input.class,
            owner: caller,
            weapon: None,
            skills: Vec::new(),
        };
        inner.characters.insert(character.id, character.clone());
        Ok(character)
    }

    async fn update_character(
        &self,
        caller: UserId,
        update: &CharacterUpdate,
    ) -> Result<Option<Character>, StoreError> {
        let mut inner = self.inner.write().await;
        let scope = self.scope;
        Ok(inner
            .characters
            .get_mut(&update.id)
            .filter(|c| scope.permits(caller, c.owner))
            .map(|character| {
                update.apply_to(character);
                character.clone()
            }))
    }

    async fn delete_character(
        &self,
        caller: UserId,
        id: CharacterId,
    ) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        if self.visible(&inner, caller, id).is_none() {
            return Ok(false);
        }
        Ok(inner.characters.remove(&id).is_some())
    }

    async fn find_skill(&self, id: SkillId) -> Result<Option<Skill>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.skills.get(&id).cloned())
    }

    async fn attach_skill(
        &self,
        character_id: CharacterId,
        skill_id: SkillId,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let skill = inner
            .skills
            .get(&skill_id)
            .cloned()
            .ok_or_else(|| StoreError::Corrupt(format!("skill {} vanished", skill_id)))?;
        let character = inner
            .characters
            .get_mut(&character_id)
            .ok_or_else(|| StoreError::Corrupt(format!("character {} vanished", character_id)))?;
        if !character.has_skill(skill_id) {
            character.skills.push(skill);
            character.skills.sort_by_key(|s| s.id);
        }
        Ok(())
    }

    async fn equip_weapon(
        &self,
        character_id: CharacterId,
        weapon: &Weapon,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let character = inner
            .characters
            .get_mut(&character_id)
            .ok_or_else(|| StoreError::Corrupt(format!("character {} vanished", character_id)))?;
        character.weapon = Some(weapon.clone());
        Ok(())
    }
}
