//! Persistent character store over the SQLite repository.

use super::{CharacterStore, OwnershipScope, StoreError};
use crate::db::Repository;
use crate::domain::{
    Character, CharacterId, CharacterUpdate, NewCharacter, Skill, SkillId, UserId, Weapon,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Rows that fail to decode are corrupt records, everything else is a database error.
fn repo_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Decode(source) => StoreError::Corrupt(source.to_string()),
        other => StoreError::Database(other),
    }
}

#[derive(Debug, Clone)]
pub struct SqliteStore {
    repo: Arc<Repository>,
    scope: OwnershipScope,
}

impl SqliteStore {
    pub fn new(repo: Arc<Repository>, scope: OwnershipScope) -> Self {
        Self { repo, scope }
    }

    /// Load a character by id regardless of owner. Used after the caller has
    /// already been checked.
    async fn reload(&self, id: CharacterId) -> Result<Character, StoreError> {
        self.repo
            .get_character(id, None)
            .await
            .map_err(repo_error)?
            .ok_or_else(|| StoreError::Corrupt(format!("character {} vanished", id)))
    }
}

#[async_trait]
impl CharacterStore for SqliteStore {
    async fn list_characters(&self, caller: UserId) -> Result<Vec<Character>, StoreError> {
        self.repo
            .query_characters(self.scope.filter(caller))
            .await
            .map_err(repo_error)
    }

    async fn find_character(
        &self,
        caller: UserId,
        id: CharacterId,
    ) -> Result<Option<Character>, StoreError> {
        self.repo
            .get_character(id, self.scope.filter(caller))
            .await
            .map_err(repo_error)
    }

    async fn insert_character(
        &self,
        caller: UserId,
        input: &NewCharacter,
    ) -> Result<Character, StoreError> {
        if self.repo.ensure_user(caller).await? {
            tracing::info!(caller = %caller, "Registered new owner");
        }
        let id = self.repo.insert_character(caller, input).await?;
        self.reload(id).await
    }

    async fn update_character(
        &self,
        caller: UserId,
        update: &CharacterUpdate,
    ) -> Result<Option<Character>, StoreError> {
        if !self
            .repo
            .update_character(update, self.scope.filter(caller))
            .await?
        {
            return Ok(None);
        }
        self.reload(update.id).await.map(Some)
    }

    async fn delete_character(
        &self,
        caller: UserId,
        id: CharacterId,
    ) -> Result<bool, StoreError> {
        Ok(self
            .repo
            .delete_character(id, self.scope.filter(caller))
            .await?)
    }

    async fn find_skill(&self, id: SkillId) -> Result<Option<Skill>, StoreError> {
        Ok(self.repo.find_skill(id).await?)
    }

    async fn attach_skill(
        &self,
        character_id: CharacterId,
        skill_id: SkillId,
    ) -> Result<(), StoreError> {
        let inserted = self
            .repo
            .insert_character_skill(character_id, skill_id)
            .await?;
        if !inserted {
            tracing::debug!(
                character_id = %character_id,
                skill_id = %skill_id,
                "Skill already attached"
            );
        }
        Ok(())
    }

    async fn equip_weapon(
        &self,
        character_id: CharacterId,
        weapon: &Weapon,
    ) -> Result<(), StoreError> {
        Ok(self.repo.upsert_weapon(character_id, weapon).await?)
    }
}
