//! Character record operations over a pluggable [`CharacterStore`].
//!
//! Every public operation takes the caller's identity explicitly and answers with a
//! [`ServiceResponse`]. Failures never escape as errors: they are logged and folded
//! into the envelope with `success = false`.

use crate::domain::{
    AttachSkill, Character, CharacterId, CharacterUpdate, CharacterView, EquipWeapon,
    NewCharacter, UserId,
};
use crate::response::ServiceResponse;
use crate::store::{CharacterStore, StoreError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The id does not resolve, or resolves to a character outside the caller's scope.
    #[error("{0}")]
    NotFound(String),
    /// Anything the store reported, passed through as text.
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    fn invalid_character(id: CharacterId) -> Self {
        ServiceError::NotFound(format!("Invalid character id of {}", id))
    }

    fn character_not_found() -> Self {
        ServiceError::NotFound("Character not found.".to_string())
    }

    fn skill_not_found() -> Self {
        ServiceError::NotFound("Skill not found.".to_string())
    }
}

fn views(characters: &[Character]) -> Vec<CharacterView> {
    characters.iter().map(CharacterView::from).collect()
}

fn respond<T>(
    operation: &str,
    caller: UserId,
    result: Result<T, ServiceError>,
) -> ServiceResponse<T> {
    if let Err(e) = &result {
        warn!(operation = operation, caller = %caller, error = %e, "Character operation failed");
    }
    ServiceResponse::from_result(result)
}

#[derive(Debug, Clone)]
pub struct CharacterService {
    store: Arc<dyn CharacterStore>,
}

impl CharacterService {
    pub fn new(store: Arc<dyn CharacterStore>) -> Self {
        Self { store }
    }

    /// All characters visible to the caller.
    pub async fn list_characters(&self, caller: UserId) -> ServiceResponse<Vec<CharacterView>> {
        respond("list", caller, self.try_list(caller).await)
    }

    /// One character. A miss yields `success = false` with neither data nor message.
    pub async fn get_character(
        &self,
        caller: UserId,
        id: CharacterId,
    ) -> ServiceResponse<CharacterView> {
        match self.store.find_character(caller, id).await {
            Ok(Some(character)) => ServiceResponse::ok(CharacterView::from(character)),
            Ok(None) => ServiceResponse::empty_failure(),
            Err(e) => respond("get", caller, Err(e.into())),
        }
    }

    /// Create a character owned by the caller and return the caller's updated list.
    pub async fn create_character(
        &self,
        caller: UserId,
        input: NewCharacter,
    ) -> ServiceResponse<Vec<CharacterView>> {
        respond("create", caller, self.try_create(caller, &input).await)
    }

    pub async fn update_character(
        &self,
        caller: UserId,
        update: CharacterUpdate,
    ) -> ServiceResponse<CharacterView> {
        respond("update", caller, self.try_update(caller, &update).await)
    }

    /// Delete a character and return the caller's remaining list.
    pub async fn delete_character(
        &self,
        caller: UserId,
        id: CharacterId,
    ) -> ServiceResponse<Vec<CharacterView>> {
        respond("delete", caller, self.try_delete(caller, id).await)
    }

    pub async fn attach_skill(
        &self,
        caller: UserId,
        request: AttachSkill,
    ) -> ServiceResponse<CharacterView> {
        respond("attach_skill", caller, self.try_attach_skill(caller, request).await)
    }

    pub async fn equip_weapon(
        &self,
        caller: UserId,
        request: EquipWeapon,
    ) -> ServiceResponse<CharacterView> {
        respond("equip_weapon", caller, self.try_equip_weapon(caller, &request).await)
    }

    async fn try_list(&self, caller: UserId) -> Result<Vec<CharacterView>, ServiceError> {
        let characters = self.store.list_characters(caller).await?;
        Ok(views(&characters))
    }

    async fn try_create(
        &self,
        caller: UserId,
        input: &NewCharacter,
    ) -> Result<Vec<CharacterView>, ServiceError> {
        let created = self.store.insert_character(caller, input).await?;
        info!(caller = %caller, character_id = %created.id, "Character created");
        self.try_list(caller).await
    }

    async fn try_update(
        &self,
        caller: UserId,
        update: &CharacterUpdate,
    ) -> Result<CharacterView, ServiceError> {
        let updated = self
            .store
            .update_character(caller, update)
            .await?
            .ok_or_else(|| ServiceError::invalid_character(update.id))?;
        Ok(CharacterView::from(updated))
    }

    async fn try_delete(
        &self,
        caller: UserId,
        id: CharacterId,
    ) -> Result<Vec<CharacterView>, ServiceError> {
        if !self.store.delete_character(caller, id).await? {
            return Err(ServiceError::invalid_character(id));
        }
        info!(caller = %caller, character_id = %id, "Character deleted");
        self.try_list(caller).await
    }

    async fn try_attach_skill(
        &self,
        caller: UserId,
        request: AttachSkill,
    ) -> Result<CharacterView, ServiceError> {
        let character = self
            .store
            .find_character(caller, request.character_id)
            .await?
            .ok_or_else(ServiceError::character_not_found)?;
        let skill = self
            .store
            .find_skill(request.skill_id)
            .await?
            .ok_or_else(ServiceError::skill_not_found)?;

        self.store.attach_skill(character.id, skill.id).await?;
        self.reload(caller, character.id).await
    }

    async fn try_equip_weapon(
        &self,
        caller: UserId,
        request: &EquipWeapon,
    ) -> Result<CharacterView, ServiceError> {
        let character = self
            .store
            .find_character(caller, request.character_id)
            .await?
            .ok_or_else(ServiceError::character_not_found)?;

        self.store
            .equip_weapon(character.id, &request.weapon())
            .await?;
        self.reload(caller, character.id).await
    }

    /// Read back a character after a write so the response matches what a later get returns.
    async fn reload(
        &self,
        caller: UserId,
        id: CharacterId,
    ) -> Result<CharacterView, ServiceError> {
        self.store
            .find_character(caller, id)
            .await?
            .map(CharacterView::from)
            .ok_or_else(ServiceError::character_not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RpgClass, SkillId};
    use crate::store::{MemoryStore, OwnershipScope};

    fn service(scope: OwnershipScope) -> CharacterService {
        CharacterService::new(Arc::new(MemoryStore::new(scope)))
    }

    fn hero(name: &str) -> NewCharacter {
        NewCharacter {
            name: name.to_string(),
            hit_points: 120,
            strength: 15,
            defense: 8,
            intelligence: 12,
            class: RpgClass::Cleric,
        }
    }

    const ALICE: UserId = UserId(1);
    const BOB: UserId = UserId(2);

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let svc = service(OwnershipScope::Scoped);

        let created = svc.create_character(ALICE, hero("Aragorn")).await;
        assert!(created.success);
        let list = created.data.unwrap();
        assert_eq!(list.len(), 1);

        let fetched = svc.get_character(ALICE, list[0].id).await;
        let view = fetched.data.unwrap();
        assert_eq!(view.name, "Aragorn");
        assert_eq!(view.hit_points, 120);
        assert_eq!(view.strength, 15);
        assert_eq!(view.defense, 8);
        assert_eq!(view.intelligence, 12);
        assert_eq!(view.class, RpgClass::Cleric);
        assert!(view.weapon.is_none());
        assert!(view.skills.is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_fresh_ids() {
        let svc = service(OwnershipScope::Scoped);

        svc.create_character(ALICE, hero("a")).await;
        let list = svc.create_character(ALICE, hero("b")).await.data.unwrap();
        assert_eq!(list.len(), 2);
        assert_ne!(list[0].id, list[1].id);
    }

    #[tokio::test]
    async fn test_get_foreign_character_is_empty_failure() {
        let svc = service(OwnershipScope::Scoped);
        let id = svc.create_character(ALICE, hero("a")).await.data.unwrap()[0].id;

        let resp = svc.get_character(BOB, id).await;
        assert!(!resp.success);
        assert!(resp.data.is_none());
        assert!(resp.message.is_none());
    }

    #[tokio::test]
    async fn test_list_only_returns_callers_characters() {
        let svc = service(OwnershipScope::Scoped);
        svc.create_character(ALICE, hero("a")).await;
        svc.create_character(BOB, hero("b")).await;

        let alice = svc.list_characters(ALICE).await.data.unwrap();
        assert_eq!(alice.len(), 1);
        assert_eq!(alice[0].name, "a");
    }

    #[tokio::test]
    async fn test_update_missing_id_reports_message() {
        let svc = service(OwnershipScope::Scoped);
        svc.create_character(ALICE, hero("a")).await;

        let update = CharacterUpdate {
            id: CharacterId::new(77),
            name: "ghost".to_string(),
            hit_points: 1,
            strength: 1,
            defense: 1,
            intelligence: 1,
            class: RpgClass::Mage,
        };
        let resp = svc.update_character(ALICE, update).await;
        assert!(!resp.success);
        assert_eq!(resp.message.as_deref(), Some("Invalid character id of 77"));

        let list = svc.list_characters(ALICE).await.data.unwrap();
        assert_eq!(list[0].name, "a");
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let svc = service(OwnershipScope::Scoped);
        let id = svc.create_character(ALICE, hero("a")).await.data.unwrap()[0].id;

        let update = CharacterUpdate {
            id,
            name: "renamed".to_string(),
            hit_points: 10,
            strength: 20,
            defense: 30,
            intelligence: 40,
            class: RpgClass::Knight,
        };
        let view = svc.update_character(ALICE, update).await.data.unwrap();
        assert_eq!(view.name, "renamed");
        assert_eq!(view.intelligence, 40);
        assert_eq!(view.class, RpgClass::Knight);
    }

    #[tokio::test]
    async fn test_delete_foreign_character_behaves_like_missing() {
        let svc = service(OwnershipScope::Scoped);
        let id = svc.create_character(ALICE, hero("a")).await.data.unwrap()[0].id;

        let resp = svc.delete_character(BOB, id).await;
        assert!(!resp.success);
        assert_eq!(resp.message, Some(format!("Invalid character id of {}", id)));
        assert_eq!(svc.list_characters(ALICE).await.data.unwrap().len(), 1);

        let resp = svc.delete_character(ALICE, id).await;
        assert!(resp.success);
        assert!(resp.data.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_attach_skill_messages() {
        let svc = service(OwnershipScope::Scoped);
        let id = svc.create_character(ALICE, hero("a")).await.data.unwrap()[0].id;

        let resp = svc
            .attach_skill(
                BOB,
                AttachSkill {
                    character_id: id,
                    skill_id: SkillId::new(1),
                },
            )
            .await;
        assert_eq!(resp.message.as_deref(), Some("Character not found."));

        let resp = svc
            .attach_skill(
                ALICE,
                AttachSkill {
                    character_id: id,
                    skill_id: SkillId::new(42),
                },
            )
            .await;
        assert!(!resp.success);
        assert_eq!(resp.message.as_deref(), Some("Skill not found."));
        let view = svc.get_character(ALICE, id).await.data.unwrap();
        assert!(view.skills.is_empty());
    }

    #[tokio::test]
    async fn test_attach_skill_and_equip_weapon() {
        let svc = service(OwnershipScope::Scoped);
        let id = svc.create_character(ALICE, hero("a")).await.data.unwrap()[0].id;

        let view = svc
            .attach_skill(
                ALICE,
                AttachSkill {
                    character_id: id,
                    skill_id: SkillId::new(3),
                },
            )
            .await
            .data
            .unwrap();
        assert_eq!(view.skills.len(), 1);
        assert_eq!(view.skills[0].name, "Blizzard");

        let view = svc
            .equip_weapon(
                ALICE,
                EquipWeapon {
                    character_id: id,
                    name: "Glamdring".to_string(),
                    damage: 35,
                },
            )
            .await
            .data
            .unwrap();
        assert_eq!(view.weapon.unwrap().name, "Glamdring");
        assert_eq!(view.skills.len(), 1);
    }

    #[tokio::test]
    async fn test_attach_skill_response_matches_stored_order() {
        let svc = service(OwnershipScope::Scoped);
        let id = svc.create_character(ALICE, hero("a")).await.data.unwrap()[0].id;

        for skill_id in [3, 1] {
            svc.attach_skill(
                ALICE,
                AttachSkill {
                    character_id: id,
                    skill_id: SkillId::new(skill_id),
                },
            )
            .await;
        }
        let view = svc
            .attach_skill(
                ALICE,
                AttachSkill {
                    character_id: id,
                    skill_id: SkillId::new(1),
                },
            )
            .await
            .data
            .unwrap();

        let names: Vec<_> = view.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Fireball", "Blizzard"]);
        assert_eq!(view, svc.get_character(ALICE, id).await.data.unwrap());
    }

    #[tokio::test]
    async fn test_shared_scope_allows_foreign_mutation() {
        let svc = service(OwnershipScope::Shared);
        let id = svc.create_character(ALICE, hero("a")).await.data.unwrap()[0].id;

        let resp = svc.delete_character(BOB, id).await;
        assert!(resp.success);
        assert!(svc.list_characters(ALICE).await.data.unwrap().is_empty());
    }
}
