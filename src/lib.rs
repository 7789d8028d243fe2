pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod response;
pub mod service;
pub mod store;

pub use config::{Config, StoreBackend};
pub use db::{init_db, Repository};
pub use domain::{
    AttachSkill, Character, CharacterId, CharacterUpdate, CharacterView, EquipWeapon,
    NewCharacter, RpgClass, Skill, SkillId, UserId, Weapon,
};
pub use error::AppError;
pub use response::ServiceResponse;
pub use service::{CharacterService, ServiceError};
pub use store::{CharacterStore, MemoryStore, OwnershipScope, SqliteStore, StoreError};
