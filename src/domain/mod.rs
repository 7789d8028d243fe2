//! Domain types for the character roster.
//!
//! This module provides:
//! - Identifier newtypes and the character class enum
//! - Character, weapon and skill entities
//! - Transfer shapes: operation inputs and the character view

pub mod character;
pub mod primitives;
pub mod transfer;

pub use character::{default_skills, Character, Skill, Weapon};
pub use primitives::{CharacterId, ClassParseError, RpgClass, SkillId, UserId};
pub use transfer::{
    AttachSkill, CharacterUpdate, CharacterView, EquipWeapon, NewCharacter, SkillView, WeaponView,
};
