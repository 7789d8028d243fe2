//! Transfer shapes: operation inputs and the read-only character view.

use super::character::{Character, Skill, Weapon};
use super::primitives::{CharacterId, RpgClass, SkillId};
use serde::{Deserialize, Serialize};

fn default_name() -> String {
    "Frodo".to_string()
}

fn default_hit_points() -> i32 {
    100
}

fn default_stat() -> i32 {
    10
}

/// Input for creating a character. Missing fields take the starter defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCharacter {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_hit_points")]
    pub hit_points: i32,
    #[serde(default = "default_stat")]
    pub strength: i32,
    #[serde(default = "default_stat")]
    pub defense: i32,
    #[serde(default = "default_stat")]
    pub intelligence: i32,
    #[serde(default)]
    pub class: RpgClass,
}

impl Default for NewCharacter {
    fn default() -> Self {
        Self {
            name: default_name(),
            hit_points: default_hit_points(),
            strength: default_stat(),
            defense: default_stat(),
            intelligence: default_stat(),
            class: RpgClass::default(),
        }
    }
}

/// Input for overwriting the mutable fields of an existing character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterUpdate {
    pub id: CharacterId,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_hit_points")]
    pub hit_points: i32,
    #[serde(default = "default_stat")]
    pub strength: i32,
    #[serde(default = "default_stat")]
    pub defense: i32,
    #[serde(default = "default_stat")]
    pub intelligence: i32,
    #[serde(default)]
    pub class: RpgClass,
}

impl CharacterUpdate {
    /// Copy every mutable field onto `character`. Id, owner, weapon and skills stay.
    pub fn apply_to(&self, character: &mut Character) {
        character.name = self.name.clone();
        character.hit_points = self.hit_points;
        character.strength = self.strength;
        character.defense = self.defense;
        character.intelligence = self.intelligence;
        character.class = self.class;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachSkill {
    pub character_id: CharacterId,
    pub skill_id: SkillId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipWeapon {
    pub character_id: CharacterId,
    pub name: String,
    pub damage: i32,
}

impl EquipWeapon {
    pub fn weapon(&self) -> Weapon {
        Weapon {
            name: self.name.clone(),
            damage: self.damage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponView {
    pub name: String,
    pub damage: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillView {
    pub name: String,
    pub damage: i32,
}

/// What callers see of a character. The owner never leaves the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterView {
    pub id: CharacterId,
    pub name: String,
    pub hit_points: i32,
    pub strength: i32,
    pub defense: i32,
    pub intelligence: i32,
    pub class: RpgClass,
    pub weapon: Option<WeaponView>,
    pub skills: Vec<SkillView>,
}

impl From<&Weapon> for WeaponView {
    fn from(weapon: &Weapon) -> Self {
        WeaponView {
            name: weapon.name.clone(),
            damage: weapon.damage,
        }
    }
}

impl From<&Skill> for SkillView {
    fn from(skill: &Skill) -> Self {
        SkillView {
            name: skill.name.clone(),
            damage: skill.damage,
        }
    }
}

impl From<&Character> for CharacterView {
    fn from(c: &Character) -> Self {
        CharacterView {
            id: c.id,
            name: c.name.clone(),
            hit_points: c.hit_points,
            strength: c.strength,
            defense: c.defense,
            intelligence: c.intelligence,
            class: c.class,
            weapon: c.weapon.as_ref().map(WeaponView::from),
            skills: c.skills.iter().map(SkillView::from).collect(),
        }
    }
}

impl From<Character> for CharacterView {
    fn from(c: Character) -> Self {
        CharacterView::from(&c)
    }
}
