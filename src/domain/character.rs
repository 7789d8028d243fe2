//! Character, weapon and skill entities as the stores hold them.

use super::primitives::{CharacterId, RpgClass, SkillId, UserId};
use serde::{Deserialize, Serialize};

/// A learnable skill. Characters reference skills, they never own them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub damage: i32,
}

impl Skill {
    pub fn new(id: SkillId, name: impl Into<String>, damage: i32) -> Self {
        Self {
            id,
            name: name.into(),
            damage,
        }
    }
}

/// The single weapon a character may carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub damage: i32,
}

/// Skills every fresh store starts with.
pub fn default_skills() -> Vec<Skill> {
    vec![
        Skill::new(SkillId::new(1), "Fireball", 30),
        Skill::new(SkillId::new(2), "Frenzy", 20),
        Skill::new(SkillId::new(3), "Blizzard", 50),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub hit_points: i32,
    pub strength: i32,
    pub defense: i32,
    pub intelligence: i32,
    pub class: RpgClass,
    pub owner: UserId,
    pub weapon: Option<Weapon>,
    pub skills: Vec<Skill>,
}

impl Character {
    /// Whether the character already knows the given skill.
    pub fn has_skill(&self, skill_id: SkillId) -> bool {
        self.skills.iter().any(|s| s.id == skill_id)
    }
}
