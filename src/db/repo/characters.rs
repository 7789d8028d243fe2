//! Character, weapon and skill-link operations.
//!
//! Every query that takes an `owner: Option<UserId>` filters on it when present
//! and reads across all owners when absent.

use super::Repository;
use crate::domain::{
    Character, CharacterId, CharacterUpdate, NewCharacter, RpgClass, Skill, SkillId, UserId,
    Weapon,
};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::collections::HashMap;
use std::str::FromStr;

const CHARACTER_SELECT: &str = r#"
    SELECT c.id, c.name, c.hit_points, c.strength, c.defense, c.intelligence,
           c.class, c.user_id, w.name AS weapon_name, w.damage AS weapon_damage
    FROM characters c
    LEFT JOIN weapons w ON w.character_id = c.id
"#;

fn character_from_row(row: &SqliteRow) -> Result<Character, sqlx::Error> {
    let class_str: String = row.get("class");
    let class = RpgClass::from_str(&class_str).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

    let weapon_name: Option<String> = row.get("weapon_name");
    let weapon_damage: Option<i32> = row.get("weapon_damage");
    let weapon = weapon_name.map(|name| Weapon {
        name,
        damage: weapon_damage.unwrap_or_default(),
    });

    Ok(Character {
        id: CharacterId::new(row.get("id")),
        name: row.get("name"),
        hit_points: row.get("hit_points"),
        strength: row.get("strength"),
        defense: row.get("defense"),
        intelligence: row.get("intelligence"),
        class,
        owner: UserId::new(row.get("user_id")),
        weapon,
        skills: Vec::new(),
    })
}

impl Repository {
    /// Query characters, optionally restricted to one owner, with weapon and skills.
    ///
    /// # Errors
    /// Returns an error if a query fails or a row cannot be decoded.
    pub async fn query_characters(
        &self,
        owner: Option<UserId>,
    ) -> Result<Vec<Character>, sqlx::Error> {
        let owner = owner.map(|u| u.as_i64());
        let sql = format!(
            "{CHARACTER_SELECT} WHERE (? IS NULL OR c.user_id = ?) ORDER BY c.id ASC"
        );
        let rows = sqlx::query(&sql)
            .bind(owner)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;

        let mut characters = rows
            .iter()
            .map(character_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        let skill_rows = sqlx::query(
            r#"
            SELECT cs.character_id, s.id, s.name, s.damage
            FROM character_skills cs
            JOIN skills s ON s.id = cs.skill_id
            JOIN characters c ON c.id = cs.character_id
            WHERE (? IS NULL OR c.user_id = ?)
            ORDER BY cs.character_id ASC, s.id ASC
            "#,
        )
        .bind(owner)
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        let mut skills_by_character: HashMap<i64, Vec<Skill>> = HashMap::new();
        for row in &skill_rows {
            skills_by_character
                .entry(row.get("character_id"))
                .or_default()
                .push(Skill::new(
                    SkillId::new(row.get("id")),
                    row.get::<String, _>("name"),
                    row.get("damage"),
                ));
        }

        for character in &mut characters {
            if let Some(skills) = skills_by_character.remove(&character.id.as_i64()) {
                character.skills = skills;
            }
        }

        Ok(characters)
    }

    /// Get one character, optionally restricted to one owner, with weapon and skills.
    ///
    /// # Errors
    /// Returns an error if a query fails or the row cannot be decoded.
    pub async fn get_character(
        &self,
        id: CharacterId,
        owner: Option<UserId>,
    ) -> Result<Option<Character>, sqlx::Error> {
        let owner = owner.map(|u| u.as_i64());
        let sql = format!("{CHARACTER_SELECT} WHERE c.id = ? AND (? IS NULL OR c.user_id = ?)");
        let row = sqlx::query(&sql)
            .bind(id.as_i64())
            .bind(owner)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut character = character_from_row(&row)?;
        character.skills = self.query_character_skills(id).await?;
        Ok(Some(character))
    }

    async fn query_character_skills(&self, id: CharacterId) -> Result<Vec<Skill>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.name, s.damage
            FROM character_skills cs
            JOIN skills s ON s.id = cs.skill_id
            WHERE cs.character_id = ?
            ORDER BY s.id ASC
            "#,
        )
        .bind(id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|r| {
                Skill::new(
                    SkillId::new(r.get("id")),
                    r.get::<String, _>("name"),
                    r.get("damage"),
                )
            })
            .collect())
    }

    /// Insert a character owned by `owner` and return its assigned id.
    ///
    /// # Errors
    /// Returns an error if the insert fails, including a foreign-key failure for an
    /// unknown owner.
    pub async fn insert_character(
        &self,
        owner: UserId,
        input: &NewCharacter,
    ) -> Result<CharacterId, sqlx::Error> {
        let now = chrono::Utc::now().timestamp_millis();
        let result = sqlx::query(
            r#"
            INSERT INTO characters (
                name, hit_points, strength, defense, intelligence, class,
                user_id, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.name.as_str())
        .bind(input.hit_points)
        .bind(input.strength)
        .bind(input.defense)
        .bind(input.intelligence)
        .bind(input.class.as_str())
        .bind(owner.as_i64())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(CharacterId::new(result.last_insert_rowid()))
    }

    /// Overwrite the mutable fields. Returns `false` when no matching row exists.
    ///
    /// # Errors
    /// Returns an error if the update fails.
    pub async fn update_character(
        &self,
        update: &CharacterUpdate,
        owner: Option<UserId>,
    ) -> Result<bool, sqlx::Error> {
        let owner = owner.map(|u| u.as_i64());
        let result = sqlx::query(
            r#"
            UPDATE characters
            SET name = ?, hit_points = ?, strength = ?, defense = ?,
                intelligence = ?, class = ?, updated_at = ?
            WHERE id = ? AND (? IS NULL OR user_id = ?)
            "#,
        )
        .bind(update.name.as_str())
        .bind(update.hit_points)
        .bind(update.strength)
        .bind(update.defense)
        .bind(update.intelligence)
        .bind(update.class.as_str())
        .bind(chrono::Utc::now().timestamp_millis())
        .bind(update.id.as_i64())
        .bind(owner)
        .bind(owner)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a character. Weapon and skill links go with it.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub async fn delete_character(
        &self,
        id: CharacterId,
        owner: Option<UserId>,
    ) -> Result<bool, sqlx::Error> {
        let owner = owner.map(|u| u.as_i64());
        let result = sqlx::query("DELETE FROM characters WHERE id = ? AND (? IS NULL OR user_id = ?)")
            .bind(id.as_i64())
            .bind(owner)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Link a skill to a character. Existing links are left alone.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn insert_character_skill(
        &self,
        character_id: CharacterId,
        skill_id: SkillId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO character_skills (character_id, skill_id)
            VALUES (?, ?)
            ON CONFLICT(character_id, skill_id) DO NOTHING
            "#,
        )
        .bind(character_id.as_i64())
        .bind(skill_id.as_i64())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Set or replace the weapon carried by a character.
    ///
    /// # Errors
    /// Returns an error if the upsert fails.
    pub async fn upsert_weapon(
        &self,
        character_id: CharacterId,
        weapon: &Weapon,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO weapons (name, damage, character_id)
            VALUES (?, ?, ?)
            ON CONFLICT(character_id) DO UPDATE SET
                name = excluded.name,
                damage = excluded.damage
            "#,
        )
        .bind(weapon.name.as_str())
        .bind(weapon.damage)
        .bind(character_id.as_i64())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use tempfile::TempDir;

    async fn setup() -> (Repository, UserId, UserId, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("roster.db")
            .to_string_lossy()
            .to_string();
        let repo = Repository::new(init_db(&db_path).await.unwrap());
        let (alice, bob) = (UserId::new(1), UserId::new(2));
        repo.ensure_user(alice).await.unwrap();
        repo.ensure_user(bob).await.unwrap();
        (repo, alice, bob, temp_dir)
    }

    fn named(name: &str, class: RpgClass) -> NewCharacter {
        NewCharacter {
            name: name.to_string(),
            class,
            ..NewCharacter::default()
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_character() {
        let (repo, alice, _bob, _temp) = setup().await;

        let id = repo
            .insert_character(alice, &named("Gimli", RpgClass::Knight))
            .await
            .unwrap();
        let character = repo.get_character(id, Some(alice)).await.unwrap().unwrap();

        assert_eq!(character.name, "Gimli");
        assert_eq!(character.hit_points, 100);
        assert_eq!(character.owner, alice);
        assert!(character.weapon.is_none());
        assert!(character.skills.is_empty());
    }

    #[tokio::test]
    async fn test_owner_filter() {
        let (repo, alice, bob, _temp) = setup().await;

        let id = repo
            .insert_character(alice, &named("Gimli", RpgClass::Knight))
            .await
            .unwrap();
        repo.insert_character(bob, &named("Legolas", RpgClass::Mage))
            .await
            .unwrap();

        assert!(repo.get_character(id, Some(bob)).await.unwrap().is_none());
        assert!(repo.get_character(id, None).await.unwrap().is_some());

        let alice_chars = repo.query_characters(Some(alice)).await.unwrap();
        assert_eq!(alice_chars.len(), 1);
        assert_eq!(alice_chars[0].name, "Gimli");
        assert_eq!(repo.query_characters(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_owner_violates_foreign_key() {
        let (repo, _alice, _bob, _temp) = setup().await;

        let result = repo
            .insert_character(UserId::new(999), &NewCharacter::default())
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update_respects_owner() {
        let (repo, alice, bob, _temp) = setup().await;
        let id = repo
            .insert_character(alice, &NewCharacter::default())
            .await
            .unwrap();

        let update = CharacterUpdate {
            id,
            name: "Sam".to_string(),
            hit_points: 90,
            strength: 14,
            defense: 9,
            intelligence: 8,
            class: RpgClass::Cleric,
        };

        assert!(!repo.update_character(&update, Some(bob)).await.unwrap());
        assert!(repo.update_character(&update, Some(alice)).await.unwrap());

        let character = repo.get_character(id, None).await.unwrap().unwrap();
        assert_eq!(character.name, "Sam");
        assert_eq!(character.class, RpgClass::Cleric);
    }

    #[tokio::test]
    async fn test_skills_and_weapon_loaded_with_character() {
        let (repo, alice, _bob, _temp) = setup().await;
        let id = repo
            .insert_character(alice, &NewCharacter::default())
            .await
            .unwrap();

        assert!(repo.insert_character_skill(id, SkillId::new(3)).await.unwrap());
        assert!(repo.insert_character_skill(id, SkillId::new(1)).await.unwrap());
        assert!(!repo.insert_character_skill(id, SkillId::new(1)).await.unwrap());

        let sting = Weapon {
            name: "Sting".to_string(),
            damage: 15,
        };
        repo.upsert_weapon(id, &sting).await.unwrap();
        let anduril = Weapon {
            name: "Anduril".to_string(),
            damage: 40,
        };
        repo.upsert_weapon(id, &anduril).await.unwrap();

        let listed = repo.query_characters(Some(alice)).await.unwrap();
        let character = &listed[0];
        let skill_names: Vec<&str> = character.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(skill_names, vec!["Fireball", "Blizzard"]);
        assert_eq!(character.weapon.as_ref(), Some(&anduril));

        let fetched = repo.get_character(id, Some(alice)).await.unwrap().unwrap();
        assert_eq!(&fetched, character);
    }

    #[tokio::test]
    async fn test_delete_cascades() {
        let (repo, alice, bob, _temp) = setup().await;
        let id = repo
            .insert_character(alice, &NewCharacter::default())
            .await
            .unwrap();
        repo.insert_character_skill(id, SkillId::new(2)).await.unwrap();

        assert!(!repo.delete_character(id, Some(bob)).await.unwrap());
        assert!(repo.delete_character(id, Some(alice)).await.unwrap());
        assert!(repo.get_character(id, None).await.unwrap().is_none());

        let (links,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM character_skills")
            .fetch_one(repo.pool())
            .await
            .unwrap();
        assert_eq!(links, 0);
    }
}
