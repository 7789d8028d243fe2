//! Skill catalogue queries.

use super::Repository;
use crate::domain::{Skill, SkillId};
use sqlx::Row;

impl Repository {
    /// Get a catalogue skill by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn find_skill(&self, id: SkillId) -> Result<Option<Skill>, sqlx::Error> {
        let row = sqlx::query("SELECT id, name, damage FROM skills WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| Skill::new(SkillId::new(r.get("id")), r.get::<String, _>("name"), r.get("damage"))))
    }
}
