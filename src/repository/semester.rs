use chrono::Utc;
use sqlx::SqlitePool;

use super::{new_id, SubjectRepository};
use crate::types::{Semester, SemesterWithSubjects};

pub struct SemesterRepository<'a> {
    db: &'a SqlitePool,
}

impl<'a> SemesterRepository<'a> {
    pub fn new(db: &'a SqlitePool) -> Self {
        Self { db }
    }

    pub async fn find_for_user(&self, user_id: &str) -> Result<Vec<Semester>, sqlx::Error> {
        sqlx::query_as::<_, Semester>(
            "SELECT * FROM semesters WHERE user_id = ?1 ORDER BY created_at, semester",
        )
        .bind(user_id)
        .fetch_all(self.db)
        .await
    }

    /// Semesters of `user_id` whose name contains `search` (case-sensitive).
    pub async fn search_for_user(
        &self,
        user_id: &str,
        search: &str,
    ) -> Result<Vec<Semester>, sqlx::Error> {
        sqlx::query_as::<_, Semester>(
            r#"SELECT * FROM semesters
               WHERE user_id = ?1 AND instr(semester, ?2) > 0
               ORDER BY created_at, semester"#,
        )
        .bind(user_id)
        .bind(search)
        .fetch_all(self.db)
        .await
    }

    /// Looks a semester up by id, visible only to its owner.
    pub async fn find_owned(&self, id: &str, user_id: &str) -> Result<Option<Semester>, sqlx::Error> {
        sqlx::query_as::<_, Semester>("SELECT * FROM semesters WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(self.db)
            .await
    }

    pub async fn find_by_name(
        &self,
        user_id: &str,
        name: &str,
    ) -> Result<Option<Semester>, sqlx::Error> {
        sqlx::query_as::<_, Semester>(
            "SELECT * FROM semesters WHERE user_id = ?1 AND semester = ?2 LIMIT 1",
        )
        .bind(user_id)
        .bind(name)
        .fetch_optional(self.db)
        .await
    }

    pub async fn find_with_subjects(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<Option<SemesterWithSubjects>, sqlx::Error> {
        let Some(semester) = self.find_owned(id, user_id).await? else {
            return Ok(None);
        };
        let subjects = SubjectRepository::new(self.db).find_for_semester(&semester.id).await?;
        Ok(Some(SemesterWithSubjects { semester, subjects }))
    }

    pub async fn create(&self, user_id: &str, name: &str) -> Result<Semester, sqlx::Error> {
        let now = Utc::now();
        sqlx::query_as::<_, Semester>(
            r#"INSERT INTO semesters (id, semester, user_id, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?4)
               RETURNING *"#,
        )
        .bind(new_id())
        .bind(name)
        .bind(user_id)
        .bind(now)
        .fetch_one(self.db)
        .await
    }

    pub async fn update(&self, id: &str, name: &str) -> Result<Option<Semester>, sqlx::Error> {
        sqlx::query_as::<_, Semester>(
            "UPDATE semesters SET semester = ?2, updated_at = ?3 WHERE id = ?1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(Utc::now())
        .fetch_optional(self.db)
        .await
    }

    pub async fn delete(&self, id: &str) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM semesters WHERE id = ?1").bind(id).execute(self.db).await?;
        Ok(result.rows_affected())
    }
}
