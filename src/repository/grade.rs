use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::new_id;
use crate::types::Grade;

/// Column values shared by grade inserts and updates.
#[derive(Debug, Clone)]
pub struct GradeFields<'f> {
    pub grade: &'f str,
    pub kind: &'f str,
    pub date: DateTime<Utc>,
}

pub struct GradeRepository<'a> {
    db: &'a SqlitePool,
}

impl<'a> GradeRepository<'a> {
    pub fn new(db: &'a SqlitePool) -> Self {
        Self { db }
    }

    pub async fn find_for_subject(&self, subject_id: &str) -> Result<Vec<Grade>, sqlx::Error> {
        sqlx::query_as::<_, Grade>(
            "SELECT * FROM grades WHERE subject_id = ?1 ORDER BY date, created_at",
        )
        .bind(subject_id)
        .fetch_all(self.db)
        .await
    }

    /// Looks a grade up by id, visible only to the owner of the semester above it.
    pub async fn find_owned(&self, id: &str, user_id: &str) -> Result<Option<Grade>, sqlx::Error> {
        sqlx::query_as::<_, Grade>(
            r#"SELECT grades.* FROM grades
               JOIN subjects ON subjects.id = grades.subject_id
               JOIN semesters ON semesters.id = subjects.semester_id
               WHERE grades.id = ?1 AND semesters.user_id = ?2"#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.db)
        .await
    }

    pub async fn create(
        &self,
        subject_id: &str,
        fields: &GradeFields<'_>,
    ) -> Result<Grade, sqlx::Error> {
        let now = Utc::now();
        sqlx::query_as::<_, Grade>(
            r#"INSERT INTO grades (id, subject_id, grade, grade_type, date, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
               RETURNING *"#,
        )
        .bind(new_id())
        .bind(subject_id)
        .bind(fields.grade)
        .bind(fields.kind)
        .bind(fields.date)
        .bind(now)
        .fetch_one(self.db)
        .await
    }

    pub async fn update(
        &self,
        id: &str,
        fields: &GradeFields<'_>,
    ) -> Result<Option<Grade>, sqlx::Error> {
        sqlx::query_as::<_, Grade>(
            r#"UPDATE grades SET grade = ?2, grade_type = ?3, date = ?4, updated_at = ?5
               WHERE id = ?1
               RETURNING *"#,
        )
        .bind(id)
        .bind(fields.grade)
        .bind(fields.kind)
        .bind(fields.date)
        .bind(Utc::now())
        .fetch_optional(self.db)
        .await
    }

    pub async fn delete(&self, id: &str) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM grades WHERE id = ?1").bind(id).execute(self.db).await?;
        Ok(result.rows_affected())
    }
}
