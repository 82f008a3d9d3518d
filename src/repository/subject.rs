use chrono::Utc;
use sqlx::SqlitePool;

use super::{new_id, GradeRepository};
use crate::types::{Subject, SubjectWithGrades};

pub struct SubjectRepository<'a> {
    db: &'a SqlitePool,
}

impl<'a> SubjectRepository<'a> {
    pub fn new(db: &'a SqlitePool) -> Self {
        Self { db }
    }

    pub async fn find_for_semester(&self, semester_id: &str) -> Result<Vec<Subject>, sqlx::Error> {
        sqlx::query_as::<_, Subject>(
            "SELECT * FROM subjects WHERE semester_id = ?1 ORDER BY created_at, name",
        )
        .bind(semester_id)
        .fetch_all(self.db)
        .await
    }

    /// Looks a subject up by id, visible only to the owner of its semester.
    pub async fn find_owned(&self, id: &str, user_id: &str) -> Result<Option<Subject>, sqlx::Error> {
        sqlx::query_as::<_, Subject>(
            r#"SELECT subjects.* FROM subjects
               JOIN semesters ON semesters.id = subjects.semester_id
               WHERE subjects.id = ?1 AND semesters.user_id = ?2"#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.db)
        .await
    }

    pub async fn find_by_name(
        &self,
        semester_id: &str,
        name: &str,
    ) -> Result<Option<Subject>, sqlx::Error> {
        sqlx::query_as::<_, Subject>(
            "SELECT * FROM subjects WHERE semester_id = ?1 AND name = ?2 LIMIT 1",
        )
        .bind(semester_id)
        .bind(name)
        .fetch_optional(self.db)
        .await
    }

    pub async fn find_with_grades(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<Option<SubjectWithGrades>, sqlx::Error> {
        let Some(subject) = self.find_owned(id, user_id).await? else {
            return Ok(None);
        };
        let grades = GradeRepository::new(self.db).find_for_subject(&subject.id).await?;
        Ok(Some(SubjectWithGrades { subject, grades }))
    }

    pub async fn create(&self, semester_id: &str, name: &str) -> Result<Subject, sqlx::Error> {
        let now = Utc::now();
        sqlx::query_as::<_, Subject>(
            r#"INSERT INTO subjects (id, name, semester_id, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?4)
               RETURNING *"#,
        )
        .bind(new_id())
        .bind(name)
        .bind(semester_id)
        .bind(now)
        .fetch_one(self.db)
        .await
    }

    pub async fn update(&self, id: &str, name: &str) -> Result<Option<Subject>, sqlx::Error> {
        sqlx::query_as::<_, Subject>(
            "UPDATE subjects SET name = ?2, updated_at = ?3 WHERE id = ?1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(Utc::now())
        .fetch_optional(self.db)
        .await
    }

    pub async fn delete(&self, id: &str) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM subjects WHERE id = ?1").bind(id).execute(self.db).await?;
        Ok(result.rows_affected())
    }
}
