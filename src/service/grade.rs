use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult, OptionExt},
    repository::{grade::GradeFields, GradeRepository, SubjectRepository},
    service::subject::SUBJECT_NOT_FOUND,
    types::Grade,
    validation::require_non_empty,
};

pub const GRADE_NOT_FOUND: &str = "Grade not found.";

/// Grade values as sent by the client, before validation.
#[derive(Debug, Clone)]
pub struct GradeInput<'i> {
    pub grade: &'i str,
    pub kind: &'i str,
    pub date: DateTime<Utc>,
}

impl<'i> GradeInput<'i> {
    fn validated(&self) -> AppResult<GradeFields<'i>> {
        Ok(GradeFields {
            grade: require_non_empty(self.grade, "grade")?,
            kind: require_non_empty(self.kind, "type")?,
            date: self.date,
        })
    }
}

pub struct GradeService<'a> {
    db: &'a SqlitePool,
}

impl<'a> GradeService<'a> {
    pub fn new(db: &'a SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list_for_subject(&self, subject_id: &str, user_id: &str) -> AppResult<Vec<Grade>> {
        let subject = SubjectRepository::new(self.db)
            .find_owned(subject_id, user_id)
            .await?
            .ok_or_not_found(SUBJECT_NOT_FOUND)?;

        let grades = GradeRepository::new(self.db).find_for_subject(&subject.id).await?;
        if grades.is_empty() {
            return Err(AppError::NotFound("No grades found for this subject.".to_string()));
        }
        Ok(grades)
    }

    pub async fn create(
        &self,
        subject_id: &str,
        input: &GradeInput<'_>,
        user_id: &str,
    ) -> AppResult<Grade> {
        let fields = input.validated()?;
        let subject_id = require_non_empty(subject_id, "subjectId")?;

        let subject = SubjectRepository::new(self.db)
            .find_owned(subject_id, user_id)
            .await?
            .ok_or_not_found(SUBJECT_NOT_FOUND)?;

        let grade = GradeRepository::new(self.db).create(&subject.id, &fields).await?;
        tracing::info!(grade_id = %grade.id, subject_id = %subject.id, "Grade created");
        Ok(grade)
    }

    pub async fn update(&self, id: &str, input: &GradeInput<'_>, user_id: &str) -> AppResult<Grade> {
        let fields = input.validated()?;
        let repo = GradeRepository::new(self.db);

        let existing = repo.find_owned(id, user_id).await?.ok_or_not_found(GRADE_NOT_FOUND)?;

        repo.update(&existing.id, &fields)
            .await?
            .ok_or_else(|| AppError::Server("Failed to update grade.".to_string()))
    }

    pub async fn delete(&self, id: &str, user_id: &str) -> AppResult<Grade> {
        let repo = GradeRepository::new(self.db);
        let existing = repo.find_owned(id, user_id).await?.ok_or_not_found(GRADE_NOT_FOUND)?;

        if repo.delete(&existing.id).await? == 0 {
            return Err(AppError::Server("Failed to delete grade.".to_string()));
        }
        tracing::info!(grade_id = %existing.id, "Grade deleted");
        Ok(existing)
    }
}
