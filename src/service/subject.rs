use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult, OptionExt},
    repository::{SemesterRepository, SubjectRepository},
    service::semester::SEMESTER_NOT_FOUND,
    types::{Subject, SubjectWithGrades},
    validation::require_non_empty,
};

pub const SUBJECT_NOT_FOUND: &str = "Subject not found.";
const DUPLICATE_SUBJECT: &str = "Subject with this name already exists for this semester.";

pub struct SubjectService<'a> {
    db: &'a SqlitePool,
}

impl<'a> SubjectService<'a> {
    pub fn new(db: &'a SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list_for_semester(&self, semester_id: &str, user_id: &str) -> AppResult<Vec<Subject>> {
        let semester = SemesterRepository::new(self.db)
            .find_owned(semester_id, user_id)
            .await?
            .ok_or_not_found(SEMESTER_NOT_FOUND)?;

        let subjects = SubjectRepository::new(self.db).find_for_semester(&semester.id).await?;
        if subjects.is_empty() {
            return Err(AppError::NotFound("No subjects found for this semester.".to_string()));
        }
        Ok(subjects)
    }

    pub async fn get_with_grades(&self, id: &str, user_id: &str) -> AppResult<SubjectWithGrades> {
        SubjectRepository::new(self.db)
            .find_with_grades(id, user_id)
            .await?
            .ok_or_not_found(SUBJECT_NOT_FOUND)
    }

    /// Creates a subject; names are unique within one semester only.
    pub async fn create(&self, semester_id: &str, name: &str, user_id: &str) -> AppResult<Subject> {
        let name = require_non_empty(name, "name")?;
        let semester_id = require_non_empty(semester_id, "semesterId")?;

        let semester = SemesterRepository::new(self.db)
            .find_owned(semester_id, user_id)
            .await?
            .ok_or_not_found(SEMESTER_NOT_FOUND)?;

        let repo = SubjectRepository::new(self.db);
        if repo.find_by_name(&semester.id, name).await?.is_some() {
            return Err(AppError::Conflict(DUPLICATE_SUBJECT.to_string()));
        }

        let subject = repo.create(&semester.id, name).await?;
        tracing::info!(subject_id = %subject.id, semester_id = %semester.id, "Subject created");
        Ok(subject)
    }

    /// Renames a subject. Keeping the current name is not a conflict.
    pub async fn update(&self, id: &str, name: &str, user_id: &str) -> AppResult<Subject> {
        let name = require_non_empty(name, "name")?;
        let repo = SubjectRepository::new(self.db);

        let existing = repo.find_owned(id, user_id).await?.ok_or_not_found(SUBJECT_NOT_FOUND)?;

        if let Some(other) = repo.find_by_name(&existing.semester_id, name).await? {
            if other.id != existing.id {
                return Err(AppError::Conflict(DUPLICATE_SUBJECT.to_string()));
            }
        }

        repo.update(&existing.id, name)
            .await?
            .ok_or_else(|| AppError::Server("Subject not found or failed to update.".to_string()))
    }

    pub async fn delete(&self, id: &str, user_id: &str) -> AppResult<Subject> {
        let repo = SubjectRepository::new(self.db);
        let existing = repo.find_owned(id, user_id).await?.ok_or_not_found(SUBJECT_NOT_FOUND)?;

        if repo.delete(&existing.id).await? == 0 {
            return Err(AppError::Server("Failed to delete subject.".to_string()));
        }
        tracing::info!(subject_id = %existing.id, "Subject deleted");
        Ok(existing)
    }
}
