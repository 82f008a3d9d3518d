use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult, OptionExt},
    repository::SemesterRepository,
    types::{Semester, SemesterWithSubjects},
    validation::require_non_empty,
};

pub const SEMESTER_NOT_FOUND: &str = "Semester not found.";

pub struct SemesterService<'a> {
    db: &'a SqlitePool,
}

impl<'a> SemesterService<'a> {
    pub fn new(db: &'a SqlitePool) -> Self {
        Self { db }
    }

    /// All semesters of the user, or only those whose name contains `search`.
    pub async fn list(&self, user_id: &str, search: Option<&str>) -> AppResult<Vec<Semester>> {
        let repo = SemesterRepository::new(self.db);
        match search.filter(|s| !s.is_empty()) {
            Some(term) => {
                let semesters = repo.search_for_user(user_id, term).await?;
                if semesters.is_empty() {
                    return Err(AppError::NotFound(
                        "No semesters found for this user or this search term.".to_string(),
                    ));
                }
                Ok(semesters)
            }
            None => {
                let semesters = repo.find_for_user(user_id).await?;
                if semesters.is_empty() {
                    return Err(AppError::NotFound("No semesters found for this user.".to_string()));
                }
                Ok(semesters)
            }
        }
    }

    pub async fn get_with_subjects(&self, id: &str, user_id: &str) -> AppResult<SemesterWithSubjects> {
        SemesterRepository::new(self.db)
            .find_with_subjects(id, user_id)
            .await?
            .ok_or_not_found(SEMESTER_NOT_FOUND)
    }

    pub async fn create(&self, user_id: &str, name: &str) -> AppResult<Semester> {
        let name = require_non_empty(name, "semester")?;
        let repo = SemesterRepository::new(self.db);

        if repo.find_by_name(user_id, name).await?.is_some() {
            return Err(AppError::Conflict("Semester already exists for this user.".to_string()));
        }

        let semester = repo.create(user_id, name).await?;
        tracing::info!(semester_id = %semester.id, %user_id, "Semester created");
        Ok(semester)
    }

    /// Renames a semester. Keeping the current name is not a conflict.
    pub async fn update(&self, id: &str, user_id: &str, name: &str) -> AppResult<Semester> {
        let name = require_non_empty(name, "semester")?;
        let repo = SemesterRepository::new(self.db);

        let existing = repo.find_owned(id, user_id).await?.ok_or_not_found(SEMESTER_NOT_FOUND)?;

        if let Some(other) = repo.find_by_name(user_id, name).await? {
            if other.id != existing.id {
                return Err(AppError::Conflict("Semester already exists for this user.".to_string()));
            }
        }

        repo.update(&existing.id, name)
            .await?
            .ok_or_else(|| AppError::Server("Failed to update semester.".to_string()))
    }

    /// Deletes a semester and returns the removed record.
    pub async fn delete(&self, id: &str, user_id: &str) -> AppResult<Semester> {
        let repo = SemesterRepository::new(self.db);
        let existing = repo.find_owned(id, user_id).await?.ok_or_not_found(SEMESTER_NOT_FOUND)?;

        if repo.delete(&existing.id).await? == 0 {
            return Err(AppError::Server("Failed to delete semester.".to_string()));
        }
        tracing::info!(semester_id = %existing.id, %user_id, "Semester deleted");
        Ok(existing)
    }
}
