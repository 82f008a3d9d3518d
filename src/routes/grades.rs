use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::{AppJson, AppQuery};
use crate::{
    error::{AppError, AppResult},
    middleware::AuthUser,
    service::{grade::GradeInput, GradeService},
    state::AppState,
    types::{CreateGradeRequest, Envelope, Grade, GradeListQuery, UpdateGradeRequest},
};

/// `GET /grades?subjectId=...`
pub async fn list_grades(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(query): AppQuery<GradeListQuery>,
) -> AppResult<Json<Envelope<Vec<Grade>>>> {
    let subject_id = query
        .subject_id
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::Invalid("\"subjectId\" is required".to_string()))?;
    let grades = GradeService::new(&state.db).list_for_subject(&subject_id, &user.id).await?;
    Ok(Json(Envelope::new("Grades found.", grades)))
}

/// `GET /grades/{subjectId}`, same listing with the subject in the path.
pub async fn list_grades_for_subject(
    State(state): State<AppState>,
    user: AuthUser,
    Path(subject_id): Path<String>,
) -> AppResult<Json<Envelope<Vec<Grade>>>> {
    let grades = GradeService::new(&state.db).list_for_subject(&subject_id, &user.id).await?;
    Ok(Json(Envelope::new("Grades found.", grades)))
}

pub async fn create_grade(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<CreateGradeRequest>,
) -> AppResult<(StatusCode, Json<Envelope<Grade>>)> {
    let input = GradeInput { grade: &req.grade, kind: &req.kind, date: req.date };
    let grade = GradeService::new(&state.db).create(&req.subject_id, &input, &user.id).await?;
    Ok((StatusCode::CREATED, Json(Envelope::new("Grade created.", grade))))
}

pub async fn update_grade(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateGradeRequest>,
) -> AppResult<Json<Envelope<Grade>>> {
    let input = GradeInput { grade: &req.grade, kind: &req.kind, date: req.date };
    let grade = GradeService::new(&state.db).update(&id, &input, &user.id).await?;
    Ok(Json(Envelope::new("Grade updated.", grade)))
}

pub async fn delete_grade(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<Grade>>> {
    let grade = GradeService::new(&state.db).delete(&id, &user.id).await?;
    Ok(Json(Envelope::new("Grade deleted.", grade)))
}
