use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::{AppJson, AppQuery};
use crate::{
    error::{AppError, AppResult},
    middleware::AuthUser,
    service::SubjectService,
    state::AppState,
    types::{
        CreateSubjectRequest, Envelope, Subject, SubjectListQuery, SubjectWithGrades,
        UpdateSubjectRequest,
    },
};

pub async fn list_subjects(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(query): AppQuery<SubjectListQuery>,
) -> AppResult<Json<Envelope<Vec<Subject>>>> {
    let semester_id = query
        .semester_id
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::Invalid("\"semesterId\" is required".to_string()))?;
    let subjects = SubjectService::new(&state.db).list_for_semester(&semester_id, &user.id).await?;
    Ok(Json(Envelope::new("Subjects found.", subjects)))
}

pub async fn get_subject(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<SubjectWithGrades>>> {
    let subject = SubjectService::new(&state.db).get_with_grades(&id, &user.id).await?;
    Ok(Json(Envelope::new("Subject found.", subject)))
}

pub async fn create_subject(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<CreateSubjectRequest>,
) -> AppResult<(StatusCode, Json<Envelope<Subject>>)> {
    let subject =
        SubjectService::new(&state.db).create(&req.semester_id, &req.name, &user.id).await?;
    Ok((StatusCode::CREATED, Json(Envelope::new("Subject created.", subject))))
}

pub async fn update_subject(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateSubjectRequest>,
) -> AppResult<Json<Envelope<Subject>>> {
    let subject = SubjectService::new(&state.db).update(&id, &req.name, &user.id).await?;
    Ok(Json(Envelope::new("Subject updated.", subject)))
}

pub async fn delete_subject(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<Subject>>> {
    let subject = SubjectService::new(&state.db).delete(&id, &user.id).await?;
    Ok(Json(Envelope::new(format!("Subject '{}' deleted.", subject.name), subject)))
}
