use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::{AppJson, AppQuery};
use crate::{
    error::AppResult,
    middleware::AuthUser,
    service::SemesterService,
    state::AppState,
    types::{Envelope, Semester, SemesterListQuery, SemesterRequest, SemesterWithSubjects},
};

pub async fn list_semesters(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(query): AppQuery<SemesterListQuery>,
) -> AppResult<Json<Envelope<Vec<Semester>>>> {
    let semesters = SemesterService::new(&state.db).list(&user.id, query.search.as_deref()).await?;
    Ok(Json(Envelope::new("Semesters found.", semesters)))
}

pub async fn get_semester(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<SemesterWithSubjects>>> {
    let semester = SemesterService::new(&state.db).get_with_subjects(&id, &user.id).await?;
    Ok(Json(Envelope::new("Semester found.", semester)))
}

pub async fn create_semester(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<SemesterRequest>,
) -> AppResult<(StatusCode, Json<Envelope<Semester>>)> {
    let semester = SemesterService::new(&state.db).create(&user.id, &req.semester).await?;
    Ok((StatusCode::CREATED, Json(Envelope::new("Semester created.", semester))))
}

pub async fn update_semester(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    AppJson(req): AppJson<SemesterRequest>,
) -> AppResult<Json<Envelope<Semester>>> {
    let semester = SemesterService::new(&state.db).update(&id, &user.id, &req.semester).await?;
    Ok(Json(Envelope::new("Semester updated.", semester)))
}

pub async fn delete_semester(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<Semester>>> {
    let semester = SemesterService::new(&state.db).delete(&id, &user.id).await?;
    Ok(Json(Envelope::new(format!("Semester '{}' deleted.", semester.semester), semester)))
}
