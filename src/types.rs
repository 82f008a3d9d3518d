use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

// Rows

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub username: String,
    /// bcrypt hash, never exposed in JSON
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    pub id: String,
    pub semester: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub semester_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: String,
    pub subject_id: String,
    pub grade: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "grade_type")]
    pub kind: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SemesterWithSubjects {
    #[serde(flatten)]
    pub semester: Semester,
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectWithGrades {
    #[serde(flatten)]
    pub subject: Subject,
    pub grades: Vec<Grade>,
}

// Envelope

/// Success body shared by every resource endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub message: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self { message: message.into(), data }
    }
}

// Auth DTOs

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Any other keys in the body; registration rejects them.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Login accepts either field name; `identifier` wins, then `email`, then `username`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub identifier: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginUser {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginPayload {
    pub token: String,
    pub user: LoginUser,
}

// Semester DTOs

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SemesterListQuery {
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SemesterRequest {
    #[serde(default)]
    pub semester: String,
}

// Subject DTOs

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectListQuery {
    pub semester_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubjectRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub semester_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubjectRequest {
    #[serde(default)]
    pub name: String,
}

// Grade DTOs

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeListQuery {
    pub subject_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGradeRequest {
    #[serde(default)]
    pub subject_id: String,
    #[serde(default)]
    pub grade: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(deserialize_with = "deserialize_grade_date")]
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGradeRequest {
    #[serde(default)]
    pub grade: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(deserialize_with = "deserialize_grade_date")]
    pub date: DateTime<Utc>,
}

/// Parses an RFC 3339 timestamp, or a plain `YYYY-MM-DD` date taken as midnight UTC.
pub fn parse_grade_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn deserialize_grade_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_grade_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid date {:?}, expected RFC 3339 or YYYY-MM-DD",
            raw
        ))
    })
}
