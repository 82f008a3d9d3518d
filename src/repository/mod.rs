//! Data access for the four resources.
//!
//! Repositories borrow the pool and wrap single SQL statements. They return
//! `sqlx::Error` and leave every business rule (existence, uniqueness, ownership
//! messages) to the services.

pub mod grade;
pub mod semester;
pub mod subject;
pub mod user;

pub use grade::GradeRepository;
pub use semester::SemesterRepository;
pub use subject::SubjectRepository;
pub use user::UserRepository;

/// Fresh opaque identifier for a new row.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
