//! Business rules between the routes and the repositories.
//!
//! Services are created per request from a borrowed pool. Every resource method
//! takes the authenticated user's id; records owned by someone else behave as if
//! they did not exist.

pub mod auth;
pub mod grade;
pub mod semester;
pub mod subject;

pub use auth::AuthService;
pub use grade::GradeService;
pub use semester::SemesterService;
pub use subject::SubjectService;
