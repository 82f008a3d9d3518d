//! Integration and unit tests for the Gradebook API.
//!
//! ## Test Modules
//!
//! - **support**: Temporary databases, test configuration and request helpers
//! - **error_tests**: Error kinds, statuses and response bodies
//! - **validation_tests**: Registration rules
//! - **config_tests**: Configuration defaults, overrides and validation
//! - **db_tests**: Schema initialization and constraints
//! - **repository_tests**: SQL wrappers
//! - **service_tests**: Business rules without HTTP
//! - **auth_api_tests**: Registration, login and user endpoints
//! - **resource_api_tests**: Semester, subject and grade endpoints
//! - **health_api_tests**: Health check endpoint tests
//!
//! Individual test modules can be run with:
//! ```bash
//! cargo test service_tests
//! cargo test auth_api_tests
//! # etc.
//! ```

pub mod support;

pub mod auth_api_tests;
