//! # Gradebook Backend Library
//!
//! A REST API for tracking academic semesters, subjects and grades, guarded by an
//! API key and JWT authentication.
//!
//! ## Architecture
//!
//! Requests flow through the layers in one direction:
//!
//! - **Axum** router and middleware ([`app`], [`middleware`], [`routes`])
//! - services holding the business rules ([`service`])
//! - repositories wrapping single SQL statements ([`repository`])
//! - **SQLx** against SQLite ([`db`])
//!
//! ## Core Components
//!
//! - [`config`]: Layered configuration (embedded defaults, file, environment)
//! - [`error`]: The error enum and its HTTP rendering
//! - [`state`]: Shared pool and configuration
//! - [`types`]: Rows and request/response bodies
//! - [`validation`]: Registration input rules

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;
pub mod types;
pub mod validation;

#[cfg(test)]
mod tests;
