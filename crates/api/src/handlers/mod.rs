//! Request handlers.
//!
//! Each submodule holds the async handlers for one resource. Handlers
//! validate and parse input, delegate to the repositories in `mentorhub_db`,
//! and map errors through [`AppError`](crate::error::AppError).

pub mod admin;
pub mod applications;
pub mod auth;
pub mod conferences;
pub mod dashboard;
pub mod in_publication;
pub mod journals;
pub mod lookups;
pub mod mentors;
pub mod projects;
pub mod publications;
pub mod rbms;
pub mod ready_for_publication;
pub mod students;
pub mod tags;
