//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for patches;
//!   nullable columns use [`nullable::double_option`] so `null` clears them
//! - A `Deserialize` list-params struct for `?query` filters where the list is filterable

pub mod application;
pub mod conference;
pub mod dashboard;
pub mod journal;
pub mod lookup;
pub mod mentor;
pub mod nullable;
pub mod project;
pub mod publication;
pub mod rbm;
pub mod ready_for_publication;
pub mod status;
pub mod student;
pub mod tag;
pub mod user;
