//! Domain rules for the mentorship admin service.
//!
//! Everything here is pure: no database or HTTP types. The db and api
//! crates call into these modules for validation, status parsing, code
//! generation, and date arithmetic.

pub mod codes;
pub mod deadline;
pub mod error;
pub mod roles;
pub mod search;
pub mod status;
pub mod tags;
pub mod types;
pub mod validation;
