//! Small reference tables used to populate dropdowns: subjects, boards, counselors.

use mentorhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from a name-only lookup table (`subjects`, `boards`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NamedLookup {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a name-only lookup entry.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNamedLookup {
    #[validate(length(min = 1, max = 200, message = "must not be empty"))]
    pub name: String,
}

/// A row from the `counselors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Counselor {
    pub id: DbId,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a counselor.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCounselor {
    #[validate(length(min = 1, max = 200, message = "must not be empty"))]
    pub full_name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Which name-only lookup table an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTable {
    Subjects,
    Boards,
}

impl LookupTable {
    pub fn table_name(self) -> &'static str {
        match self {
            LookupTable::Subjects => "subjects",
            LookupTable::Boards => "boards",
        }
    }

    /// Entity label used in not-found errors.
    pub fn entity(self) -> &'static str {
        match self {
            LookupTable::Subjects => "Subject",
            LookupTable::Boards => "Board",
        }
    }
}
