//! Project status lookup mapping to the `project_statuses` table.
//!
//! Each enum variant's discriminant matches the seed data in
//! `20260301000003_create_lookup_tables.sql`.

use serde::Serialize;
use sqlx::FromRow;

/// Status ID type matching SMALLINT in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Project lifecycle status.
    ProjectStatus {
        NotStarted = 1,
        InProgress = 2,
        OnHold = 3,
        Completed = 4,
        Cancelled = 5,
    }
}

/// A row from `project_statuses`, used to populate status dropdowns.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectStatusRow {
    pub id: StatusId,
    pub name: String,
    pub sort_order: i16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_status_ids_match_seed_data() {
        assert_eq!(ProjectStatus::NotStarted.id(), 1);
        assert_eq!(ProjectStatus::InProgress.id(), 2);
        assert_eq!(ProjectStatus::OnHold.id(), 3);
        assert_eq!(ProjectStatus::Completed.id(), 4);
        assert_eq!(ProjectStatus::Cancelled.id(), 5);
    }

    #[test]
    fn status_into_status_id() {
        let id: StatusId = ProjectStatus::InProgress.into();
        assert_eq!(id, 2);
    }
}
