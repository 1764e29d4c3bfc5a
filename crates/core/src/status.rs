//! Text-valued status vocabularies for the publication pipeline.
//!
//! Both vocabularies are stored as `TEXT` columns guarded by `CHECK`
//! constraints. Request DTOs carry them as plain strings and parse them
//! here so an unknown literal surfaces as a validation error instead of a
//! deserialization rejection.
//!
//! No transition table is enforced: any status may be set to any other.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

macro_rules! define_text_status {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in pipeline order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// The literal stored in the database.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $val ),+
                }
            }

            /// All accepted literals, in pipeline order.
            pub fn literals() -> Vec<&'static str> {
                Self::ALL.iter().map(|s| s.as_str()).collect()
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $( $val => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Invalid {} '{other}'. Must be one of: {}",
                        $label,
                        Self::literals().join(", ")
                    ))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

define_text_status! {
    /// Stage of a paper on the ready-for-publication list.
    ReadyStatus ("ready-for-publication status") {
        Pending = "pending",
        InReview = "in_review",
        Approved = "approved",
        Published = "published",
    }
}

define_text_status! {
    /// Outcome of a single conference or journal submission.
    ApplicationStatus ("application status") {
        Applied = "applied",
        UnderReview = "under_review",
        Accepted = "accepted",
        Rejected = "rejected",
        Withdrawn = "withdrawn",
    }
}

define_text_status! {
    /// Kind of venue a publication appeared in.
    VenueType ("venue type") {
        Conference = "Conference",
        Journal = "Journal",
    }
}

define_text_status! {
    /// Whether a project produced a working prototype.
    HasPrototype ("has_prototype value") {
        Yes = "Yes",
        No = "No",
    }
}

impl ReadyStatus {
    /// Papers at this stage appear in the in-publication view.
    pub fn is_in_publication(self) -> bool {
        self == ReadyStatus::Approved
    }
}

impl ApplicationStatus {
    /// A decision has been made or the submission was pulled.
    pub fn is_final(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Accepted | ApplicationStatus::Rejected | ApplicationStatus::Withdrawn
        )
    }
}

/// Parse an optional status literal, passing `None` through.
pub fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>, CoreError>
where
    T: FromStr<Err = CoreError>,
{
    value.map(str::parse).transpose()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn ready_status_parses_every_literal() {
        for status in ReadyStatus::ALL {
            assert_eq!(status.as_str().parse::<ReadyStatus>().unwrap(), *status);
        }
        assert_eq!(ReadyStatus::ALL.len(), 4);
    }

    #[test]
    fn ready_status_rejects_unknown_literal() {
        let err = "archived".parse::<ReadyStatus>().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("pending, in_review, approved, published"));
    }

    #[test]
    fn ready_status_is_case_sensitive() {
        assert!("Approved".parse::<ReadyStatus>().is_err());
    }

    #[test]
    fn only_approved_is_in_publication() {
        assert!(ReadyStatus::Approved.is_in_publication());
        assert!(!ReadyStatus::Published.is_in_publication());
        assert!(!ReadyStatus::Pending.is_in_publication());
    }

    #[test]
    fn application_status_final_states() {
        assert!(ApplicationStatus::Accepted.is_final());
        assert!(ApplicationStatus::Withdrawn.is_final());
        assert!(!ApplicationStatus::UnderReview.is_final());
        assert!("pending".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn venue_type_uses_capitalized_literals() {
        assert_eq!("Conference".parse::<VenueType>().unwrap(), VenueType::Conference);
        assert!("conference".parse::<VenueType>().is_err());
    }

    #[test]
    fn parse_optional_passes_none_through() {
        assert_eq!(parse_optional::<HasPrototype>(None).unwrap(), None);
        assert_eq!(
            parse_optional::<HasPrototype>(Some("Yes")).unwrap(),
            Some(HasPrototype::Yes)
        );
        assert!(parse_optional::<HasPrototype>(Some("maybe")).is_err());
    }

    #[test]
    fn serializes_as_literal() {
        let json = serde_json::to_string(&ApplicationStatus::UnderReview).unwrap();
        assert_eq!(json, "\"under_review\"");
    }
}
