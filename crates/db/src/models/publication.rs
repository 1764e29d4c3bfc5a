//! Published paper model and DTOs.
//!
//! One row holds both conference-only and journal-only columns; which set
//! is populated is decided by `venue_type`.

use chrono::NaiveDate;
use mentorhub_core::status::VenueType;
use mentorhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::nullable::double_option;

/// A row from the `publications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Publication {
    pub id: DbId,
    /// Generated `PUB<year><seq>` code.
    pub publication_code: String,
    pub project_id: DbId,
    pub paper_title: String,
    /// `"Conference"` or `"Journal"`.
    pub venue_type: String,
    pub doi: Option<String>,
    pub published_on: Option<NaiveDate>,
    pub notes: Option<String>,
    pub conference_name: Option<String>,
    pub conference_location: Option<String>,
    pub conference_date: Option<NaiveDate>,
    pub proceedings_link: Option<String>,
    pub journal_name: Option<String>,
    pub journal_publisher: Option<String>,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub journal_link: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// List row joined with the owning project.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicationSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub publication: Publication,
    pub project_code: String,
    pub project_name: String,
}

/// Every writable publication column. Used for inserts and, after merging
/// with the stored row, for updates.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PublicationInput {
    pub project_id: DbId,
    #[validate(length(min = 1, max = 500, message = "must not be empty"))]
    pub paper_title: String,
    pub venue_type: String,
    pub doi: Option<String>,
    pub published_on: Option<NaiveDate>,
    pub notes: Option<String>,
    pub conference_name: Option<String>,
    pub conference_location: Option<String>,
    pub conference_date: Option<NaiveDate>,
    #[validate(url)]
    pub proceedings_link: Option<String>,
    pub journal_name: Option<String>,
    pub journal_publisher: Option<String>,
    pub volume: Option<String>,
    pub issue: Option<String>,
    #[validate(url)]
    pub journal_link: Option<String>,
}

/// DTO for creating a publication.
pub type CreatePublication = PublicationInput;

/// DTO for updating a publication. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePublication {
    pub project_id: Option<DbId>,
    #[validate(length(min = 1, max = 500, message = "must not be empty"))]
    pub paper_title: Option<String>,
    pub venue_type: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub doi: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub published_on: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub conference_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub conference_location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub conference_date: Option<Option<NaiveDate>>,
    #[validate(url)]
    #[serde(default, deserialize_with = "double_option")]
    pub proceedings_link: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub journal_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub journal_publisher: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub volume: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub issue: Option<Option<String>>,
    #[validate(url)]
    #[serde(default, deserialize_with = "double_option")]
    pub journal_link: Option<Option<String>>,
}

impl PublicationInput {
    /// Overlay an update onto the stored row. Absent keys keep the stored
    /// value; an explicit `null` clears it.
    pub fn merged(existing: &Publication, update: &UpdatePublication) -> Self {
        fn pick<T: Clone>(new: &Option<Option<T>>, old: &Option<T>) -> Option<T> {
            match new {
                Some(value) => value.clone(),
                None => old.clone(),
            }
        }

        Self {
            project_id: update.project_id.unwrap_or(existing.project_id),
            paper_title: update
                .paper_title
                .clone()
                .unwrap_or_else(|| existing.paper_title.clone()),
            venue_type: update
                .venue_type
                .clone()
                .unwrap_or_else(|| existing.venue_type.clone()),
            doi: pick(&update.doi, &existing.doi),
            published_on: pick(&update.published_on, &existing.published_on),
            notes: pick(&update.notes, &existing.notes),
            conference_name: pick(&update.conference_name, &existing.conference_name),
            conference_location: pick(&update.conference_location, &existing.conference_location),
            conference_date: pick(&update.conference_date, &existing.conference_date),
            proceedings_link: pick(&update.proceedings_link, &existing.proceedings_link),
            journal_name: pick(&update.journal_name, &existing.journal_name),
            journal_publisher: pick(&update.journal_publisher, &existing.journal_publisher),
            volume: pick(&update.volume, &existing.volume),
            issue: pick(&update.issue, &existing.issue),
            journal_link: pick(&update.journal_link, &existing.journal_link),
        }
    }

    /// Null out every column that belongs to the other venue type.
    pub fn retain_venue_fields(mut self, venue: VenueType) -> Self {
        match venue {
            VenueType::Conference => {
                self.journal_name = None;
                self.journal_publisher = None;
                self.volume = None;
                self.issue = None;
                self.journal_link = None;
            }
            VenueType::Journal => {
                self.conference_name = None;
                self.conference_location = None;
                self.conference_date = None;
                self.proceedings_link = None;
            }
        }
        self.venue_type = venue.as_str().to_string();
        self
    }
}

/// Query parameters for `GET /publications`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicationListParams {
    pub search: Option<String>,
    pub venue_type: Option<String>,
    pub project_id: Option<DbId>,
    /// Calendar year of `published_on`.
    pub year: Option<i32>,
}
