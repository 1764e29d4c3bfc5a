//! Repository for the `publications` table.

use mentorhub_core::codes::PUBLICATION_PREFIX;
use mentorhub_core::search::normalize_search;
use mentorhub_core::status::VenueType;
use mentorhub_core::types::DbId;
use sqlx::PgPool;

use crate::filter::FilterBuilder;
use crate::models::publication::{
    Publication, PublicationInput, PublicationListParams, PublicationSummary,
};
use crate::repositories::code_seq;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, publication_code, project_id, paper_title, venue_type, doi, published_on, notes, \
    conference_name, conference_location, conference_date, proceedings_link, \
    journal_name, journal_publisher, volume, issue, journal_link, created_at, updated_at";

const SUMMARY_SELECT: &str = "\
    SELECT pub.id, pub.publication_code, pub.project_id, pub.paper_title, pub.venue_type, \
           pub.doi, pub.published_on, pub.notes, pub.conference_name, pub.conference_location, \
           pub.conference_date, pub.proceedings_link, pub.journal_name, pub.journal_publisher, \
           pub.volume, pub.issue, pub.journal_link, pub.created_at, pub.updated_at, \
           p.project_code, p.project_name \
    FROM publications pub \
    JOIN projects p ON p.id = pub.project_id";

/// Provides CRUD operations for published papers.
///
/// Writes take a [`PublicationInput`] that has already been passed through
/// [`PublicationInput::retain_venue_fields`], so every write stores the full
/// row and the other venue's columns end up NULL.
pub struct PublicationRepo;

impl PublicationRepo {
    /// Insert a publication with a generated `PUB<year><seq>` code.
    pub async fn create(
        pool: &PgPool,
        input: &PublicationInput,
    ) -> Result<Publication, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let code = code_seq::next_code(
            &mut tx,
            "publications",
            "publication_code",
            PUBLICATION_PREFIX,
        )
        .await?;

        let query = format!(
            "INSERT INTO publications
                (publication_code, project_id, paper_title, venue_type, doi, published_on, notes,
                 conference_name, conference_location, conference_date, proceedings_link,
                 journal_name, journal_publisher, volume, issue, journal_link)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
             RETURNING {COLUMNS}"
        );
        let publication = sqlx::query_as::<_, Publication>(&query)
            .bind(&code)
            .bind(input.project_id)
            .bind(&input.paper_title)
            .bind(&input.venue_type)
            .bind(&input.doi)
            .bind(input.published_on)
            .bind(&input.notes)
            .bind(&input.conference_name)
            .bind(&input.conference_location)
            .bind(input.conference_date)
            .bind(&input.proceedings_link)
            .bind(&input.journal_name)
            .bind(&input.journal_publisher)
            .bind(&input.volume)
            .bind(&input.issue)
            .bind(&input.journal_link)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(publication)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Publication>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM publications WHERE id = $1");
        sqlx::query_as::<_, Publication>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PublicationSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} WHERE pub.id = $1");
        sqlx::query_as::<_, PublicationSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List publications, most recently published first.
    pub async fn list(
        pool: &PgPool,
        params: &PublicationListParams,
        venue: Option<VenueType>,
    ) -> Result<Vec<PublicationSummary>, sqlx::Error> {
        let search = normalize_search(params.search.as_deref());

        let mut filter = FilterBuilder::new();
        filter
            .eq("pub.venue_type", venue.map(VenueType::as_str))
            .eq("pub.project_id", params.project_id)
            .with_value(
                "EXTRACT(YEAR FROM pub.published_on)::INTEGER = {}",
                params.year,
            )
            .search(
                &[
                    "pub.paper_title",
                    "pub.publication_code",
                    "pub.doi",
                    "pub.conference_name",
                    "pub.journal_name",
                ],
                search.as_deref(),
            );

        let query = format!(
            "{SUMMARY_SELECT} {} ORDER BY pub.published_on DESC NULLS LAST, pub.id DESC",
            filter.where_clause()
        );
        filter
            .bind_to(sqlx::query_as::<_, PublicationSummary>(&query))
            .fetch_all(pool)
            .await
    }

    /// Overwrite every writable column.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &PublicationInput,
    ) -> Result<Option<Publication>, sqlx::Error> {
        let query = format!(
            "UPDATE publications SET
                project_id = $2,
                paper_title = $3,
                venue_type = $4,
                doi = $5,
                published_on = $6,
                notes = $7,
                conference_name = $8,
                conference_location = $9,
                conference_date = $10,
                proceedings_link = $11,
                journal_name = $12,
                journal_publisher = $13,
                volume = $14,
                issue = $15,
                journal_link = $16
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Publication>(&query)
            .bind(id)
            .bind(input.project_id)
            .bind(&input.paper_title)
            .bind(&input.venue_type)
            .bind(&input.doi)
            .bind(input.published_on)
            .bind(&input.notes)
            .bind(&input.conference_name)
            .bind(&input.conference_location)
            .bind(input.conference_date)
            .bind(&input.proceedings_link)
            .bind(&input.journal_name)
            .bind(&input.journal_publisher)
            .bind(&input.volume)
            .bind(&input.issue)
            .bind(&input.journal_link)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM publications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
