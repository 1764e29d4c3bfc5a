//! Allocation of human-readable `PREFIX<year><seq>` codes.

use chrono::Datelike;
use mentorhub_core::codes;
use sqlx::PgConnection;

/// Compute the next free code for `prefix` in the current year.
///
/// Reads the highest existing code under the same stem. `table` and
/// `column` are compile-time identifiers, never user input. Concurrent
/// inserts can race to the same code; the table's unique constraint turns
/// the loser into a conflict error.
pub(crate) async fn next_code(
    conn: &mut PgConnection,
    table: &'static str,
    column: &'static str,
    prefix: &str,
) -> Result<String, sqlx::Error> {
    let year = chrono::Utc::now().year();
    let stem = codes::code_stem(prefix, year);

    let query = format!(
        "SELECT {column} FROM {table} WHERE {column} LIKE $1 \
         ORDER BY LENGTH({column}) DESC, {column} DESC LIMIT 1"
    );
    let latest: Option<String> = sqlx::query_scalar(&query)
        .bind(format!("{stem}%"))
        .fetch_optional(&mut *conn)
        .await?;

    let code = codes::next_code(prefix, year, latest.as_deref());
    tracing::debug!(table, %code, "Allocated entity code");
    Ok(code)
}
