//! Human-readable entity codes such as `STU2026001`.
//!
//! A code is a fixed prefix, the four-digit creation year, and a sequence
//! number zero-padded to at least [`SEQUENCE_WIDTH`] digits. The sequence is
//! one past the highest existing sequence for the same prefix and year.

/// Prefix for student codes.
pub const STUDENT_PREFIX: &str = "STU";

/// Prefix for project codes.
pub const PROJECT_PREFIX: &str = "PRJ";

/// Prefix for publication codes.
pub const PUBLICATION_PREFIX: &str = "PUB";

/// Minimum digits in the sequence part.
pub const SEQUENCE_WIDTH: usize = 3;

/// The `prefix + year` stem shared by every code issued in `year`.
pub fn code_stem(prefix: &str, year: i32) -> String {
    format!("{prefix}{year:04}")
}

/// Format a full code.
pub fn format_code(prefix: &str, year: i32, sequence: u32) -> String {
    format!("{}{sequence:0width$}", code_stem(prefix, year), width = SEQUENCE_WIDTH)
}

/// Extract the sequence from a code issued under `stem`.
///
/// Returns `None` if the code does not start with the stem or the
/// remainder is not a number.
pub fn parse_sequence(code: &str, stem: &str) -> Option<u32> {
    code.strip_prefix(stem)
        .filter(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|rest| rest.parse().ok())
}

/// Compute the next code given every existing code under the same stem.
pub fn next_code<'a, I>(prefix: &str, year: i32, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let stem = code_stem(prefix, year);
    let max = existing
        .into_iter()
        .filter_map(|code| parse_sequence(code, &stem))
        .max()
        .unwrap_or(0);
    format_code(prefix, year, max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_code_of_the_year() {
        assert_eq!(next_code(STUDENT_PREFIX, 2026, std::iter::empty()), "STU2026001");
    }

    #[test]
    fn next_code_follows_highest_sequence() {
        let existing = ["STU2026001", "STU2026007", "STU2026003"];
        assert_eq!(next_code(STUDENT_PREFIX, 2026, existing), "STU2026008");
    }

    #[test]
    fn sequence_grows_past_padding_width() {
        assert_eq!(next_code(PROJECT_PREFIX, 2026, ["PRJ2026999"]), "PRJ20261000");
        assert_eq!(parse_sequence("PRJ20261000", "PRJ2026"), Some(1000));
    }

    #[test]
    fn other_years_and_garbage_are_ignored() {
        let existing = ["PUB2025042", "PUB2026abc", "PUB2026"];
        assert_eq!(next_code(PUBLICATION_PREFIX, 2026, existing), "PUB2026001");
    }
}
