//! Project date arithmetic and deadline urgency badges.
//!
//! Badges are a display computation: they are derived from the target date
//! and "today" on every read and never written back to the database.

use chrono::{Months, NaiveDate};
use serde::Serialize;

/// Length of a standard mentorship project.
pub const PROJECT_DURATION_MONTHS: u32 = 4;

/// Days before a project end date or paper target date that count as "due soon".
pub const PROJECT_DUE_SOON_DAYS: i64 = 7;

/// Days before a conference or journal submission deadline that count as "due soon".
pub const VENUE_DUE_SOON_DAYS: i64 = 30;

/// Compute a project's end date from its start date.
///
/// Adds [`PROJECT_DURATION_MONTHS`] calendar months. When the start day does
/// not exist in the target month the result clamps to that month's last day
/// (Oct 31 -> Feb 28/29).
pub fn project_end_date(start_date: Option<NaiveDate>) -> Option<NaiveDate> {
    start_date.and_then(|d| d.checked_add_months(Months::new(PROJECT_DURATION_MONTHS)))
}

/// Urgency of a dated item relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineBadge {
    Overdue,
    DueSoon,
    OnTrack,
}

/// Badge plus the signed number of days left, as returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeadlineInfo {
    pub days_remaining: i64,
    pub badge: DeadlineBadge,
}

/// Signed whole days from `today` to `target` (negative once passed).
pub fn days_remaining(target: NaiveDate, today: NaiveDate) -> i64 {
    target.signed_duration_since(today).num_days()
}

/// Classify `target` against `today` using a "due soon" window in days.
///
/// - `days < 0` is overdue
/// - `0 <= days <= due_soon_days` is due soon
/// - anything later is on track
pub fn classify(target: NaiveDate, today: NaiveDate, due_soon_days: i64) -> DeadlineBadge {
    let days = days_remaining(target, today);
    if days < 0 {
        DeadlineBadge::Overdue
    } else if days <= due_soon_days {
        DeadlineBadge::DueSoon
    } else {
        DeadlineBadge::OnTrack
    }
}

/// Deadline info for an optional date. Missing dates carry no badge.
pub fn deadline_info(
    target: Option<NaiveDate>,
    today: NaiveDate,
    due_soon_days: i64,
) -> Option<DeadlineInfo> {
    target.map(|t| DeadlineInfo {
        days_remaining: days_remaining(t, today),
        badge: classify(t, today, due_soon_days),
    })
}

/// Today's date in UTC.
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn end_date_is_four_months_after_start() {
        assert_eq!(project_end_date(Some(d(2026, 1, 15))), Some(d(2026, 5, 15)));
        assert_eq!(project_end_date(Some(d(2026, 9, 1))), Some(d(2027, 1, 1)));
    }

    #[test]
    fn end_date_clamps_to_month_end() {
        assert_eq!(project_end_date(Some(d(2025, 10, 31))), Some(d(2026, 2, 28)));
        assert_eq!(project_end_date(Some(d(2027, 10, 31))), Some(d(2028, 2, 29)));
    }

    #[test]
    fn end_date_absent_without_start() {
        assert_eq!(project_end_date(None), None);
    }

    #[test]
    fn classify_boundaries_for_project_window() {
        let today = d(2026, 3, 10);
        assert_eq!(classify(d(2026, 3, 9), today, PROJECT_DUE_SOON_DAYS), DeadlineBadge::Overdue);
        assert_eq!(classify(today, today, PROJECT_DUE_SOON_DAYS), DeadlineBadge::DueSoon);
        assert_eq!(classify(d(2026, 3, 17), today, PROJECT_DUE_SOON_DAYS), DeadlineBadge::DueSoon);
        assert_eq!(classify(d(2026, 3, 18), today, PROJECT_DUE_SOON_DAYS), DeadlineBadge::OnTrack);
    }

    #[test]
    fn venue_window_is_wider() {
        let today = d(2026, 3, 10);
        let target = d(2026, 4, 1);
        assert_eq!(classify(target, today, PROJECT_DUE_SOON_DAYS), DeadlineBadge::OnTrack);
        assert_eq!(classify(target, today, VENUE_DUE_SOON_DAYS), DeadlineBadge::DueSoon);
    }

    #[test]
    fn deadline_info_reports_signed_days() {
        let today = d(2026, 3, 10);
        let info = deadline_info(Some(d(2026, 3, 5)), today, PROJECT_DUE_SOON_DAYS).unwrap();
        assert_eq!(info.days_remaining, -5);
        assert_eq!(info.badge, DeadlineBadge::Overdue);
        assert_eq!(deadline_info(None, today, PROJECT_DUE_SOON_DAYS), None);
    }

    #[test]
    fn badge_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&DeadlineBadge::DueSoon).unwrap(), "\"due_soon\"");
    }
}
