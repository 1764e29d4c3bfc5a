//! Dashboard summary: headline counts, status breakdowns, and deadlines.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use mentorhub_core::deadline::{self, deadline_info, PROJECT_DUE_SOON_DAYS, VENUE_DUE_SOON_DAYS};
use mentorhub_db::models::dashboard::{Dashboard, DeadlineRow, UpcomingDeadline};
use mentorhub_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Venue deadlines use the wider "due soon" window.
fn due_soon_days(kind: &str) -> i64 {
    match kind {
        "conference" | "journal" => VENUE_DUE_SOON_DAYS,
        _ => PROJECT_DUE_SOON_DAYS,
    }
}

fn with_badge(row: DeadlineRow, today: chrono::NaiveDate) -> Option<UpcomingDeadline> {
    let info = deadline_info(Some(row.due_date), today, due_soon_days(&row.kind))?;
    Some(UpcomingDeadline {
        row,
        deadline: info,
    })
}

/// GET /api/v1/dashboard
pub async fn get_dashboard(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let today = deadline::today();

    let counts = DashboardRepo::counts(&state.pool).await?;
    let projects_by_status = DashboardRepo::projects_by_status(&state.pool).await?;
    let papers_by_status = DashboardRepo::papers_by_status(&state.pool).await?;
    let applications_by_status = DashboardRepo::applications_by_status(&state.pool).await?;
    let deadlines = DashboardRepo::deadlines(&state.pool, today)
        .await?
        .into_iter()
        .filter_map(|row| with_badge(row, today))
        .collect();

    Ok(Json(DataResponse {
        data: Dashboard {
            counts,
            projects_by_status,
            papers_by_status,
            applications_by_status,
            deadlines,
        },
    }))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use mentorhub_core::deadline::DeadlineBadge;

    use super::*;

    fn row(kind: &str, due: NaiveDate) -> DeadlineRow {
        DeadlineRow {
            kind: kind.to_string(),
            id: 1,
            label: "x".into(),
            due_date: due,
        }
    }

    #[test]
    fn venue_rows_use_thirty_day_window() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let due = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();

        let venue = with_badge(row("conference", due), today).unwrap();
        assert_eq!(venue.deadline.badge, DeadlineBadge::DueSoon);

        let project = with_badge(row("project", due), today).unwrap();
        assert_eq!(project.deadline.badge, DeadlineBadge::OnTrack);
        assert_eq!(project.deadline.days_remaining, 19);
    }
}
