use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use crate::auth::Actor;
use crate::db::dashboard;
use crate::error::AppResult;
use crate::state::AppState;
use crate::workflow::dashboard::{fill_month_series, last_n_months, status_chart};

const SERIES_MONTHS: u32 = 6;
const ROLE_NAMES: [&str; 4] = ["Admin", "Reviewer", "Author", "Attendees"];

/// GET /dashboard — read-only aggregation payload for the admin charts.
///
/// Each role count is guarded independently: a failed lookup logs and
/// renders as 0 rather than failing the whole page.
pub async fn show(
    actor: Actor,
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<serde_json::Value>> {
    let pool = state.pool.as_ref();

    let conferences = dashboard::count_conferences(pool).await?;
    let papers = dashboard::count_papers(pool).await?;
    let users = dashboard::count_users(pool).await?;

    let mut role_counts = serde_json::Map::new();
    for role in ROLE_NAMES {
        let count = match dashboard::count_role_holders(pool, role).await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!("Role count for '{}' failed, defaulting to 0: {}", role, e);
                0
            }
        };
        role_counts.insert(role.to_string(), json!(count));
    }

    let topics = dashboard::papers_by_topic(pool).await?;
    let statuses = dashboard::papers_by_status(pool).await?;
    let papers_by_status = status_chart(&statuses, &topics);

    let months = last_n_months(Utc::now().date_naive(), SERIES_MONTHS);
    let paper_counts = dashboard::papers_per_month(pool, SERIES_MONTHS as i32).await?;
    let user_counts = dashboard::users_per_month(pool, SERIES_MONTHS as i32).await?;

    let papers_by_topic: Vec<serde_json::Value> = topics
        .iter()
        .map(|(topic, count)| json!({ "label": topic, "count": count }))
        .collect();

    Ok(Json(json!({
        "totals": {
            "conferences": conferences,
            "papers": papers,
            "users": users,
        },
        "role_counts": role_counts,
        "papers_by_topic": papers_by_topic,
        "papers_by_status": papers_by_status,
        "submissions_per_month": fill_month_series(&months, &paper_counts),
        "registrations_per_month": fill_month_series(&months, &user_counts),
        "can": actor.capabilities(),
    })))
}
