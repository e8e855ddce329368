use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::db::users;
use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserFilter {
    /// Role name, e.g. `Reviewer` when picking assignees.
    pub role: Option<String>,
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<UserFilter>,
) -> AppResult<Json<serde_json::Value>> {
    let users = users::list(state.pool.as_ref(), filter.role.as_deref()).await?;
    Ok(Json(json!({
        "users": users,
        "filters": { "role": filter.role },
    })))
}
