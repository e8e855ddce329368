use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::auth::Actor;
use crate::db::models::AssignmentStatus;
use crate::db::{assignments, papers, users};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::workflow::assignment::AssignmentBatch;

#[derive(Debug, Deserialize)]
pub struct AssignForm {
    pub reviewer_ids: Vec<i64>,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
}

/// POST /papers/:id/assignments — bulk-assign reviewers, superseding every
/// prior assignment for the paper.
pub async fn store(
    actor: Actor,
    State(state): State<Arc<AppState>>,
    Path(paper_id): Path<i64>,
    Json(form): Json<AssignForm>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let batch = AssignmentBatch {
        reviewer_ids: form.reviewer_ids,
        due_date: form.due_date,
        notes: form.notes,
    };

    let errors = batch.validate(Utc::now().date_naive());
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    if papers::get(state.pool.as_ref(), paper_id).await?.is_none() {
        return Err(AppError::NotFound { entity: "Paper", id: paper_id });
    }
    if !users::all_exist(state.pool.as_ref(), &batch.reviewer_ids).await? {
        return Err(AppError::validation(vec![(
            "reviewers".to_string(),
            "one or more reviewers do not exist".to_string(),
        )]));
    }

    let created = assignments::assign_reviewers(state.pool.as_ref(), paper_id, actor.id, &batch).await?;
    tracing::info!(
        "Assigned {} reviewer(s) to paper {} by user {}",
        created.len(),
        paper_id,
        actor.id
    );

    Ok((StatusCode::CREATED, Json(json!({ "assignments": created }))))
}

#[derive(Debug, Deserialize)]
pub struct AssignmentFilter {
    pub paper_id: Option<i64>,
}

pub async fn index(
    actor: Actor,
    State(state): State<Arc<AppState>>,
    Query(filter): Query<AssignmentFilter>,
) -> AppResult<Json<serde_json::Value>> {
    let assignments = assignments::list(state.pool.as_ref(), filter.paper_id).await?;
    Ok(Json(json!({
        "assignments": assignments,
        "filters": { "paper_id": filter.paper_id },
        "can": actor.capabilities(),
    })))
}

pub async fn show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    let assignment = assignments::get_view(state.pool.as_ref(), id)
        .await?
        .ok_or(AppError::NotFound { entity: "Assignment", id })?;
    Ok(Json(json!({ "assignment": assignment })))
}

#[derive(Debug, Deserialize)]
pub struct AssignmentUpdateForm {
    pub paper_id: i64,
    pub reviewer_id: i64,
    pub due_date: NaiveDate,
    pub status: String,
    pub notes: Option<String>,
}

/// PUT /assignments/:id — overwrite a single row. Any status may move to
/// any other; no transition graph.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(form): Json<AssignmentUpdateForm>,
) -> AppResult<Json<serde_json::Value>> {
    if AssignmentStatus::parse(&form.status).is_none() {
        return Err(AppError::validation(vec![(
            "status".to_string(),
            format!("unknown status '{}'", form.status),
        )]));
    }

    let fields = assignments::AssignmentUpdate {
        paper_id: form.paper_id,
        reviewer_id: form.reviewer_id,
        due_date: form.due_date,
        status: &form.status,
        notes: form.notes.as_deref(),
    };
    let assignment = assignments::update(state.pool.as_ref(), id, &fields)
        .await?
        .ok_or(AppError::NotFound { entity: "Assignment", id })?;
    Ok(Json(json!({ "assignment": assignment })))
}

pub async fn destroy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if assignments::delete(state.pool.as_ref(), id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound { entity: "Assignment", id })
    }
}
