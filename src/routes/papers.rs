use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::auth::Actor;
use crate::db::models::PaperStatus;
use crate::db::papers::{self, PaperFilters, PaperUpdate};
use crate::db::{decisions, reviews};
use crate::error::{AppError, AppResult};
use crate::routes::Pagination;
use crate::state::AppState;
use crate::storage;

#[derive(Debug, Deserialize)]
pub struct PaperListQuery {
    pub status: Option<String>,
    pub topic: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PaperListQuery {
    fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

pub async fn index(
    actor: Actor,
    State(state): State<Arc<AppState>>,
    Query(query): Query<PaperListQuery>,
) -> AppResult<Json<serde_json::Value>> {
    if let Some(ref status) = query.status {
        if PaperStatus::parse(status).is_none() {
            return Err(AppError::validation(vec![(
                "status".to_string(),
                format!("unknown status '{}'", status),
            )]));
        }
    }

    let filters = PaperFilters {
        status: query.status.clone(),
        topic: query.topic.clone(),
        search: query.search.clone(),
    };
    let pagination = query.pagination();
    let (limit, offset) = pagination.limit_offset();
    let papers = papers::list(state.pool.as_ref(), &filters, limit, offset).await?;
    let total = papers::count(state.pool.as_ref(), &filters).await?;

    Ok(Json(json!({
        "papers": papers,
        "filters": {
            "status": query.status,
            "topic": query.topic,
            "search": query.search,
        },
        "page": pagination.page(),
        "per_page": pagination.per_page(),
        "total": total,
        "can": actor.capabilities(),
    })))
}

pub async fn show(
    actor: Actor,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    let paper = papers::get(state.pool.as_ref(), id)
        .await?
        .ok_or(AppError::NotFound { entity: "Paper", id })?;
    let reviews = reviews::list_for_paper(state.pool.as_ref(), id).await?;
    let (review_count, average_score) = reviews::aggregates(state.pool.as_ref(), id).await?;
    let decision = decisions::get_for_paper(state.pool.as_ref(), id).await?;

    Ok(Json(json!({
        "paper": paper,
        "reviews": reviews,
        "review_count": review_count,
        "average_score": average_score,
        "decision": decision,
        "can": actor.capabilities(),
    })))
}

#[derive(Debug, Deserialize)]
pub struct PaperForm {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub topic: String,
    pub keyword: Option<String>,
    pub status: String,
}

impl PaperForm {
    fn validate(&self) -> Vec<(String, String)> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(("title".to_string(), "title is required".to_string()));
        }
        if self.abstract_text.trim().is_empty() {
            errors.push(("abstract".to_string(), "abstract is required".to_string()));
        }
        if self.topic.trim().is_empty() {
            errors.push(("topic".to_string(), "topic is required".to_string()));
        }
        if PaperStatus::parse(&self.status).is_none() {
            errors.push(("status".to_string(), format!("unknown status '{}'", self.status)));
        }
        errors
    }
}

/// Administrative edit of a paper, including its status.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(form): Json<PaperForm>,
) -> AppResult<Json<serde_json::Value>> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    let fields = PaperUpdate {
        title: form.title.trim(),
        abstract_text: form.abstract_text.trim(),
        topic: form.topic.trim(),
        keyword: form.keyword.as_deref(),
        status: &form.status,
    };
    let paper = papers::update(state.pool.as_ref(), id, &fields)
        .await?
        .ok_or(AppError::NotFound { entity: "Paper", id })?;
    Ok(Json(json!({ "paper": paper })))
}

pub async fn destroy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    match papers::delete(state.pool.as_ref(), id).await? {
        Some(file_url) => {
            if let Some(stored_name) = file_url {
                storage::delete_file(&state.config.upload_folder, &stored_name);
            }
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(AppError::NotFound { entity: "Paper", id }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_is_rejected() {
        let form = PaperForm {
            title: "T".to_string(),
            abstract_text: "A".to_string(),
            topic: "S".to_string(),
            keyword: None,
            status: "archived".to_string(),
        };
        assert!(form.validate().iter().any(|(f, _)| f == "status"));
    }

    #[test]
    fn every_known_status_is_editable() {
        for status in ["pending", "under_review", "accepted", "rejected", "needs_revision"] {
            let form = PaperForm {
                title: "T".to_string(),
                abstract_text: "A".to_string(),
                topic: "S".to_string(),
                keyword: None,
                status: status.to_string(),
            };
            assert!(form.validate().is_empty(), "status {}", status);
        }
    }
}
