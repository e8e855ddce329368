use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::auth::Actor;
use crate::db::conferences::{self, ConferenceFields};
use crate::error::{AppError, AppResult};
use crate::routes::Pagination;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConferenceForm {
    pub name: String,
    pub topic: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: String,
}

impl ConferenceForm {
    fn validate(&self) -> Vec<(String, String)> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(("name".to_string(), "name is required".to_string()));
        }
        if self.topic.trim().is_empty() {
            errors.push(("topic".to_string(), "topic is required".to_string()));
        }
        if self.location.trim().is_empty() {
            errors.push(("location".to_string(), "location is required".to_string()));
        }
        if self.end_date < self.start_date {
            errors.push((
                "end_date".to_string(),
                "end date must not be before start date".to_string(),
            ));
        }
        errors
    }

    fn fields(&self) -> ConferenceFields<'_> {
        ConferenceFields {
            name: self.name.trim(),
            topic: self.topic.trim(),
            start_date: self.start_date,
            end_date: self.end_date,
            location: self.location.trim(),
        }
    }
}

pub async fn index(
    actor: Actor,
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<serde_json::Value>> {
    let (limit, offset) = pagination.limit_offset();
    let conferences = conferences::list(state.pool.as_ref(), limit, offset).await?;
    let total = conferences::count(state.pool.as_ref()).await?;

    Ok(Json(json!({
        "conferences": conferences,
        "page": pagination.page(),
        "per_page": pagination.per_page(),
        "total": total,
        "can": actor.capabilities(),
    })))
}

pub async fn show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    let conference = conferences::get(state.pool.as_ref(), id)
        .await?
        .ok_or(AppError::NotFound { entity: "Conference", id })?;
    Ok(Json(json!({ "conference": conference })))
}

pub async fn store(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ConferenceForm>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    let conference = conferences::create(state.pool.as_ref(), &form.fields()).await?;
    tracing::info!("Created conference {} ({})", conference.id, conference.name);
    Ok((StatusCode::CREATED, Json(json!({ "conference": conference }))))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(form): Json<ConferenceForm>,
) -> AppResult<Json<serde_json::Value>> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    let conference = conferences::update(state.pool.as_ref(), id, &form.fields())
        .await?
        .ok_or(AppError::NotFound { entity: "Conference", id })?;
    Ok(Json(json!({ "conference": conference })))
}

pub async fn destroy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if conferences::delete(state.pool.as_ref(), id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound { entity: "Conference", id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ConferenceForm {
        ConferenceForm {
            name: "RustConf".to_string(),
            topic: "Systems".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 9, 3).unwrap(),
            location: "Portland".to_string(),
        }
    }

    #[test]
    fn well_formed_conference_passes() {
        assert!(form().validate().is_empty());
    }

    #[test]
    fn end_date_before_start_date_is_rejected() {
        let mut f = form();
        f.end_date = NaiveDate::from_ymd_opt(2025, 8, 31).unwrap();
        assert!(f.validate().iter().any(|(field, _)| field == "end_date"));
    }

    #[test]
    fn single_day_conference_is_allowed() {
        let mut f = form();
        f.end_date = f.start_date;
        assert!(f.validate().is_empty());
    }

    #[test]
    fn blank_fields_are_each_reported() {
        let mut f = form();
        f.name = "  ".to_string();
        f.location = String::new();
        let errors = f.validate();
        assert_eq!(errors.len(), 2);
    }
}
