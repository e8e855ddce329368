use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::auth::Actor;
use crate::db::models::Verdict;
use crate::db::{papers, reviews};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 10;

#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    pub recommendation: String,
    pub feedback: Option<String>,
    pub score: i32,
}

impl ReviewForm {
    fn validate(&self) -> Vec<(String, String)> {
        let mut errors = Vec::new();
        if Verdict::parse(&self.recommendation).is_none() {
            errors.push((
                "recommendation".to_string(),
                "recommendation must be Accept, Reject or Revise".to_string(),
            ));
        }
        if !(MIN_SCORE..=MAX_SCORE).contains(&self.score) {
            errors.push((
                "score".to_string(),
                format!("score must be between {} and {}", MIN_SCORE, MAX_SCORE),
            ));
        }
        errors
    }
}

/// POST /papers/:id/reviews — record the acting reviewer's feedback.
///
/// Permissive on purpose: no check that the actor holds an active
/// assignment for the paper, and a resubmission appends a new row.
pub async fn store(
    actor: Actor,
    State(state): State<Arc<AppState>>,
    Path(paper_id): Path<i64>,
    Json(form): Json<ReviewForm>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    if papers::get(state.pool.as_ref(), paper_id).await?.is_none() {
        return Err(AppError::NotFound { entity: "Paper", id: paper_id });
    }

    let review = reviews::create(
        state.pool.as_ref(),
        paper_id,
        actor.id,
        &form.recommendation,
        form.feedback.as_deref(),
        form.score,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(json!({ "review": review }))))
}

pub async fn index(
    actor: Actor,
    State(state): State<Arc<AppState>>,
    Path(paper_id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    if papers::get(state.pool.as_ref(), paper_id).await?.is_none() {
        return Err(AppError::NotFound { entity: "Paper", id: paper_id });
    }

    let reviews_list = reviews::list_for_paper(state.pool.as_ref(), paper_id).await?;
    let (count, average_score) = reviews::aggregates(state.pool.as_ref(), paper_id).await?;

    Ok(Json(json!({
        "reviews": reviews_list,
        "review_count": count,
        "average_score": average_score,
        "can": actor.capabilities(),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_bounds_are_inclusive() {
        for score in [MIN_SCORE, 5, MAX_SCORE] {
            let form = ReviewForm {
                recommendation: "Accept".to_string(),
                feedback: None,
                score,
            };
            assert!(form.validate().is_empty(), "score {}", score);
        }
    }

    #[test]
    fn out_of_range_scores_are_rejected() {
        for score in [0, 11, -3] {
            let form = ReviewForm {
                recommendation: "Reject".to_string(),
                feedback: None,
                score,
            };
            assert!(form.validate().iter().any(|(f, _)| f == "score"), "score {}", score);
        }
    }

    #[test]
    fn recommendation_must_be_a_known_verdict() {
        let form = ReviewForm {
            recommendation: "Strong Accept".to_string(),
            feedback: Some("great".to_string()),
            score: 9,
        };
        assert!(form.validate().iter().any(|(f, _)| f == "recommendation"));
    }
}
