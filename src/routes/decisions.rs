use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::auth::Actor;
use crate::db::decisions;
use crate::db::models::Verdict;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::workflow::decision::DecisionInput;

#[derive(Debug, Deserialize)]
pub struct DecisionForm {
    pub decision: String,
    pub comment: Option<String>,
}

impl DecisionForm {
    fn into_input(self) -> Result<DecisionInput, AppError> {
        let verdict = Verdict::parse(&self.decision).ok_or_else(|| {
            AppError::validation(vec![(
                "decision".to_string(),
                "decision must be Accept, Reject or Revise".to_string(),
            )])
        })?;
        Ok(DecisionInput {
            verdict,
            comment: self.comment,
        })
    }
}

/// POST /papers/:id/decision — upsert the editorial decision and mirror the
/// paper status in the same transaction. Later decisions overwrite earlier
/// ones; no history is kept.
pub async fn accept(
    actor: Actor,
    State(state): State<Arc<AppState>>,
    Path(paper_id): Path<i64>,
    Json(form): Json<DecisionForm>,
) -> AppResult<Json<serde_json::Value>> {
    let input = form.into_input()?;
    record(actor, state, paper_id, input).await
}

#[derive(Debug, Deserialize, Default)]
pub struct RejectForm {
    pub comment: Option<String>,
}

/// POST /papers/:id/reject — sugar for the decision route with the verdict
/// forced to Reject, so both share one code path and identical side effects.
pub async fn reject(
    actor: Actor,
    State(state): State<Arc<AppState>>,
    Path(paper_id): Path<i64>,
    Json(form): Json<RejectForm>,
) -> AppResult<Json<serde_json::Value>> {
    let input = DecisionInput {
        verdict: Verdict::Accept,
        comment: form.comment,
    }
    .forced_reject();
    record(actor, state, paper_id, input).await
}

async fn record(
    actor: Actor,
    state: Arc<AppState>,
    paper_id: i64,
    input: DecisionInput,
) -> AppResult<Json<serde_json::Value>> {
    let decision = decisions::record(state.pool.as_ref(), paper_id, actor.id, &input).await?;
    tracing::info!(
        "Decision '{}' recorded for paper {} by user {}",
        decision.decision,
        paper_id,
        actor.id
    );
    Ok(Json(json!({ "decision": decision })))
}
