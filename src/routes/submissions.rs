use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::Actor;
use crate::db::submissions::{self, NewSubmission};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::storage;
use crate::workflow::decision::display_status;

/// Author-facing submission list with the derived display status.
pub async fn index(
    actor: Actor,
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<serde_json::Value>> {
    let rows = submissions::list_for_author(state.pool.as_ref(), actor.id).await?;

    let submissions: Vec<serde_json::Value> = rows
        .into_iter()
        .map(|row| {
            let status = display_status(row.decision.as_deref(), Some(row.paper_status.as_str()));
            json!({
                "id": row.id,
                "paper_id": row.paper_id,
                "title": row.title,
                "topic": row.topic,
                "track": row.track,
                "submitted_at": row.submitted_at,
                "status": status,
            })
        })
        .collect();

    Ok(Json(json!({
        "submissions": submissions,
        "can": actor.capabilities(),
    })))
}

/// Raw multipart fields collected from the submission wizard.
#[derive(Debug, Default)]
struct SubmissionForm {
    fields: HashMap<String, String>,
    file_data: Option<Vec<u8>>,
    filename: String,
}

impl SubmissionForm {
    fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|s| s.trim()).filter(|s| !s.is_empty())
    }

    fn flag(&self, name: &str) -> bool {
        matches!(self.text(name), Some("true") | Some("1") | Some("on"))
    }

    fn validate(&self) -> Vec<(String, String)> {
        let mut errors = Vec::new();
        for required in ["title", "abstract", "topic", "author_name", "author_email"] {
            if self.text(required).is_none() {
                errors.push((required.to_string(), format!("{} is required", required)));
            }
        }
        if let Some(id) = self.fields.get("conference_id") {
            if id.parse::<i64>().is_err() {
                errors.push((
                    "conference_id".to_string(),
                    "conference_id must be an integer".to_string(),
                ));
            }
        }
        errors
    }
}

async fn read_multipart(mut multipart: Multipart) -> SubmissionForm {
    let mut form = SubmissionForm::default();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();
        if name == "paper" {
            form.filename = field.file_name().unwrap_or("paper.pdf").to_string();
            if let Ok(data) = field.bytes().await {
                form.file_data = Some(data.to_vec());
            }
        } else if let Ok(text) = field.text().await {
            form.fields.insert(name, text);
        }
    }
    form
}

/// Accept a paper submission: store the uploaded file, then create the
/// author snapshot, the paper (status `pending`) and the submission row in
/// one transaction.
pub async fn store(
    actor: Actor,
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let form = read_multipart(multipart).await;

    let errors = form.validate();
    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    let file_url = match form.file_data {
        Some(ref data) if !data.is_empty() => {
            let stored = storage::store_file(&state.config.upload_folder, &form.filename, data)
                .map_err(|e| AppError::Internal(format!("failed to store upload: {}", e)))?;
            Some(stored)
        }
        _ => None,
    };

    let conference_id = form
        .fields
        .get("conference_id")
        .and_then(|v| v.parse::<i64>().ok());

    let input = NewSubmission {
        user_id: actor.id,
        title: form.text("title").unwrap_or_default(),
        abstract_text: form.text("abstract").unwrap_or_default(),
        topic: form.text("topic").unwrap_or_default(),
        keyword: form.text("keyword"),
        file_url: file_url.as_deref(),
        author_name: form.text("author_name").unwrap_or_default(),
        author_email: form.text("author_email").unwrap_or_default(),
        institute: form.text("institute"),
        co_authors: form.text("co_authors"),
        conference_id,
        track: form.text("track"),
        submitted_elsewhere: form.flag("submitted_elsewhere"),
        original_submission: !form.flag("not_original"),
    };

    let (paper, submission) = submissions::create(state.pool.as_ref(), &input).await?;
    tracing::info!("Paper {} submitted by user {}", paper.id, actor.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "paper": paper, "submission": submission })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with(pairs: &[(&str, &str)]) -> SubmissionForm {
        let mut form = SubmissionForm::default();
        for (k, v) in pairs {
            form.fields.insert(k.to_string(), v.to_string());
        }
        form
    }

    #[test]
    fn complete_form_passes() {
        let form = form_with(&[
            ("title", "Paxos Made Hard"),
            ("abstract", "We make it hard."),
            ("topic", "Consensus"),
            ("author_name", "A. Author"),
            ("author_email", "a@example.org"),
        ]);
        assert!(form.validate().is_empty());
    }

    #[test]
    fn missing_required_fields_are_all_reported() {
        let form = form_with(&[("title", "Only a title")]);
        let errors = form.validate();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn whitespace_only_values_count_as_missing() {
        let form = form_with(&[
            ("title", "   "),
            ("abstract", "x"),
            ("topic", "x"),
            ("author_name", "x"),
            ("author_email", "x"),
        ]);
        assert!(form.validate().iter().any(|(f, _)| f == "title"));
    }

    #[test]
    fn non_numeric_conference_id_is_rejected() {
        let mut form = form_with(&[
            ("title", "x"),
            ("abstract", "x"),
            ("topic", "x"),
            ("author_name", "x"),
            ("author_email", "x"),
        ]);
        form.fields.insert("conference_id".to_string(), "first".to_string());
        assert!(form.validate().iter().any(|(f, _)| f == "conference_id"));
    }

    #[test]
    fn originality_flags_default_permissively() {
        let form = form_with(&[]);
        assert!(!form.flag("submitted_elsewhere"));
        assert!(!form.flag("not_original"));
    }
}
