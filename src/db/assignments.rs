use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::db::models::PaperAssignment;
use crate::error::{AppError, AppResult};
use crate::workflow::assignment::{plan_assignment, AssignmentBatch};

/// Assign a batch of reviewers to a paper, superseding every prior
/// assignment for it.
///
/// Runs entirely inside one transaction so the cancel-then-insert sequence
/// is never observed half-applied and a failure leaves the prior set
/// intact. The conflict check is still racy across concurrent organizers
/// (two can both pass it and both write); that race is accepted, matching
/// the documented behavior.
pub async fn assign_reviewers(
    pool: &PgPool,
    paper_id: i64,
    organizer_id: i64,
    batch: &AssignmentBatch,
) -> AppResult<Vec<PaperAssignment>> {
    let mut tx = pool.begin().await?;

    let existing = sqlx::query_as::<_, PaperAssignment>(
        "SELECT * FROM paper_assignments WHERE paper_id = $1",
    )
    .bind(paper_id)
    .fetch_all(&mut *tx)
    .await?;

    let plan = plan_assignment(&existing, &batch.reviewer_ids).map_err(|conflict| {
        let ids: Vec<String> = conflict.reviewer_ids.iter().map(|id| id.to_string()).collect();
        AppError::conflict(
            "reviewers",
            &format!("reviewer already assigned: {}", ids.join(", ")),
        )
    })?;

    if !plan.cancel_ids.is_empty() {
        sqlx::query(
            "UPDATE paper_assignments SET status = 'cancelled'
             WHERE paper_id = $1 AND status <> 'cancelled'",
        )
        .bind(paper_id)
        .execute(&mut *tx)
        .await?;
    }

    let mut created = Vec::with_capacity(plan.insert_reviewer_ids.len());
    for reviewer_id in &plan.insert_reviewer_ids {
        let row = sqlx::query_as::<_, PaperAssignment>(
            r#"
            INSERT INTO paper_assignments
                (paper_id, reviewer_id, assigned_by, due_date, status, notes)
            VALUES ($1, $2, $3, $4, 'pending', $5)
            RETURNING *
            "#,
        )
        .bind(paper_id)
        .bind(*reviewer_id)
        .bind(organizer_id)
        .bind(batch.due_date)
        .bind(batch.notes.as_deref())
        .fetch_one(&mut *tx)
        .await?;
        created.push(row);
    }

    tx.commit().await?;
    Ok(created)
}

/// An assignment flattened with paper/reviewer/assigner display fields.
#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct AssignmentView {
    pub id: i64,
    pub paper_id: i64,
    pub paper_title: String,
    pub reviewer_id: i64,
    pub reviewer_name: String,
    pub assigned_by: i64,
    pub assigned_by_name: String,
    pub due_date: NaiveDate,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

const VIEW_QUERY: &str = r#"
    SELECT a.id, a.paper_id, p.title AS paper_title,
           a.reviewer_id, r.name AS reviewer_name,
           a.assigned_by, o.name AS assigned_by_name,
           a.due_date, a.status, a.notes, a.created_at
    FROM paper_assignments a
    JOIN papers p ON p.id = a.paper_id
    JOIN users r ON r.id = a.reviewer_id
    JOIN users o ON o.id = a.assigned_by
"#;

pub async fn list(pool: &PgPool, paper_id: Option<i64>) -> Result<Vec<AssignmentView>, sqlx::Error> {
    match paper_id {
        Some(paper_id) => {
            let query = format!("{VIEW_QUERY} WHERE a.paper_id = $1 ORDER BY a.created_at DESC");
            sqlx::query_as::<_, AssignmentView>(&query)
                .bind(paper_id)
                .fetch_all(pool)
                .await
        }
        None => {
            let query = format!("{VIEW_QUERY} ORDER BY a.created_at DESC");
            sqlx::query_as::<_, AssignmentView>(&query).fetch_all(pool).await
        }
    }
}

pub async fn get_view(pool: &PgPool, id: i64) -> Result<Option<AssignmentView>, sqlx::Error> {
    let query = format!("{VIEW_QUERY} WHERE a.id = $1");
    sqlx::query_as::<_, AssignmentView>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub struct AssignmentUpdate<'a> {
    pub paper_id: i64,
    pub reviewer_id: i64,
    pub due_date: NaiveDate,
    pub status: &'a str,
    pub notes: Option<&'a str>,
}

/// Overwrite a single assignment row. No transition graph is enforced.
pub async fn update(
    pool: &PgPool,
    id: i64,
    fields: &AssignmentUpdate<'_>,
) -> Result<Option<PaperAssignment>, sqlx::Error> {
    sqlx::query_as::<_, PaperAssignment>(
        r#"
        UPDATE paper_assignments
        SET paper_id = $2, reviewer_id = $3, due_date = $4, status = $5, notes = $6
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(fields.paper_id)
    .bind(fields.reviewer_id)
    .bind(fields.due_date)
    .bind(fields.status)
    .bind(fields.notes)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM paper_assignments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
