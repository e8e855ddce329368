use sqlx::PgPool;

use crate::db::models::Decision;
use crate::error::{AppError, AppResult};
use crate::workflow::decision::{paper_status_for, DecisionInput};

/// Record the organizer's decision for a paper.
///
/// Upsert keyed on paper_id: the latest decision overwrites the previous
/// one, so no history is kept. The paper's status mirror is re-derived
/// from the decision inside the same transaction; a verdict with no
/// projection leaves it unchanged.
pub async fn record(
    pool: &PgPool,
    paper_id: i64,
    organizer_id: i64,
    input: &DecisionInput,
) -> AppResult<Decision> {
    let mut tx = pool.begin().await?;

    let paper_exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM papers WHERE id = $1")
        .bind(paper_id)
        .fetch_optional(&mut *tx)
        .await?;
    if paper_exists.is_none() {
        return Err(AppError::NotFound {
            entity: "Paper",
            id: paper_id,
        });
    }

    let decision = sqlx::query_as::<_, Decision>(
        r#"
        INSERT INTO decisions (paper_id, organizer_id, decision, comment)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (paper_id) DO UPDATE
        SET organizer_id = EXCLUDED.organizer_id,
            decision = EXCLUDED.decision,
            comment = EXCLUDED.comment,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(paper_id)
    .bind(organizer_id)
    .bind(input.verdict.as_str())
    .bind(input.comment.as_deref())
    .fetch_one(&mut *tx)
    .await?;

    if let Some(status) = paper_status_for(&decision.decision) {
        sqlx::query("UPDATE papers SET status = $2 WHERE id = $1")
            .bind(paper_id)
            .bind(status.as_str())
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(decision)
}

pub async fn get_for_paper(pool: &PgPool, paper_id: i64) -> Result<Option<Decision>, sqlx::Error> {
    sqlx::query_as::<_, Decision>("SELECT * FROM decisions WHERE paper_id = $1")
        .bind(paper_id)
        .fetch_optional(pool)
        .await
}
