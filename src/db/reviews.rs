use sqlx::PgPool;

use crate::db::models::Review;

/// Insert a review row. Deliberately permissive: no check that the
/// reviewer holds an active assignment, and resubmission appends a new row
/// rather than updating the prior one.
pub async fn create(
    pool: &PgPool,
    paper_id: i64,
    reviewer_id: i64,
    recommendation: &str,
    feedback: Option<&str>,
    score: i32,
) -> Result<Review, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        r#"
        INSERT INTO reviews (paper_id, reviewer_id, recommendation, feedback, score)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(paper_id)
    .bind(reviewer_id)
    .bind(recommendation)
    .bind(feedback)
    .bind(score)
    .fetch_one(pool)
    .await
}

pub async fn list_for_paper(pool: &PgPool, paper_id: i64) -> Result<Vec<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews WHERE paper_id = $1 ORDER BY created_at",
    )
    .bind(paper_id)
    .fetch_all(pool)
    .await
}

/// Review count and average score for a paper, for the decision page.
pub async fn aggregates(pool: &PgPool, paper_id: i64) -> Result<(i64, Option<f64>), sqlx::Error> {
    sqlx::query_as(
        "SELECT COUNT(*), AVG(score)::FLOAT8 FROM reviews WHERE paper_id = $1",
    )
    .bind(paper_id)
    .fetch_one(pool)
    .await
}
