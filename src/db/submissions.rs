use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::db::models::{AuthorInfo, Paper, Submission};

/// Everything captured at submission time: the paper metadata plus the
/// author snapshot (co-authors may not be system users, so this is copied,
/// not referenced).
pub struct NewSubmission<'a> {
    pub user_id: i64,
    pub title: &'a str,
    pub abstract_text: &'a str,
    pub topic: &'a str,
    pub keyword: Option<&'a str>,
    pub file_url: Option<&'a str>,
    pub author_name: &'a str,
    pub author_email: &'a str,
    pub institute: Option<&'a str>,
    pub co_authors: Option<&'a str>,
    pub conference_id: Option<i64>,
    pub track: Option<&'a str>,
    pub submitted_elsewhere: bool,
    pub original_submission: bool,
}

/// Create AuthorInfo + Paper (status `pending`) + Submission in one
/// transaction; a failure partway through leaves nothing behind.
pub async fn create(
    pool: &PgPool,
    input: &NewSubmission<'_>,
) -> Result<(Paper, Submission), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let author_info = sqlx::query_as::<_, AuthorInfo>(
        r#"
        INSERT INTO author_infos (name, email, institute, co_authors)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(input.author_name)
    .bind(input.author_email)
    .bind(input.institute)
    .bind(input.co_authors)
    .fetch_one(&mut *tx)
    .await?;

    let paper = sqlx::query_as::<_, Paper>(
        r#"
        INSERT INTO papers (user_id, title, abstract, topic, keyword, file_url, status)
        VALUES ($1, $2, $3, $4, $5, $6, 'pending')
        RETURNING *
        "#,
    )
    .bind(input.user_id)
    .bind(input.title)
    .bind(input.abstract_text)
    .bind(input.topic)
    .bind(input.keyword)
    .bind(input.file_url)
    .fetch_one(&mut *tx)
    .await?;

    let submission = sqlx::query_as::<_, Submission>(
        r#"
        INSERT INTO submissions
            (paper_id, user_id, author_info_id, conference_id, track,
             submitted_elsewhere, original_submission)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(paper.id)
    .bind(input.user_id)
    .bind(author_info.id)
    .bind(input.conference_id)
    .bind(input.track)
    .bind(input.submitted_elsewhere)
    .bind(input.original_submission)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok((paper, submission))
}

/// One row of the author-facing submission list. `decision` is the latest
/// editorial verdict when one exists; display status is derived from it in
/// the route layer.
#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct SubmissionListRow {
    pub id: i64,
    pub paper_id: i64,
    pub title: String,
    pub topic: String,
    pub track: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub paper_status: String,
    pub decision: Option<String>,
}

pub async fn list_for_author(
    pool: &PgPool,
    user_id: i64,
) -> Result<Vec<SubmissionListRow>, sqlx::Error> {
    sqlx::query_as::<_, SubmissionListRow>(
        r#"
        SELECT s.id, s.paper_id, p.title, p.topic, s.track, s.submitted_at,
               p.status AS paper_status, d.decision
        FROM submissions s
        JOIN papers p ON p.id = s.paper_id
        LEFT JOIN decisions d ON d.paper_id = p.id
        WHERE s.user_id = $1
        ORDER BY s.submitted_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
