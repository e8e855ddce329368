use std::collections::HashMap;

use sqlx::PgPool;

pub async fn count_conferences(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM conferences")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn count_papers(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM papers")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn count_users(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Number of users holding the named role. A missing role simply matches
/// nothing and counts as zero.
pub async fn count_role_holders(pool: &PgPool, role: &str) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM users u JOIN roles r ON r.id = u.role_id WHERE r.name = $1",
    )
    .bind(role)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn papers_by_topic(pool: &PgPool) -> Result<Vec<(String, i64)>, sqlx::Error> {
    sqlx::query_as(
        "SELECT topic, COUNT(*) FROM papers GROUP BY topic ORDER BY COUNT(*) DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn papers_by_status(pool: &PgPool) -> Result<HashMap<String, i64>, sqlx::Error> {
    let rows: Vec<(String, i64)> =
        sqlx::query_as("SELECT status, COUNT(*) FROM papers GROUP BY status")
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().collect())
}

/// Papers created per calendar month, keyed "YYYY-MM", over the last
/// `months` months.
pub async fn papers_per_month(
    pool: &PgPool,
    months: i32,
) -> Result<HashMap<String, i64>, sqlx::Error> {
    monthly_counts(pool, "papers", months).await
}

/// User registrations per calendar month, keyed "YYYY-MM".
pub async fn users_per_month(
    pool: &PgPool,
    months: i32,
) -> Result<HashMap<String, i64>, sqlx::Error> {
    monthly_counts(pool, "users", months).await
}

async fn monthly_counts(
    pool: &PgPool,
    table: &str,
    months: i32,
) -> Result<HashMap<String, i64>, sqlx::Error> {
    // `table` is one of two internal constants, never caller input.
    let query = format!(
        "SELECT to_char(created_at, 'YYYY-MM') AS month, COUNT(*)
         FROM {table}
         WHERE created_at >= now() - ($1 || ' months')::interval
         GROUP BY month"
    );
    let rows: Vec<(String, i64)> = sqlx::query_as(&query)
        .bind(months.to_string())
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().collect())
}
