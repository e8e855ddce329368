use chrono::NaiveDate;
use sqlx::PgPool;

use crate::db::models::Conference;

pub struct ConferenceFields<'a> {
    pub name: &'a str,
    pub topic: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: &'a str,
}

pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Conference>, sqlx::Error> {
    sqlx::query_as::<_, Conference>(
        "SELECT * FROM conferences ORDER BY start_date DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM conferences")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn get(pool: &PgPool, id: i64) -> Result<Option<Conference>, sqlx::Error> {
    sqlx::query_as::<_, Conference>("SELECT * FROM conferences WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &PgPool, fields: &ConferenceFields<'_>) -> Result<Conference, sqlx::Error> {
    sqlx::query_as::<_, Conference>(
        r#"
        INSERT INTO conferences (name, topic, start_date, end_date, location)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(fields.name)
    .bind(fields.topic)
    .bind(fields.start_date)
    .bind(fields.end_date)
    .bind(fields.location)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    fields: &ConferenceFields<'_>,
) -> Result<Option<Conference>, sqlx::Error> {
    sqlx::query_as::<_, Conference>(
        r#"
        UPDATE conferences
        SET name = $2, topic = $3, start_date = $4, end_date = $5, location = $6
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(fields.name)
    .bind(fields.topic)
    .bind(fields.start_date)
    .bind(fields.end_date)
    .bind(fields.location)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM conferences WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
