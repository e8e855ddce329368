use sqlx::{PgPool, QueryBuilder};

use crate::db::models::Paper;

/// Equality/LIKE filters for the paper list page.
#[derive(Debug, Default, Clone)]
pub struct PaperFilters {
    pub status: Option<String>,
    pub topic: Option<String>,
    pub search: Option<String>,
}

fn push_filters<'a>(builder: &mut QueryBuilder<'a, sqlx::Postgres>, filters: &'a PaperFilters) {
    let mut prefix = " WHERE ";
    if let Some(ref status) = filters.status {
        builder.push(prefix).push("status = ").push_bind(status);
        prefix = " AND ";
    }
    if let Some(ref topic) = filters.topic {
        builder.push(prefix).push("topic = ").push_bind(topic);
        prefix = " AND ";
    }
    if let Some(ref search) = filters.search {
        builder
            .push(prefix)
            .push("title ILIKE ")
            .push_bind(format!("%{}%", search));
    }
}

pub async fn list(
    pool: &PgPool,
    filters: &PaperFilters,
    limit: i64,
    offset: i64,
) -> Result<Vec<Paper>, sqlx::Error> {
    let mut builder = QueryBuilder::new("SELECT * FROM papers");
    push_filters(&mut builder, filters);
    builder
        .push(" ORDER BY created_at DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
    builder.build_query_as::<Paper>().fetch_all(pool).await
}

pub async fn count(pool: &PgPool, filters: &PaperFilters) -> Result<i64, sqlx::Error> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM papers");
    push_filters(&mut builder, filters);
    let (count,): (i64,) = builder.build_query_as().fetch_one(pool).await?;
    Ok(count)
}

pub async fn get(pool: &PgPool, id: i64) -> Result<Option<Paper>, sqlx::Error> {
    sqlx::query_as::<_, Paper>("SELECT * FROM papers WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub struct PaperUpdate<'a> {
    pub title: &'a str,
    pub abstract_text: &'a str,
    pub topic: &'a str,
    pub keyword: Option<&'a str>,
    pub status: &'a str,
}

/// Administrative edit; the only write path for `status` besides the
/// decision workflow.
pub async fn update(
    pool: &PgPool,
    id: i64,
    fields: &PaperUpdate<'_>,
) -> Result<Option<Paper>, sqlx::Error> {
    sqlx::query_as::<_, Paper>(
        r#"
        UPDATE papers
        SET title = $2, abstract = $3, topic = $4, keyword = $5, status = $6
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(fields.title)
    .bind(fields.abstract_text)
    .bind(fields.topic)
    .bind(fields.keyword)
    .bind(fields.status)
    .fetch_optional(pool)
    .await
}

/// Delete a paper, returning its stored file pointer so the caller can
/// remove the file after the row is gone.
pub async fn delete(pool: &PgPool, id: i64) -> Result<Option<Option<String>>, sqlx::Error> {
    let row: Option<(Option<String>,)> =
        sqlx::query_as("DELETE FROM papers WHERE id = $1 RETURNING file_url")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(|(file_url,)| file_url))
}
