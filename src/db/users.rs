use serde::Serialize;
use sqlx::PgPool;

/// A user row flattened with its role name for list payloads.
#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct UserView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Option<String>,
}

pub async fn list(pool: &PgPool, role: Option<&str>) -> Result<Vec<UserView>, sqlx::Error> {
    match role {
        Some(role) => {
            sqlx::query_as::<_, UserView>(
                r#"
                SELECT u.id, u.name, u.email, r.name AS role
                FROM users u
                JOIN roles r ON r.id = u.role_id
                WHERE r.name = $1
                ORDER BY u.name
                "#,
            )
            .bind(role)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, UserView>(
                r#"
                SELECT u.id, u.name, u.email, r.name AS role
                FROM users u
                LEFT JOIN roles r ON r.id = u.role_id
                ORDER BY u.name
                "#,
            )
            .fetch_all(pool)
            .await
        }
    }
}

pub async fn exists(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let (found,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(found)
}

/// True only if every id in `ids` references a user.
pub async fn all_exist(pool: &PgPool, ids: &[i64]) -> Result<bool, sqlx::Error> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_one(pool)
            .await?;
    Ok(count as usize == ids.len())
}
