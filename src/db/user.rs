use sqlx::postgres::PgQueryResult;
use uuid::Uuid;

use crate::{models::User, PGPool};

pub async fn create(user: User, pool: &PGPool) -> Result<PgQueryResult, sqlx::Error> {
    sqlx::query(
        "INSERT INTO users (id, username, pwd_hash, email, first_name, last_name, access_token, refresh_token)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"
    )
    .bind(user.id)
    .bind(&user.username)
    .bind(&user.pwd_hash)
    .bind(&user.email)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.access_token)
    .bind(&user.refresh_token)
    .execute(pool)
    .await
}

pub async fn get_by_id(id: Uuid, pool: &PGPool) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
}

pub async fn get_by_username(username: &str, pool: &PGPool) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_one(pool)
        .await
}

pub async fn exists(username: &str, pool: &PGPool) -> bool {
    let res = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_one(pool)
        .await;
    res.is_ok()
}

pub async fn set_tokens(
    id: Uuid,
    access_token: Option<&str>,
    refresh_token: Option<&str>,
    pool: &PGPool
) -> Result<u64, sqlx::Error> {
    let res = sqlx::query(
        "UPDATE users
        SET access_token = COALESCE($1, access_token),
            refresh_token = COALESCE($2, refresh_token)
        WHERE id = $3"
    )
    .bind(access_token)
    .bind(refresh_token)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(res.rows_affected())
}
