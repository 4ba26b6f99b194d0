use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{models::Notification, PGPool};

pub async fn create<'e, E: PgExecutor<'e>>(
    notification: &Notification,
    executor: E
) -> Result<u64, sqlx::Error> {
    let res = sqlx::query(
        "INSERT INTO notifications (id, user_id, request_id, message, read, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)"
    )
    .bind(notification.id)
    .bind(notification.user_id)
    .bind(notification.request_id)
    .bind(&notification.message)
    .bind(notification.read)
    .bind(notification.created_at)
    .execute(executor)
    .await?;
    Ok(res.rows_affected())
}

pub async fn get_for_user(user_id: Uuid, pool: &PGPool) -> Result<Vec<Notification>, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC"
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Mark-read is scoped to the owner; a foreign id affects zero rows.
pub async fn mark_read(id: Uuid, user_id: Uuid, pool: &PGPool) -> Result<u64, sqlx::Error> {
    let res = sqlx::query("UPDATE notifications SET read = TRUE WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

/// Removes the whole notification trail of a request, for every recipient.
pub async fn delete_for_request<'e, E: PgExecutor<'e>>(
    request_id: Uuid,
    executor: E
) -> Result<u64, sqlx::Error> {
    let res = sqlx::query("DELETE FROM notifications WHERE request_id = $1")
        .bind(request_id)
        .execute(executor)
        .await?;
    Ok(res.rows_affected())
}
