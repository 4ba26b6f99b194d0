use sqlx::{postgres::PgQueryResult, PgExecutor};
use uuid::Uuid;

use crate::{models::BloodRequest, PGPool};

pub async fn create<'e, E: PgExecutor<'e>>(
    request: &BloodRequest,
    executor: E
) -> Result<PgQueryResult, sqlx::Error> {
    sqlx::query(
        "INSERT INTO requests (id, user_id, blood_group, city, urgency, hospital, cause, address, contact_info, status, accepted_by, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)"
    )
    .bind(request.id)
    .bind(request.user_id)
    .bind(&request.blood_group)
    .bind(&request.city)
    .bind(&request.urgency)
    .bind(&request.hospital)
    .bind(&request.cause)
    .bind(&request.address)
    .bind(&request.contact_info)
    .bind(&request.status)
    .bind(request.accepted_by)
    .bind(request.created_at)
    .execute(executor)
    .await
}

pub async fn get_by_id(id: Uuid, pool: &PGPool) -> Result<BloodRequest, sqlx::Error> {
    sqlx::query_as::<_, BloodRequest>("SELECT * FROM requests WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
}

pub async fn get_all(pool: &PGPool) -> Result<Vec<BloodRequest>, sqlx::Error> {
    sqlx::query_as::<_, BloodRequest>("SELECT * FROM requests ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

/// Conditional update keyed on the expected current status. Returns the
/// affected row count: 0 means some other caller already moved the request
/// on, or it was never open.
pub async fn try_accept<'e, E: PgExecutor<'e>>(
    id: Uuid,
    actor: Uuid,
    executor: E
) -> Result<u64, sqlx::Error> {
    let res = sqlx::query(
        "UPDATE requests SET status = 'accepted', accepted_by = $1 WHERE id = $2 AND status = 'open'"
    )
    .bind(actor)
    .bind(id)
    .execute(executor)
    .await?;
    Ok(res.rows_affected())
}

pub async fn try_collect<'e, E: PgExecutor<'e>>(
    id: Uuid,
    executor: E
) -> Result<u64, sqlx::Error> {
    let res = sqlx::query(
        "UPDATE requests SET status = 'collected' WHERE id = $1 AND status = 'accepted'"
    )
    .bind(id)
    .execute(executor)
    .await?;
    Ok(res.rows_affected())
}

/// Open-request counts grouped by blood group.
pub async fn demand_by_group(pool: &PGPool) -> Result<Vec<(String, i64)>, sqlx::Error> {
    sqlx::query_as::<_, (String, i64)>(
        "SELECT blood_group, COUNT(*) FROM requests WHERE status = 'open' GROUP BY blood_group"
    )
    .fetch_all(pool)
    .await
}
