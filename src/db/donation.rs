use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{models::Donation, PGPool};

/// The donation ledger is append-only; there is no update or delete here.
pub async fn create<'e, E: PgExecutor<'e>>(
    donation: &Donation,
    executor: E
) -> Result<u64, sqlx::Error> {
    let res = sqlx::query(
        "INSERT INTO donations (id, user_id, blood_group, hospital, units_donated, donation_date)
        VALUES ($1, $2, $3, $4, $5, $6)"
    )
    .bind(donation.id)
    .bind(donation.user_id)
    .bind(&donation.blood_group)
    .bind(&donation.hospital)
    .bind(donation.units_donated)
    .bind(donation.donation_date)
    .execute(executor)
    .await?;
    Ok(res.rows_affected())
}

pub async fn get_for_user(user_id: Uuid, pool: &PGPool) -> Result<Vec<Donation>, sqlx::Error> {
    sqlx::query_as::<_, Donation>(
        "SELECT * FROM donations WHERE user_id = $1 ORDER BY donation_date DESC"
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn count_for_user(user_id: Uuid, pool: &PGPool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM donations WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
