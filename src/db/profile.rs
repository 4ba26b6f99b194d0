use chrono::NaiveDate;
use sqlx::{PgExecutor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{models::{DonorProfile, DonorRow}, PGPool};

const DONOR_ROW_SELECT: &str =
    "SELECT p.id, p.user_id, p.phone, p.blood_group, p.last_donation, p.district, p.share_phone, p.not_ready,
            u.username, u.email, u.first_name, u.last_name
     FROM donor_profiles p
     JOIN users u ON u.id = p.user_id";

pub async fn create_default(user_id: Uuid, pool: &PGPool) -> Result<DonorProfile, sqlx::Error> {
    let profile = DonorProfile {
        id: Uuid::new_v4(),
        user_id,
        phone: None,
        blood_group: None,
        last_donation: None,
        district: None,
        share_phone: false,
        not_ready: false
    };
    sqlx::query(
        "INSERT INTO donor_profiles (id, user_id, phone, blood_group, last_donation, district, share_phone, not_ready)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"
    )
    .bind(profile.id)
    .bind(profile.user_id)
    .bind(&profile.phone)
    .bind(&profile.blood_group)
    .bind(profile.last_donation)
    .bind(&profile.district)
    .bind(profile.share_phone)
    .bind(profile.not_ready)
    .execute(pool)
    .await?;
    Ok(profile)
}

pub async fn get_by_user(user_id: Uuid, pool: &PGPool) -> Result<Option<DonorProfile>, sqlx::Error> {
    sqlx::query_as::<_, DonorProfile>("SELECT * FROM donor_profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Profiles are created lazily; a user who never edited theirs still has one
/// the first time anything reads it.
pub async fn get_or_create(user_id: Uuid, pool: &PGPool) -> Result<DonorProfile, sqlx::Error> {
    match get_by_user(user_id, pool).await? {
        Some(profile) => Ok(profile),
        None => create_default(user_id, pool).await
    }
}

pub async fn update(profile: &DonorProfile, pool: &PGPool) -> Result<u64, sqlx::Error> {
    let res = sqlx::query(
        "UPDATE donor_profiles
        SET phone = $1, blood_group = $2, last_donation = $3, district = $4, share_phone = $5, not_ready = $6
        WHERE id = $7"
    )
    .bind(&profile.phone)
    .bind(&profile.blood_group)
    .bind(profile.last_donation)
    .bind(&profile.district)
    .bind(profile.share_phone)
    .bind(profile.not_ready)
    .bind(profile.id)
    .execute(pool)
    .await?;
    Ok(res.rows_affected())
}

/// Donor rows matching the optional blood group / district filters, both
/// case-insensitive. Availability is applied by the caller.
pub async fn search(
    blood_group: Option<&str>,
    district: Option<&str>,
    pool: &PGPool
) -> Result<Vec<DonorRow>, sqlx::Error> {
    let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(DONOR_ROW_SELECT);
    query_builder.push(" WHERE 1 = 1");
    if let Some(bg) = blood_group {
        query_builder.push(" AND lower(p.blood_group) = lower(");
        query_builder.push_bind(bg.to_string());
        query_builder.push(")");
    }
    if let Some(d) = district {
        query_builder.push(" AND lower(p.district) = lower(");
        query_builder.push_bind(d.to_string());
        query_builder.push(")");
    }
    query_builder.push(" ORDER BY u.username");
    query_builder
        .build_query_as::<DonorRow>()
        .fetch_all(pool)
        .await
}

pub async fn get_all_rows(pool: &PGPool) -> Result<Vec<DonorRow>, sqlx::Error> {
    search(None, None, pool).await
}

/// Records a donation on the profile: the rest window restarts and the donor
/// is marked not ready until they flip the flag back themselves.
pub async fn set_donated<'e, E: PgExecutor<'e>>(
    user_id: Uuid,
    donated_on: NaiveDate,
    executor: E
) -> Result<u64, sqlx::Error> {
    let res = sqlx::query(
        "UPDATE donor_profiles SET last_donation = $1, not_ready = TRUE WHERE user_id = $2"
    )
    .bind(donated_on)
    .bind(user_id)
    .execute(executor)
    .await?;
    Ok(res.rows_affected())
}
