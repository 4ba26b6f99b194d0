use chrono::NaiveDate;

use crate::{db, dto::{DonorSearchQuery, PublicDonorDto}, errors::ApiError, PGPool};
use crate::service::availability::is_available;

/// Public donor search: optional blood group / district filters, availability
/// applied on top.
pub async fn search(
    query: &DonorSearchQuery,
    as_of: NaiveDate,
    pool: &PGPool
) -> Result<Vec<PublicDonorDto>, ApiError> {
    let rows = db::profile::search(
        query.blood_group.as_deref(),
        query.district.as_deref(),
        pool
    )
    .await?;
    Ok(rows
        .iter()
        .filter(|row| is_available(&row.profile, as_of))
        .map(PublicDonorDto::from)
        .collect())
}

/// Computed inventory: who could donate right now, not stored stock rows.
pub async fn inventory(as_of: NaiveDate, pool: &PGPool) -> Result<Vec<PublicDonorDto>, ApiError> {
    let rows = db::profile::get_all_rows(pool).await?;
    Ok(rows
        .iter()
        .filter(|row| is_available(&row.profile, as_of))
        .map(PublicDonorDto::from)
        .collect())
}
