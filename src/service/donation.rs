use crate::{db, errors::ApiError, models::Donation, PGPool};
use crate::service::auth::UserAuthData;

pub async fn get_for_user(auth: &UserAuthData, pool: &PGPool) -> Result<Vec<Donation>, ApiError> {
    Ok(db::donation::get_for_user(auth.user_id, pool).await?)
}
