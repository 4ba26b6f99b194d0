use uuid::Uuid;

use crate::{db, errors::ApiError, models::Notification, PGPool};
use crate::service::auth::UserAuthData;

pub async fn get_for_user(auth: &UserAuthData, pool: &PGPool) -> Result<Vec<Notification>, ApiError> {
    Ok(db::notification::get_for_user(auth.user_id, pool).await?)
}

pub async fn mark_read(auth: &UserAuthData, id: Uuid, pool: &PGPool) -> Result<(), ApiError> {
    let rows = db::notification::mark_read(id, auth.user_id, pool).await?;
    if rows == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(())
}
