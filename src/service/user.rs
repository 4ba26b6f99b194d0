use crate::{dto::NewUserDto, PGPool, models::User, errors::ApiError};
use crate::db;
use uuid::Uuid;

use super::crypto;

/// Registers an account and its empty donor profile.
pub async fn create(dto: NewUserDto, pool: &PGPool) -> Result<Uuid, ApiError> {
    let NewUserDto { username, email, first_name, last_name, pwd, pwd_confirm } = dto;
    if username.trim().is_empty() {
        return Err(ApiError::validation("username", "Username is required."));
    }
    if pwd.is_empty() {
        return Err(ApiError::validation("pwd", "Password is required."));
    }
    if db::user::exists(&username, pool).await {
        return Err(ApiError::validation("username", "Username already exists."));
    }
    let pwd_hash = crypto::get_sha3_256_hash(&pwd);
    let pwd_confirm_hash = crypto::get_sha3_256_hash(&pwd_confirm);
    if pwd_hash != pwd_confirm_hash {
        return Err(ApiError::validation("pwd_confirm", "Passwords do not match."));
    }
    let id = Uuid::new_v4();
    let res = db::user::create(User {
        id,
        username,
        pwd_hash,
        email,
        first_name,
        last_name,
        access_token: None,
        refresh_token: None
    }, pool)
    .await;
    match res {
        Ok(_) => {}
        Err(_) => return Err(ApiError::InternalError)
    }
    // Every account carries a profile from the start.
    db::profile::create_default(id, pool).await?;
    Ok(id)
}

pub async fn get_by_id(id: Uuid, pool: &PGPool) -> Result<User, ApiError> {
    let result = db::user::get_by_id(id, pool).await;
    match result {
        Ok(user) => Ok(user),
        Err(sqlx::Error::RowNotFound) => Err(ApiError::NotFound),
        Err(_) => Err(ApiError::InternalError)
    }
}
