use std::future::{ready, Ready};
use actix_web::{dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform}, HttpMessage};
use futures_util::future::LocalBoxFuture;

use self::jwt::TokenType;

/// Identity of the authenticated caller, injected into request extensions
/// by [`AuthMiddleware`].
#[derive(Debug, Clone)]
pub struct UserAuthData {
    pub user_id: uuid::Uuid,
    pub username: String
}

pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
    where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
    where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = match jwt::parse_request(&req, "Bearer") {
            Ok(token) => token,
            Err(err) => {
                return Box::pin(async move { Err(err.into()) });
            }
        };
        match jwt::decode_claims(&TokenType::Access, token) {
            Ok(claims) => {
                let user_auth_data = UserAuthData {
                    user_id: claims.claims.user_id,
                    username: claims.claims.username,
                };
                req.extensions_mut().insert(user_auth_data);
                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res)
                })
            },
            Err(err) => Box::pin(async move { Err(err.into()) })
        }
    }
}


pub mod jwt {
    use std::env::{self, VarError};
    use actix_web::dev::ServiceRequest;
    use chrono::Utc;
    use jsonwebtoken::{Header, Algorithm, EncodingKey, encode, decode, DecodingKey, Validation, TokenData};
    use crate::{dto::{self, Claims, AuthTokensDto}, errors::ApiError, service::crypto, PGPool, db, ACCESS_TOKEN_EXP, REFRESH_TOKEN_EXP};

    pub enum TokenType {
        Refresh,
        Access
    }

    pub fn get_secret(token_type: &TokenType) -> Result<String, VarError> {
        let env_key = match token_type {
            TokenType::Refresh => "JWT_REFRESH_TOKEN",
            TokenType::Access => "JWT_ACCESS_TOKEN"
        };
        env::var(env_key)
    }

    pub fn decode_claims(token_type: &TokenType, token: String) -> Result<TokenData<Claims>, ApiError> {
        let secret = get_secret(token_type).map_err(|_| ApiError::InternalError)?;
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(&token, &decoding_key, &validation).map_err(|err| {
            match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => ApiError::TokenExpirationError,
                _ => ApiError::DecodeError
            }
        })
    }

    /// Issues a token expiring `exp` seconds from now.
    pub fn create(token_type: &TokenType, user_id: &uuid::Uuid, username: &str, exp: usize) -> Result<String, ApiError> {
        let exp_timestamp = Utc::now().timestamp() as usize + exp;
        let secret = get_secret(token_type).map_err(|_| ApiError::InternalError)?;
        let header = Header::new(Algorithm::HS256);
        let claims = Claims::new(user_id, username, exp_timestamp);
        let key = EncodingKey::from_secret(secret.as_ref());
        encode(&header, &claims, &key).map_err(|_| ApiError::InternalError)
    }

    /// Exchanges a valid refresh token for a fresh access token, persisting
    /// the new token on the account row.
    pub async fn refresh(token: String, pool: &PGPool) -> Result<String, ApiError> {
        let claims = decode_claims(&TokenType::Refresh, token)?;
        let user_id = claims.claims.user_id;
        let username = claims.claims.username;
        let new_token = create(&TokenType::Access, &user_id, &username, ACCESS_TOKEN_EXP)?;
        db::user::set_tokens(user_id, Some(&new_token), None, pool)
            .await
            .map_err(|_| ApiError::InternalError)?;
        Ok(new_token)
    }

    /// Verifies credentials and issues a fresh access/refresh token pair.
    pub async fn login(pool: &PGPool, req: dto::LoginUserRequest) -> Result<AuthTokensDto, ApiError> {
        let user = db::user::get_by_username(&req.username, pool)
            .await
            .map_err(|_| ApiError::AuthError)?;
        if crypto::get_sha3_256_hash(&req.pwd) != user.pwd_hash {
            return Err(ApiError::AuthError);
        }
        let access = create(&TokenType::Access, &user.id, &user.username, ACCESS_TOKEN_EXP)?;
        let refresh = create(&TokenType::Refresh, &user.id, &user.username, REFRESH_TOKEN_EXP)?;
        let res = db::user::set_tokens(user.id, Some(&access), Some(&refresh), pool).await;
        match res {
            Ok(_) => Ok(AuthTokensDto { access, refresh }),
            Err(_) => Err(ApiError::InternalError)
        }
    }

    pub fn parse_request(req: &ServiceRequest, prefix: &str) -> Result<String, ApiError> {
        if let Some(auth_header) = req.headers().get("Authorization") {
            if let Ok(auth_value) = auth_header.to_str() {
                if let Some(token) = auth_value.strip_prefix(prefix) {
                    return Ok(token.trim_start().to_string());
                }
            }
        }
        Err(ApiError::AuthError)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use uuid::Uuid;

        fn set_secrets() {
            std::env::set_var("JWT_ACCESS_TOKEN", "test-access-secret");
            std::env::set_var("JWT_REFRESH_TOKEN", "test-refresh-secret");
        }

        #[test]
        fn test_create_and_decode_round_trip() {
            set_secrets();
            let user_id = Uuid::new_v4();
            let token = create(&TokenType::Access, &user_id, "ada", 3600).unwrap();
            let decoded = decode_claims(&TokenType::Access, token).unwrap();
            assert_eq!(decoded.claims.user_id, user_id);
            assert_eq!(decoded.claims.username, "ada");
        }

        #[test]
        fn test_access_token_rejected_with_refresh_secret() {
            set_secrets();
            let token = create(&TokenType::Access, &Uuid::new_v4(), "ada", 3600).unwrap();
            let err = decode_claims(&TokenType::Refresh, token).unwrap_err();
            assert!(matches!(err, ApiError::DecodeError));
        }
    }
}
