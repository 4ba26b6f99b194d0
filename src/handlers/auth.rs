use actix_web::{web, post, HttpResponse, ResponseError};
use log::{error, info};

use crate::{PGPool, dto::{LoginUserRequest, NewUserDto, RefreshTokenDto}, service};

#[post("/register")]
pub async fn register(dto: web::Json<NewUserDto>, pool_state: web::Data<PGPool>) -> HttpResponse {
    let conn: &PGPool = pool_state.get_ref();
    let response = service::user::create(dto.into_inner(), conn).await;
    match response {
        Ok(user_id) => {
            info!("registered user {}", user_id);
            HttpResponse::Created().json(serde_json::json!({ "id": user_id }))
        },
        Err(err) => {
            error!("[{:} : {:}] registration failed: {:?}", file!(), line!(), err);
            err.error_response()
        }
    }
}

#[post("/login")]
pub async fn login(dto: web::Json<LoginUserRequest>, pool_state: web::Data<PGPool>) -> HttpResponse {
    let conn: &PGPool = pool_state.get_ref();
    let response = service::auth::jwt::login(conn, dto.into_inner()).await;
    match response {
        Ok(tokens) => HttpResponse::Ok().json(tokens),
        Err(err) => {
            error!("[{:} : {:}] login failed: {:?}", file!(), line!(), err);
            err.error_response()
        }
    }
}

#[post("/refresh")]
pub async fn refresh(dto: web::Json<RefreshTokenDto>, pool_state: web::Data<PGPool>) -> HttpResponse {
    let conn: &PGPool = pool_state.get_ref();
    let response = service::auth::jwt::refresh(dto.into_inner().refresh, conn).await;
    match response {
        Ok(access) => HttpResponse::Ok().json(serde_json::json!({ "access": access })),
        Err(err) => err.error_response()
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register);
    cfg.service(login);
    cfg.service(refresh);
}
