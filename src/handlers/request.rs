use actix_web::{web, get, post, HttpRequest, HttpMessage, HttpResponse, ResponseError};
use chrono::Utc;
use uuid::Uuid;

use crate::{PGPool, dto::NewRequestDto, errors::ApiError, service::{self, auth::UserAuthData}};

#[post("/requests")]
pub async fn create(
    req: HttpRequest,
    dto: web::Json<NewRequestDto>,
    pool_state: web::Data<PGPool>
) -> HttpResponse {
    let conn: &PGPool = pool_state.get_ref();
    let auth = match req.extensions().get::<UserAuthData>().cloned() {
        Some(auth) => auth,
        None => return ApiError::Unauthorized.error_response()
    };
    let today = Utc::now().date_naive();
    match service::request::create(&auth, dto.into_inner(), today, conn).await {
        Ok(request) => HttpResponse::Created().json(request),
        Err(err) => err.error_response()
    }
}

#[get("/requests")]
pub async fn get_all(pool_state: web::Data<PGPool>) -> HttpResponse {
    let conn: &PGPool = pool_state.get_ref();
    match service::request::get_all(conn).await {
        Ok(requests) => HttpResponse::Ok().json(requests),
        Err(err) => err.error_response()
    }
}

#[get("/requests/{id}")]
pub async fn get_by_id(id: web::Path<Uuid>, pool_state: web::Data<PGPool>) -> HttpResponse {
    let conn: &PGPool = pool_state.get_ref();
    match service::request::get_by_id(id.into_inner(), conn).await {
        Ok(request) => HttpResponse::Ok().json(request),
        Err(err) => err.error_response()
    }
}

#[post("/requests/{id}/accept")]
pub async fn accept(
    req: HttpRequest,
    id: web::Path<Uuid>,
    pool_state: web::Data<PGPool>
) -> HttpResponse {
    let conn: &PGPool = pool_state.get_ref();
    let auth = match req.extensions().get::<UserAuthData>().cloned() {
        Some(auth) => auth,
        None => return ApiError::Unauthorized.error_response()
    };
    match service::request::accept(&auth, id.into_inner(), conn).await {
        Ok(()) => HttpResponse::Ok().json("request accepted"),
        Err(err) => err.error_response()
    }
}

#[post("/requests/{id}/collect")]
pub async fn collect(
    req: HttpRequest,
    id: web::Path<Uuid>,
    pool_state: web::Data<PGPool>
) -> HttpResponse {
    let conn: &PGPool = pool_state.get_ref();
    let auth = match req.extensions().get::<UserAuthData>().cloned() {
        Some(auth) => auth,
        None => return ApiError::Unauthorized.error_response()
    };
    let today = Utc::now().date_naive();
    match service::request::collect(&auth, id.into_inner(), today, conn).await {
        Ok(()) => HttpResponse::Ok().json("collection confirmed"),
        Err(err) => err.error_response()
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create);
    cfg.service(get_all);
    cfg.service(get_by_id);
    cfg.service(accept);
    cfg.service(collect);
}
