use actix_web::{web, get, put, HttpRequest, HttpMessage, HttpResponse, ResponseError};

use crate::{PGPool, dto::UpdateProfileDto, errors::ApiError, service::{self, auth::UserAuthData}};

#[get("/profile")]
pub async fn get_profile(req: HttpRequest, pool_state: web::Data<PGPool>) -> HttpResponse {
    let conn: &PGPool = pool_state.get_ref();
    let auth = match req.extensions().get::<UserAuthData>().cloned() {
        Some(auth) => auth,
        None => return ApiError::Unauthorized.error_response()
    };
    match service::profile::get(&auth, conn).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(err) => err.error_response()
    }
}

#[put("/profile")]
pub async fn update_profile(
    req: HttpRequest,
    dto: web::Json<UpdateProfileDto>,
    pool_state: web::Data<PGPool>
) -> HttpResponse {
    let conn: &PGPool = pool_state.get_ref();
    let auth = match req.extensions().get::<UserAuthData>().cloned() {
        Some(auth) => auth,
        None => return ApiError::Unauthorized.error_response()
    };
    match service::profile::update(&auth, dto.into_inner(), conn).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(err) => err.error_response()
    }
}

#[get("/dashboard-summary")]
pub async fn dashboard_summary(req: HttpRequest, pool_state: web::Data<PGPool>) -> HttpResponse {
    let conn: &PGPool = pool_state.get_ref();
    let auth = match req.extensions().get::<UserAuthData>().cloned() {
        Some(auth) => auth,
        None => return ApiError::Unauthorized.error_response()
    };
    match service::profile::dashboard(&auth, conn).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(err) => err.error_response()
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_profile);
    cfg.service(update_profile);
    cfg.service(dashboard_summary);
}
