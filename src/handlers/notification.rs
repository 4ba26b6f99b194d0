use actix_web::{web, get, post, HttpRequest, HttpMessage, HttpResponse, ResponseError};
use uuid::Uuid;

use crate::{PGPool, errors::ApiError, service::{self, auth::UserAuthData}};

#[get("/notifications")]
pub async fn get_all(req: HttpRequest, pool_state: web::Data<PGPool>) -> HttpResponse {
    let conn: &PGPool = pool_state.get_ref();
    let auth = match req.extensions().get::<UserAuthData>().cloned() {
        Some(auth) => auth,
        None => return ApiError::Unauthorized.error_response()
    };
    match service::notification::get_for_user(&auth, conn).await {
        Ok(notifications) => HttpResponse::Ok().json(notifications),
        Err(err) => err.error_response()
    }
}

#[post("/notifications/{id}/read")]
pub async fn mark_read(
    req: HttpRequest,
    id: web::Path<Uuid>,
    pool_state: web::Data<PGPool>
) -> HttpResponse {
    let conn: &PGPool = pool_state.get_ref();
    let auth = match req.extensions().get::<UserAuthData>().cloned() {
        Some(auth) => auth,
        None => return ApiError::Unauthorized.error_response()
    };
    match service::notification::mark_read(&auth, id.into_inner(), conn).await {
        Ok(()) => HttpResponse::Ok().json("notification read"),
        Err(err) => err.error_response()
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_all);
    cfg.service(mark_read);
}
