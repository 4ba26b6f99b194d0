use actix_web::{web, get, HttpRequest, HttpMessage, HttpResponse, ResponseError};

use crate::{PGPool, errors::ApiError, service::{self, auth::UserAuthData}};

#[get("/donations")]
pub async fn get_all(req: HttpRequest, pool_state: web::Data<PGPool>) -> HttpResponse {
    let conn: &PGPool = pool_state.get_ref();
    let auth = match req.extensions().get::<UserAuthData>().cloned() {
        Some(auth) => auth,
        None => return ApiError::Unauthorized.error_response()
    };
    match service::donation::get_for_user(&auth, conn).await {
        Ok(donations) => HttpResponse::Ok().json(donations),
        Err(err) => err.error_response()
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_all);
}
