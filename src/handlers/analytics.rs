use actix_web::{web, get, HttpResponse, ResponseError};
use chrono::Utc;

use crate::{PGPool, service};

#[get("/analytics")]
pub async fn analytics(pool_state: web::Data<PGPool>) -> HttpResponse {
    let conn: &PGPool = pool_state.get_ref();
    let today = Utc::now().date_naive();
    match service::analytics::rollup(today, conn).await {
        Ok(rollup) => HttpResponse::Ok().json(rollup),
        Err(err) => err.error_response()
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(analytics);
}
