use actix_web::{web, get, HttpResponse, ResponseError};
use chrono::Utc;

use crate::{PGPool, dto::DonorSearchQuery, service};

// No auth: the public donor search exposes opt-in fields only.
#[get("/search")]
pub async fn search(query: web::Query<DonorSearchQuery>, pool_state: web::Data<PGPool>) -> HttpResponse {
    let conn: &PGPool = pool_state.get_ref();
    let today = Utc::now().date_naive();
    match service::donor::search(&query.into_inner(), today, conn).await {
        Ok(donors) => HttpResponse::Ok().json(donors),
        Err(err) => err.error_response()
    }
}

#[get("/inventory")]
pub async fn inventory(pool_state: web::Data<PGPool>) -> HttpResponse {
    let conn: &PGPool = pool_state.get_ref();
    let today = Utc::now().date_naive();
    match service::donor::inventory(today, conn).await {
        Ok(donors) => HttpResponse::Ok().json(donors),
        Err(err) => err.error_response()
    }
}

pub fn init_public_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(search);
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(inventory);
}
