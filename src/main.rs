pub mod db;
pub mod handlers;
pub mod service;
pub mod models;
pub mod dto;
pub mod errors;

use actix_web::{HttpServer, App, web};
use db::init_db_pool;
use sqlx::{postgres::Postgres, Pool};
use dotenv::dotenv;
use std::env;

type PGPool = Pool<Postgres>;

// Token lifetimes in seconds.
const ACCESS_TOKEN_EXP: usize = 60 * 60;
const REFRESH_TOKEN_EXP: usize = 5 * 24 * 60 * 60;


#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    service::log::init_logger();
    let db_url = env::var("DATABASE_URL")
    .unwrap_or_else(|e| {
        panic!("Failed to get env with name 'DATABASE_URL': {:?}", e);
    });
    let pool: PGPool = init_db_pool(&db_url).await;
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(service::log::LoggerMiddleware)
            .service(
                web::scope("/auth")
                    .configure(handlers::auth::init_routes)
            )
            .service(
                web::scope("/donors")
                    .configure(handlers::donor::init_public_routes)
            )
            .service(
                web::scope("/api")
                    .wrap(service::auth::AuthMiddleware)
                    .configure(handlers::profile::init_routes)
                    .configure(handlers::request::init_routes)
                    .configure(handlers::notification::init_routes)
                    .configure(handlers::donation::init_routes)
                    .configure(handlers::donor::init_routes)
                    .configure(handlers::analytics::init_routes)
            )
    })
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}
