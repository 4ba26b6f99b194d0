pub mod user;
pub mod profile;
pub mod request;
pub mod notification;
pub mod donation;

use crate::PGPool;
use log::info;
use sqlx::postgres::PgPoolOptions;

pub async fn init_db_pool(db_url: &str) -> PGPool {
    let pool: PGPool = PgPoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await
        .unwrap_or_else(|e| panic!("Failed to connect to postgres: {:?}", e));
    info!("connected to postgres");
    pool
}
