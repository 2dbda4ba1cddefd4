//! Lazy PostgreSQL connection pool shared by every server function.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;

static POOL: OnceCell<PgPool> = OnceCell::const_new();

const DEFAULT_POOL_SIZE: u32 = 5;

/// Get or initialize the connection pool.
///
/// Reads `DATABASE_URL` (required) and `OPSDECK_DB_POOL_SIZE` (optional,
/// defaults to 5) from the environment.
pub async fn get_pool() -> Result<&'static PgPool, sqlx::Error> {
    POOL.get_or_try_init(|| async {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let pool_size = std::env::var("OPSDECK_DB_POOL_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_POOL_SIZE);

        PgPoolOptions::new()
            .max_connections(pool_size)
            .connect(&database_url)
            .await
    })
    .await
}
