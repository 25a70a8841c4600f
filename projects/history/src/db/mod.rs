pub mod schema;
pub mod post;

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use thiserror::Error;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

#[derive(Debug, Error)]
pub enum CreatePoolError {
    #[error("BuildPool: {source}")]
    BuildPool {
        #[from]
        source: r2d2::Error,
    },
}

pub fn create_pool(database_url: &str, max_size: u32) -> Result<PgPool, CreatePoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(|source| CreatePoolError::BuildPool { source })
}

#[cfg(test)]
pub fn establish_test_connection() -> PgConnection {
    use diesel::Connection;

    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for database tests");

    PgConnection::establish(&url).unwrap_or_else(|_| panic!("Error connecting to {url}"))
}

/// Pool that never dials out until a connection is requested.
#[cfg(test)]
pub fn unconnected_test_pool() -> PgPool {
    use std::time::Duration;

    let manager = ConnectionManager::<PgConnection>::new("postgres://invalid@127.0.0.1:1/none");

    Pool::builder()
        .max_size(1)
        .min_idle(Some(0))
        .connection_timeout(Duration::from_millis(200))
        .build_unchecked(manager)
}
