use config::Config;
use diesel::pg::PgConnection;
use errors::*;
use r2d2;
use r2d2_diesel::ConnectionManager;
use std::ops::Deref;

pub mod schema;
mod store;

pub use self::store::PgStore;

// An alias to the type for a pool of Diesel Postgres connections.
pub type Pool = r2d2::Pool<ConnectionManager<PgConnection>>;

pub struct DbConnection(pub r2d2::PooledConnection<ConnectionManager<PgConnection>>);

// For the convenience of using an &DbConnection as an &PgConnection.
impl Deref for DbConnection {
    type Target = PgConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

embed_migrations!("migrations");

pub fn init_pool(config: &Config) -> Result<Pool> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url.as_str());
    let pool = Pool::builder()
        .max_size(config.pool_size)
        .build(manager)
        .chain_err(|| "failed to open database pool")?;
    Ok(pool)
}

pub fn run_migrations(connection: &PgConnection) -> Result<()> {
    embedded_migrations::run(connection)?;
    Ok(())
}
