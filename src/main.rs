#[macro_use]
extern crate log;
extern crate realworld_seed;

use realworld_seed::db::PgStore;
use realworld_seed::logging::{default_log_level, init_logging};
use realworld_seed::{Config, Fixtures, Result, Seeder};
use std::process;

fn run() -> Result<()> {
    let config = Config::from_env()?;
    let fixtures = Fixtures::load(config.fixtures_path.as_ref().map(|p| p.as_path()))?;

    // Dropping the store at the end of this scope releases the pool on
    // every exit path.
    let store = PgStore::connect(&config)?;
    if config.run_migrations {
        store.run_migrations()?;
    }

    let report = Seeder::new(&store, config.seed_options()).run(&fixtures)?;
    info!("{}", report);
    info!(
        "database now holds {} users, {} tags, {} articles, {} comments",
        report.totals.users, report.totals.tags, report.totals.articles, report.totals.comments
    );
    Ok(())
}

fn main() {
    let logger = match init_logging(default_log_level()) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("failed to start logging: {}", e);
            process::exit(1);
        }
    };

    if let Err(ref e) = run() {
        error!("seeding failed: {}", e);
        for cause in e.iter().skip(1) {
            error!("caused by: {}", cause);
        }
        logger.flush();
        process::exit(1);
    }
}
