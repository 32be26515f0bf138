//! Fixture loader for a RealWorld blogging database.
//!
//! The loader talks to storage only through [`store::Store`], so the same
//! seeding run works against Postgres ([`db::PgStore`]) and against the
//! in-memory backend used by the tests ([`store::memory::MemoryStore`]).

#![recursion_limit = "1024"]

extern crate dotenv;

#[macro_use]
extern crate error_chain;

#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;
extern crate r2d2;
extern crate r2d2_diesel;

extern crate chrono;
extern crate crypto;
extern crate flexi_logger;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate regex;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;

extern crate slug;

#[cfg(test)]
extern crate tempfile;

pub mod article;
pub mod comment;
pub mod config;
pub mod db;
pub mod errors;
pub mod fixtures;
pub mod logging;
pub mod profile;
pub mod seed;
pub mod store;
pub mod types;
pub mod users;

pub use config::Config;
pub use errors::{Error, ErrorKind, Result, ResultExt};
pub use fixtures::Fixtures;
pub use seed::{ArticleTagPolicy, CommentPolicy, SeedOptions, SeedReport, Seeder};
pub use store::{Counts, Store};
