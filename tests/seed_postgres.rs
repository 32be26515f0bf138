//! Runs against a real database: `DATABASE_URL=... cargo test -- --ignored`.
//! The target database must be empty or seeded only by this loader.

extern crate chrono;
extern crate realworld_seed;

use chrono::Utc;
use realworld_seed::db::PgStore;
use realworld_seed::users::{NewUser, User};
use realworld_seed::{Config, ErrorKind, Fixtures, SeedOptions, Seeder, Store};

#[test]
#[ignore]
fn seeding_twice_is_idempotent_except_for_comments() {
    let config = Config::from_env().expect("DATABASE_URL must be set");
    let store = PgStore::connect(&config).expect("database should be reachable");
    store.run_migrations().expect("migrations should apply");

    let seeder = Seeder::new(&store, SeedOptions::default());
    let first = seeder.run(&Fixtures::builtin()).expect("first run");
    let second = seeder.run(&Fixtures::builtin()).expect("second run");

    assert_eq!(first.totals.users, second.totals.users);
    assert_eq!(first.totals.tags, second.totals.tags);
    assert_eq!(first.totals.articles, second.totals.articles);
    assert_eq!(second.totals.comments, first.totals.comments + 3);
    assert_eq!(first.totals.follows, second.totals.follows);
    assert_eq!(first.totals.favorites, second.totals.favorites);

    let totals = store.counts().expect("counts");
    assert_eq!(totals, second.totals);
}

#[test]
#[ignore]
fn reused_email_is_reported_as_unique_violation() {
    let config = Config::from_env().expect("DATABASE_URL must be set");
    let store = PgStore::connect(&config).expect("database should be reachable");
    store.run_migrations().expect("migrations should apply");
    Seeder::new(&store, SeedOptions::default())
        .run(&Fixtures::builtin())
        .expect("builtin run");

    let new_user = NewUser {
        username: "john-the-second",
        email: "john@example.com",
        password: User::make_password("password123").expect("hash"),
        bio: None,
        image: None,
        created_at: Utc::now().naive_utc(),
    };
    let err = store
        .ensure_user(&new_user)
        .expect_err("duplicate email must fail");
    match *err.kind() {
        ErrorKind::UniqueViolation(ref constraint, ref value) => {
            assert_eq!(constraint, "users.email");
            assert_eq!(value, "john@example.com");
        }
        ref other => panic!("unexpected error: {:?}", other),
    }
}
