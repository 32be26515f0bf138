extern crate realworld_seed;

use realworld_seed::fixtures::{ArticleFixture, CommentFixture};
use realworld_seed::store::memory::MemoryStore;
use realworld_seed::{
    ArticleTagPolicy, CommentPolicy, Counts, ErrorKind, Fixtures, SeedOptions, Seeder, Store,
};

fn seed(store: &MemoryStore, options: SeedOptions) {
    Seeder::new(store, options)
        .run(&Fixtures::builtin())
        .expect("seeding should succeed");
}

fn counts(store: &MemoryStore) -> Counts {
    store.counts().expect("counts should be readable")
}

#[test]
fn rerun_keeps_users_tags_and_articles_unique() {
    let store = MemoryStore::new();

    seed(&store, SeedOptions::default());
    let first = counts(&store);
    assert_eq!((first.users, first.tags, first.articles), (2, 5, 3));

    seed(&store, SeedOptions::default());
    let second = counts(&store);
    assert_eq!((second.users, second.tags, second.articles), (2, 5, 3));
}

#[test]
fn rerun_appends_comments_by_default() {
    let store = MemoryStore::new();

    seed(&store, SeedOptions::default());
    assert_eq!(counts(&store).comments, 3);

    seed(&store, SeedOptions::default());
    assert_eq!(counts(&store).comments, 6);
    assert_eq!(
        store
            .comments_on("typescript-best-practices")
            .expect("article exists")
            .len(),
        2
    );
}

#[test]
fn skip_existing_comment_policy_keeps_comments_stable() {
    let store = MemoryStore::new();
    let options = SeedOptions {
        comments: CommentPolicy::SkipExisting,
        ..SeedOptions::default()
    };

    seed(&store, options);
    let report = Seeder::new(&store, options)
        .run(&Fixtures::builtin())
        .expect("second run should succeed");

    assert_eq!(report.comments_added, 0);
    assert_eq!(report.comments_skipped, 3);
    assert_eq!(counts(&store).comments, 3);
}

#[test]
fn follow_edges_are_directed() {
    let store = MemoryStore::new();
    seed(&store, SeedOptions::default());
    seed(&store, SeedOptions::default());

    assert_eq!(
        store.following("janedoe").expect("janedoe exists"),
        vec!["johndoe".to_string()]
    );
    assert!(store.following("johndoe").expect("johndoe exists").is_empty());
    assert_eq!(counts(&store).follows, 1);
}

#[test]
fn favorites_match_the_dataset() {
    let store = MemoryStore::new();
    seed(&store, SeedOptions::default());
    seed(&store, SeedOptions::default());

    assert_eq!(
        store.favorites("janedoe").expect("janedoe exists"),
        vec![
            "implementing-aws-waf-with-cloudfront".to_string(),
            "introduction-to-aws-waf".to_string(),
        ]
    );
    assert_eq!(
        store.favorites("johndoe").expect("johndoe exists"),
        vec!["typescript-best-practices".to_string()]
    );
    assert_eq!(counts(&store).favorites, 3);
}

#[test]
fn articles_link_their_authors_and_tags() {
    let store = MemoryStore::new();
    seed(&store, SeedOptions::default());

    let john = store.user("johndoe").expect("johndoe exists");
    let article = store
        .article("introduction-to-aws-waf")
        .expect("article exists");
    assert_eq!(article.author_id, john.id);
    assert_eq!(
        store.article_tags("introduction-to-aws-waf").expect("article exists"),
        vec!["aws".to_string(), "waf".to_string(), "web-security".to_string()]
    );
    assert_eq!(
        store.article_tags("typescript-best-practices").expect("article exists"),
        vec!["javascript".to_string(), "typescript".to_string()]
    );
}

#[test]
fn stored_passwords_are_hashed() {
    let store = MemoryStore::new();
    seed(&store, SeedOptions::default());

    let jane = store.user("janedoe").expect("janedoe exists");
    assert_ne!(jane.password, "password123");
    assert!(jane.verify_password("password123").expect("hash is well formed"));
    assert_eq!(jane.email, "jane@example.com");
    assert_eq!(
        jane.image.as_ref().map(|s| s.as_str()),
        Some("https://i.pravatar.cc/200?u=janedoe")
    );
}

#[test]
fn existing_user_is_left_unchanged() {
    let store = MemoryStore::new();
    seed(&store, SeedOptions::default());
    let before = store.user("johndoe").expect("johndoe exists");

    let mut fixtures = Fixtures::builtin();
    fixtures.users[0].bio = Some("A different bio".to_string());
    fixtures.users[0].password = "another-password".to_string();
    Seeder::new(&store, SeedOptions::default())
        .run(&fixtures)
        .expect("second run should succeed");

    let after = store.user("johndoe").expect("johndoe exists");
    assert_eq!(before, after);
}

fn retagged(slug: &str, tags: &[&str]) -> ArticleFixture {
    let mut fixture = Fixtures::builtin()
        .articles
        .into_iter()
        .find(|a| a.slug() == slug)
        .expect("builtin article");
    fixture.tags = tags.iter().map(|t| t.to_string()).collect();
    fixture
}

#[test]
fn existing_article_keeps_its_tags_by_default() {
    let store = MemoryStore::new();
    seed(&store, SeedOptions::default());

    let fixture = retagged("typescript-best-practices", &["aws"]);
    store
        .ensure_article(&fixture, false)
        .expect("ensure should succeed");

    assert_eq!(
        store.article_tags("typescript-best-practices").expect("article exists"),
        vec!["javascript".to_string(), "typescript".to_string()]
    );
    assert_eq!(counts(&store).articles, 3);
}

#[test]
fn refresh_policy_replaces_existing_article_tags() {
    let store = MemoryStore::new();
    seed(&store, SeedOptions::default());

    let mut fixtures = Fixtures::builtin();
    fixtures.articles[2] = retagged("typescript-best-practices", &["typescript", "aws"]);
    let options = SeedOptions {
        article_tags: ArticleTagPolicy::Refresh,
        ..SeedOptions::default()
    };
    Seeder::new(&store, options)
        .run(&fixtures)
        .expect("refresh run should succeed");

    assert_eq!(
        store.article_tags("typescript-best-practices").expect("article exists"),
        vec!["aws".to_string(), "typescript".to_string()]
    );
    assert_eq!(counts(&store).articles, 3);
}

#[test]
fn missing_article_aborts_without_rollback() {
    let store = MemoryStore::new();
    let mut fixtures = Fixtures::builtin();
    fixtures.comments.insert(
        1,
        CommentFixture {
            body: "Where did this article go?".to_string(),
            author: "johndoe".to_string(),
            article: "no-such-article".to_string(),
        },
    );

    let err = Seeder::new(&store, SeedOptions::default())
        .run(&fixtures)
        .expect_err("unknown article must abort the run");
    match *err.kind() {
        ErrorKind::ArticleNotFound(ref slug) => assert_eq!(slug, "no-such-article"),
        ref other => panic!("unexpected error: {:?}", other),
    }

    let after = counts(&store);
    assert_eq!((after.users, after.tags, after.articles), (2, 5, 3));
    assert_eq!(after.comments, 1);
    assert_eq!(after.follows, 0);
    assert_eq!(after.favorites, 0);
}

#[test]
fn missing_tag_aborts_before_the_article_is_written() {
    let store = MemoryStore::new();
    let mut fixtures = Fixtures::builtin();
    fixtures.tags.retain(|t| t != "waf");

    let err = Seeder::new(&store, SeedOptions::default())
        .run(&fixtures)
        .expect_err("unknown tag must abort the run");
    match *err.kind() {
        ErrorKind::TagNotFound(ref name) => assert_eq!(name, "waf"),
        ref other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(counts(&store).articles, 0);
}

#[test]
fn follow_with_unknown_user_fails() {
    let store = MemoryStore::new();
    seed(&store, SeedOptions::default());

    let err = store
        .connect_follow("janedoe", "nobody")
        .expect_err("unknown followee must fail");
    match *err.kind() {
        ErrorKind::UserNotFound(ref name) => assert_eq!(name, "nobody"),
        ref other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn reused_email_under_new_username_is_rejected() {
    let store = MemoryStore::new();
    let mut fixtures = Fixtures::builtin();
    fixtures.users[1].email = "john@example.com".to_string();

    let err = Seeder::new(&store, SeedOptions::default())
        .run(&fixtures)
        .expect_err("duplicate email must abort the run");
    match *err.kind() {
        ErrorKind::UniqueViolation(ref constraint, _) => assert_eq!(constraint, "users.email"),
        ref other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(counts(&store).users, 1);
}

#[test]
fn invalid_fixtures_write_nothing() {
    let store = MemoryStore::new();
    let mut fixtures = Fixtures::builtin();
    fixtures.articles[0].title = "   ".to_string();

    let err = Seeder::new(&store, SeedOptions::default())
        .run(&fixtures)
        .expect_err("invalid fixtures must abort the run");
    match *err.kind() {
        ErrorKind::InvalidFixtures(ref errors) => {
            assert_eq!(errors.messages("articles[0].title").len(), 1)
        }
        ref other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(counts(&store), Counts::default());
}
