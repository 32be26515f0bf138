//! The fixture loader.
//!
//! A run walks the dataset in dependency order: users, tags, articles,
//! comments, then follow and favorite edges. The first failing step aborts
//! the run and earlier writes stay in place. Users, tags and articles are
//! upserted by natural key; comments are appended unless
//! [`CommentPolicy::SkipExisting`] is chosen.

use chrono::Utc;
use errors::*;
use fixtures::{Fixtures, UserFixture};
use std::fmt;
use std::str::FromStr;
use std::thread;
use store::{Counts, Store};
use article::Tag;
use users::{NewUser, User};

/// What to do with a comment fixture that is already stored verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentPolicy {
    /// Insert every run, duplicating earlier comments.
    Append,
    /// Skip a comment with the same body, author and article.
    SkipExisting,
}

/// What to do with the tag links of an article whose slug already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleTagPolicy {
    /// Leave the stored links alone, even if the fixture lists other tags.
    Keep,
    /// Replace the stored links with the fixture's tags.
    Refresh,
}

impl FromStr for CommentPolicy {
    type Err = String;

    fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
        match s {
            "append" => Ok(CommentPolicy::Append),
            "skip-existing" => Ok(CommentPolicy::SkipExisting),
            other => Err(format!("unknown comment policy `{}`", other)),
        }
    }
}

impl FromStr for ArticleTagPolicy {
    type Err = String;

    fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
        match s {
            "keep" => Ok(ArticleTagPolicy::Keep),
            "refresh" => Ok(ArticleTagPolicy::Refresh),
            other => Err(format!("unknown article tag policy `{}`", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOptions {
    /// Upper bound on tag upserts in flight at once.
    pub concurrency: usize,
    pub comments: CommentPolicy,
    pub article_tags: ArticleTagPolicy,
}

impl Default for SeedOptions {
    fn default() -> SeedOptions {
        SeedOptions {
            concurrency: 5,
            comments: CommentPolicy::Append,
            article_tags: ArticleTagPolicy::Keep,
        }
    }
}

/// What one run touched, next to what the store holds afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeedReport {
    pub users: Vec<String>,
    pub tags: usize,
    pub articles: Vec<String>,
    pub comments_added: usize,
    pub comments_skipped: usize,
    pub follows: usize,
    pub favorites: usize,
    pub totals: Counts,
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} users, {} tags, {} articles, {} comments added ({} skipped), {} follows, {} favorites",
            self.users.len(),
            self.tags,
            self.articles.len(),
            self.comments_added,
            self.comments_skipped,
            self.follows,
            self.favorites
        )
    }
}

pub struct Seeder<'a, S: Store + 'a> {
    store: &'a S,
    options: SeedOptions,
}

impl<'a, S: Store + 'a> Seeder<'a, S> {
    pub fn new(store: &'a S, options: SeedOptions) -> Seeder<'a, S> {
        Seeder { store, options }
    }

    pub fn run(&self, fixtures: &Fixtures) -> Result<SeedReport> {
        info!("Start seeding...");
        fixtures.validate()?;
        let mut report = SeedReport::default();

        for fixture in &fixtures.users {
            let user = self.ensure_user(fixture)?;
            report.users.push(user.username);
        }
        info!("Created users: {}", report.users.join(", "));

        report.tags = self.ensure_tags(&fixtures.tags)?.len();
        info!("Created {} tags", report.tags);

        let refresh_tags = self.options.article_tags == ArticleTagPolicy::Refresh;
        for fixture in &fixtures.articles {
            let article = self.store.ensure_article(fixture, refresh_tags)?;
            report.articles.push(article.title);
        }
        info!("Created articles: {}", report.articles.join(", "));

        for comment in &fixtures.comments {
            if self.add_comment(&comment.body, &comment.author, &comment.article)? {
                report.comments_added += 1;
            } else {
                report.comments_skipped += 1;
            }
        }
        info!(
            "Created {} comments ({} skipped)",
            report.comments_added, report.comments_skipped
        );

        for follow in &fixtures.follows {
            self.store.connect_follow(&follow.follower, &follow.followee)?;
            debug!("{} follows {}", follow.follower, follow.followee);
            report.follows += 1;
        }
        for favorite in &fixtures.favorites {
            for slug in &favorite.articles {
                self.store.connect_favorite(&favorite.username, slug)?;
                debug!("{} favorited {}", favorite.username, slug);
                report.favorites += 1;
            }
        }
        info!(
            "Connected {} follows and {} favorites",
            report.follows, report.favorites
        );

        report.totals = self.store.counts()?;
        info!("Seeding completed successfully!");
        Ok(report)
    }

    /// Hashes the password before handing the row to the store. The hash is
    /// computed even when the user already exists.
    pub fn ensure_user(&self, fixture: &UserFixture) -> Result<User> {
        let new_user = NewUser {
            username: &fixture.username,
            email: &fixture.email,
            password: User::make_password(&fixture.password)?,
            bio: fixture.bio.as_ref().map(|s| s.as_str()),
            image: fixture.image.as_ref().map(|s| s.as_str()),
            created_at: Utc::now().naive_utc(),
        };
        self.store.ensure_user(&new_user)
    }

    /// Upserts tags on scoped worker threads, at most `concurrency` at a
    /// time. Returns only after every batch has been joined.
    pub fn ensure_tags(&self, names: &[String]) -> Result<Vec<Tag>> {
        let width = if self.options.concurrency == 0 { 1 } else { self.options.concurrency };
        let store = self.store;
        let mut tags = Vec::with_capacity(names.len());

        for batch in names.chunks(width) {
            let results: Vec<Result<Tag>> = thread::scope(|scope| {
                let workers: Vec<_> = batch
                    .iter()
                    .map(|name| scope.spawn(move || store.ensure_tag(name)))
                    .collect();
                workers
                    .into_iter()
                    .map(|worker| {
                        worker
                            .join()
                            .unwrap_or_else(|_| Err("tag worker panicked".into()))
                    })
                    .collect()
            });
            for result in results {
                tags.push(result?);
            }
        }
        Ok(tags)
    }

    /// Returns whether a row was inserted.
    pub fn add_comment(&self, body: &str, author: &str, article_slug: &str) -> Result<bool> {
        if self.options.comments == CommentPolicy::SkipExisting
            && self.store.has_comment(body, author, article_slug)?
        {
            debug!("comment by {} on {} already present", author, article_slug);
            return Ok(false);
        }
        self.store.add_comment(body, author, article_slug)?;
        Ok(true)
    }
}
