//! The persistence seam the loader writes through.
//!
//! Every method is keyed by the natural keys the fixtures use (username,
//! tag name, slug) and resolves them to row ids itself. A reference to a
//! row that does not exist is an error, never an implicit insert.

use article::{Article, Tag};
use comment::Comment;
use errors::*;
use fixtures::ArticleFixture;
use users::{NewUser, User};

pub mod memory;

/// Row counts per entity, as currently held by a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub users: i64,
    pub tags: i64,
    pub articles: i64,
    pub comments: i64,
    pub follows: i64,
    pub favorites: i64,
}

pub trait Store: Sync {
    /// Inserts the user unless the username is taken; an existing row is
    /// returned unchanged.
    fn ensure_user(&self, user: &NewUser) -> Result<User>;

    fn ensure_tag(&self, name: &str) -> Result<Tag>;

    /// Inserts the article with its tag links unless the slug is taken.
    /// With `refresh_tags` an existing article gets its links replaced by
    /// `article.tags`; otherwise it is returned unchanged.
    fn ensure_article(&self, article: &ArticleFixture, refresh_tags: bool) -> Result<Article>;

    fn has_comment(&self, body: &str, author: &str, article_slug: &str) -> Result<bool>;

    fn add_comment(&self, body: &str, author: &str, article_slug: &str) -> Result<Comment>;

    fn connect_follow(&self, follower: &str, followee: &str) -> Result<()>;

    fn connect_favorite(&self, username: &str, article_slug: &str) -> Result<()>;

    fn counts(&self) -> Result<Counts>;
}
