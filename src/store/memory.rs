//! In-process [`Store`] backed by plain collections behind a mutex.
//!
//! Mirrors the Postgres constraints the loader relies on: unique
//! usernames, emails, tag names and slugs, and set semantics for
//! article tags, follows and favorites.

use article::{Article, ArticleTag, Tag};
use chrono::Utc;
use comment::Comment;
use errors::*;
use fixtures::ArticleFixture;
use profile::{Favorite, Follow};
use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};
use store::{Counts, Store};
use users::{NewUser, User};

#[derive(Debug, Default)]
struct Tables {
    next_id: i32,
    users: Vec<User>,
    tags: Vec<Tag>,
    articles: Vec<Article>,
    article_tags: BTreeSet<ArticleTag>,
    comments: Vec<Comment>,
    follows: BTreeSet<Follow>,
    favorites: BTreeSet<Favorite>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn user(&self, username: &str) -> Result<&User> {
        self.users
            .iter()
            .find(|u| u.username == username)
            .ok_or_else(|| ErrorKind::UserNotFound(username.to_string()).into())
    }

    fn tag(&self, name: &str) -> Result<&Tag> {
        self.tags
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| ErrorKind::TagNotFound(name.to_string()).into())
    }

    fn article(&self, slug: &str) -> Result<&Article> {
        self.articles
            .iter()
            .find(|a| a.slug == slug)
            .ok_or_else(|| ErrorKind::ArticleNotFound(slug.to_string()).into())
    }

    fn tag_links(&self, tag_names: &[String], article_id: i32) -> Result<Vec<ArticleTag>> {
        tag_names
            .iter()
            .map(|name| {
                self.tag(name).map(|tag| ArticleTag {
                    article_id,
                    tag_id: tag.id,
                })
            })
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    fn lock(&self) -> Result<MutexGuard<Tables>> {
        self.tables
            .lock()
            .map_err(|_| "memory store lock poisoned".into())
    }

    pub fn user(&self, username: &str) -> Result<User> {
        self.lock()?.user(username).map(|u| u.clone())
    }

    pub fn article(&self, slug: &str) -> Result<Article> {
        self.lock()?.article(slug).map(|a| a.clone())
    }

    /// Usernames `username` follows, sorted.
    pub fn following(&self, username: &str) -> Result<Vec<String>> {
        let tables = self.lock()?;
        let user_id = tables.user(username)?.id;
        let mut names: Vec<String> = tables
            .follows
            .iter()
            .filter(|f| f.follower_id == user_id)
            .filter_map(|f| tables.users.iter().find(|u| u.id == f.followee_id))
            .map(|u| u.username.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    /// Slugs `username` has favorited, sorted.
    pub fn favorites(&self, username: &str) -> Result<Vec<String>> {
        let tables = self.lock()?;
        let user_id = tables.user(username)?.id;
        let mut slugs: Vec<String> = tables
            .favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .filter_map(|f| tables.articles.iter().find(|a| a.id == f.article_id))
            .map(|a| a.slug.clone())
            .collect();
        slugs.sort();
        Ok(slugs)
    }

    /// Tag names linked to the article, sorted.
    pub fn article_tags(&self, slug: &str) -> Result<Vec<String>> {
        let tables = self.lock()?;
        let article_id = tables.article(slug)?.id;
        let mut names: Vec<String> = tables
            .article_tags
            .iter()
            .filter(|link| link.article_id == article_id)
            .filter_map(|link| tables.tags.iter().find(|t| t.id == link.tag_id))
            .map(|t| t.name.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    pub fn comments_on(&self, slug: &str) -> Result<Vec<Comment>> {
        let tables = self.lock()?;
        let article_id = tables.article(slug)?.id;
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.article_id == article_id)
            .cloned()
            .collect())
    }
}

impl Store for MemoryStore {
    fn ensure_user(&self, new_user: &NewUser) -> Result<User> {
        let mut tables = self.lock()?;
        if let Ok(existing) = tables.user(new_user.username) {
            return Ok(existing.clone());
        }
        if tables.users.iter().any(|u| u.email == new_user.email) {
            bail!(ErrorKind::UniqueViolation(
                "users.email".to_string(),
                new_user.email.to_string(),
            ));
        }

        let user = User {
            id: tables.next_id(),
            username: new_user.username.to_string(),
            email: new_user.email.to_string(),
            password: new_user.password.clone(),
            bio: new_user.bio.map(|s| s.to_string()),
            image: new_user.image.map(|s| s.to_string()),
            created_at: new_user.created_at,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    fn ensure_tag(&self, name: &str) -> Result<Tag> {
        let mut tables = self.lock()?;
        if let Ok(existing) = tables.tag(name) {
            return Ok(existing.clone());
        }
        let tag = Tag {
            id: tables.next_id(),
            name: name.to_string(),
        };
        tables.tags.push(tag.clone());
        Ok(tag)
    }

    fn ensure_article(&self, fixture: &ArticleFixture, refresh_tags: bool) -> Result<Article> {
        let mut tables = self.lock()?;
        let slug = fixture.slug();

        if let Ok(existing) = tables.article(&slug).map(|a| a.clone()) {
            if refresh_tags {
                let links = tables.tag_links(&fixture.tags, existing.id)?;
                tables.article_tags.retain(|link| link.article_id != existing.id);
                tables.article_tags.extend(links);
            }
            return Ok(existing);
        }

        let author_id = tables.user(&fixture.author)?.id;
        // Resolve every tag before the insert so a missing one leaves no row behind.
        let mut links = tables.tag_links(&fixture.tags, 0)?;
        let article = Article {
            id: tables.next_id(),
            slug,
            title: fixture.title.clone(),
            description: fixture.description.clone(),
            body: fixture.body.clone(),
            author_id,
            created_at: Utc::now().naive_utc(),
            updated_at: None,
        };
        for link in &mut links {
            link.article_id = article.id;
        }
        tables.articles.push(article.clone());
        tables.article_tags.extend(links);
        Ok(article)
    }

    fn has_comment(&self, body: &str, author: &str, article_slug: &str) -> Result<bool> {
        let tables = self.lock()?;
        let author_id = tables.user(author)?.id;
        let article_id = tables.article(article_slug)?.id;
        Ok(tables
            .comments
            .iter()
            .any(|c| c.body == body && c.author_id == author_id && c.article_id == article_id))
    }

    fn add_comment(&self, body: &str, author: &str, article_slug: &str) -> Result<Comment> {
        let mut tables = self.lock()?;
        let author_id = tables.user(author)?.id;
        let article_id = tables.article(article_slug)?.id;
        let comment = Comment {
            id: tables.next_id(),
            body: body.to_string(),
            author_id,
            article_id,
            created_at: Utc::now().naive_utc(),
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    fn connect_follow(&self, follower: &str, followee: &str) -> Result<()> {
        let mut tables = self.lock()?;
        let follow = Follow {
            follower_id: tables.user(follower)?.id,
            followee_id: tables.user(followee)?.id,
        };
        tables.follows.insert(follow);
        Ok(())
    }

    fn connect_favorite(&self, username: &str, article_slug: &str) -> Result<()> {
        let mut tables = self.lock()?;
        let favorite = Favorite {
            user_id: tables.user(username)?.id,
            article_id: tables.article(article_slug)?.id,
        };
        tables.favorites.insert(favorite);
        Ok(())
    }

    fn counts(&self) -> Result<Counts> {
        let tables = self.lock()?;
        Ok(Counts {
            users: tables.users.len() as i64,
            tags: tables.tags.len() as i64,
            articles: tables.articles.len() as i64,
            comments: tables.comments.len() as i64,
            follows: tables.follows.len() as i64,
            favorites: tables.favorites.len() as i64,
        })
    }
}
