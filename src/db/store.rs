use article::{Article, ArticleTag, NewArticle, NewTag, Tag};
use chrono::Utc;
use comment::{Comment, NewComment};
use config::Config;
use db::schema::{article_tags, articles, comments, favorites, follows, tags, users};
use db::{init_pool, run_migrations, DbConnection, Pool};
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::{delete, insert_into, select};
use errors::*;
use fixtures::ArticleFixture;
use profile::{Favorite, Follow};
use store::{Counts, Store};
use users::{NewUser, User};

/// Postgres [`Store`]. Each call checks a connection out of the pool, so
/// concurrent callers never share one.
pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    pub fn new(pool: Pool) -> PgStore {
        PgStore { pool }
    }

    pub fn connect(config: &Config) -> Result<PgStore> {
        let pool = init_pool(config)?;
        info!("connected to database (pool size {})", config.pool_size);
        Ok(PgStore::new(pool))
    }

    pub fn run_migrations(&self) -> Result<()> {
        let connection = self.connection()?;
        run_migrations(&connection)?;
        info!("schema migrations applied");
        Ok(())
    }

    fn connection(&self) -> Result<DbConnection> {
        Ok(DbConnection(self.pool.get()?))
    }
}

impl Drop for PgStore {
    fn drop(&mut self) {
        let state = self.pool.state();
        debug!(
            "releasing database pool ({} connections, {} idle)",
            state.connections, state.idle_connections
        );
    }
}

fn user_id(connection: &PgConnection, name: &str) -> Result<i32> {
    users::table
        .filter(users::username.eq(name))
        .select(users::id)
        .first::<i32>(connection)
        .optional()?
        .ok_or_else(|| ErrorKind::UserNotFound(name.to_string()).into())
}

fn article_id(connection: &PgConnection, slug: &str) -> Result<i32> {
    articles::table
        .filter(articles::slug.eq(slug))
        .select(articles::id)
        .first::<i32>(connection)
        .optional()?
        .ok_or_else(|| ErrorKind::ArticleNotFound(slug.to_string()).into())
}

fn tag_links(
    connection: &PgConnection,
    tag_names: &[String],
    article_id: i32,
) -> Result<Vec<ArticleTag>> {
    let mut links = Vec::with_capacity(tag_names.len());
    for name in tag_names {
        let tag_id = tags::table
            .filter(tags::name.eq(name))
            .select(tags::id)
            .first::<i32>(connection)
            .optional()?
            .ok_or_else(|| Error::from(ErrorKind::TagNotFound(name.clone())))?;
        links.push(ArticleTag { article_id, tag_id });
    }
    Ok(links)
}

fn link_tags(connection: &PgConnection, links: &[ArticleTag]) -> Result<()> {
    if links.is_empty() {
        return Ok(());
    }
    insert_into(article_tags::table)
        .values(links)
        .on_conflict_do_nothing()
        .execute(connection)?;
    Ok(())
}

// With the username conflict absorbed, the only unique key an insert can
// still hit is the email.
fn email_conflict(err: DieselError, email: &str) -> Error {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ErrorKind::UniqueViolation("users.email".to_string(), email.to_string()).into()
        }
        other => other.into(),
    }
}

impl Store for PgStore {
    fn ensure_user(&self, new_user: &NewUser) -> Result<User> {
        let connection = self.connection()?;
        let inserted = insert_into(users::table)
            .values(new_user)
            .on_conflict(users::username)
            .do_nothing()
            .execute(&*connection)
            .map_err(|e| email_conflict(e, new_user.email))?;
        if inserted == 0 {
            debug!("user {} already present", new_user.username);
        }
        let user = users::table
            .filter(users::username.eq(new_user.username))
            .first::<User>(&*connection)?;
        Ok(user)
    }

    fn ensure_tag(&self, name: &str) -> Result<Tag> {
        let connection = self.connection()?;
        insert_into(tags::table)
            .values(&NewTag { name })
            .on_conflict(tags::name)
            .do_nothing()
            .execute(&*connection)?;
        let tag = tags::table
            .filter(tags::name.eq(name))
            .first::<Tag>(&*connection)?;
        Ok(tag)
    }

    fn ensure_article(&self, fixture: &ArticleFixture, refresh_tags: bool) -> Result<Article> {
        let connection = self.connection()?;
        let slug = fixture.slug();
        connection.transaction::<_, Error, _>(|| {
            let existing = articles::table
                .filter(articles::slug.eq(&slug))
                .first::<Article>(&*connection)
                .optional()?;

            if let Some(article) = existing {
                if refresh_tags {
                    let links = tag_links(&connection, &fixture.tags, article.id)?;
                    delete(article_tags::table.filter(article_tags::article_id.eq(article.id)))
                        .execute(&*connection)?;
                    link_tags(&connection, &links)?;
                }
                return Ok(article);
            }

            let author_id = user_id(&connection, &fixture.author)?;
            let new_article = NewArticle {
                slug: &slug,
                title: &fixture.title,
                description: &fixture.description,
                body: &fixture.body,
                author_id,
                created_at: Utc::now().naive_utc(),
            };
            let article = insert_into(articles::table)
                .values(&new_article)
                .get_result::<Article>(&*connection)?;
            let links = tag_links(&connection, &fixture.tags, article.id)?;
            link_tags(&connection, &links)?;
            Ok(article)
        })
    }

    fn has_comment(&self, body: &str, author: &str, article_slug: &str) -> Result<bool> {
        let connection = self.connection()?;
        let author_id = user_id(&connection, author)?;
        let article_id = article_id(&connection, article_slug)?;
        let found = select(exists(
            comments::table
                .filter(comments::body.eq(body))
                .filter(comments::author_id.eq(author_id))
                .filter(comments::article_id.eq(article_id)),
        )).get_result::<bool>(&*connection)?;
        Ok(found)
    }

    fn add_comment(&self, body: &str, author: &str, article_slug: &str) -> Result<Comment> {
        let connection = self.connection()?;
        let new_comment = NewComment {
            body,
            author_id: user_id(&connection, author)?,
            article_id: article_id(&connection, article_slug)?,
            created_at: Utc::now().naive_utc(),
        };
        let comment = insert_into(comments::table)
            .values(&new_comment)
            .get_result::<Comment>(&*connection)?;
        Ok(comment)
    }

    fn connect_follow(&self, follower: &str, followee: &str) -> Result<()> {
        let connection = self.connection()?;
        let follow = Follow {
            follower_id: user_id(&connection, follower)?,
            followee_id: user_id(&connection, followee)?,
        };
        insert_into(follows::table)
            .values(&follow)
            .on_conflict((follows::follower_id, follows::followee_id))
            .do_nothing()
            .execute(&*connection)?;
        Ok(())
    }

    fn connect_favorite(&self, username: &str, article_slug: &str) -> Result<()> {
        let connection = self.connection()?;
        let favorite = Favorite {
            user_id: user_id(&connection, username)?,
            article_id: article_id(&connection, article_slug)?,
        };
        insert_into(favorites::table)
            .values(&favorite)
            .on_conflict((favorites::user_id, favorites::article_id))
            .do_nothing()
            .execute(&*connection)?;
        Ok(())
    }

    fn counts(&self) -> Result<Counts> {
        let connection = self.connection()?;
        Ok(Counts {
            users: users::table.count().get_result(&*connection)?,
            tags: tags::table.count().get_result(&*connection)?,
            articles: articles::table.count().get_result(&*connection)?,
            comments: comments::table.count().get_result(&*connection)?,
            follows: follows::table.count().get_result(&*connection)?,
            favorites: favorites::table.count().get_result(&*connection)?,
        })
    }
}
