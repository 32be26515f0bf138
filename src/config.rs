use dotenv::dotenv;
use errors::*;
use seed::{ArticleTagPolicy, CommentPolicy, SeedOptions};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_POOL_SIZE: u32 = 5;
const DEFAULT_CONCURRENCY: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub pool_size: u32,
    pub concurrency: usize,
    pub run_migrations: bool,
    pub comments: CommentPolicy,
    pub article_tags: ArticleTagPolicy,
    pub fixtures_path: Option<PathBuf>,
}

impl Config {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Config> {
        dotenv().ok();
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match lookup("DATABASE_URL") {
            Some(ref url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => bail!(ErrorKind::MissingConfig("DATABASE_URL".to_string())),
        };

        Ok(Config {
            database_url,
            pool_size: parse_at_least_one(&lookup, "SEED_POOL_SIZE", DEFAULT_POOL_SIZE)?,
            concurrency: parse_at_least_one(&lookup, "SEED_CONCURRENCY", DEFAULT_CONCURRENCY)?,
            run_migrations: parse_bool(&lookup, "SEED_RUN_MIGRATIONS", true)?,
            comments: parse_with(&lookup, "SEED_COMMENTS", CommentPolicy::Append)?,
            article_tags: parse_with(&lookup, "SEED_ARTICLE_TAGS", ArticleTagPolicy::Keep)?,
            fixtures_path: lookup("SEED_FIXTURES")
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn seed_options(&self) -> SeedOptions {
        SeedOptions {
            concurrency: self.concurrency,
            comments: self.comments,
            article_tags: self.article_tags,
        }
    }
}

fn invalid(key: &str, value: &str) -> Error {
    ErrorKind::InvalidConfig(key.to_string(), value.to_string()).into()
}

fn parse_with<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>().map_err(|_| invalid(key, &raw)),
        None => Ok(default),
    }
}

fn parse_at_least_one<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialOrd + From<u8>,
{
    let value = parse_with(lookup, key, default)?;
    if value < T::from(1) {
        Err(invalid(key, "0"))
    } else {
        Ok(value)
    }
}

fn parse_bool<F>(lookup: &F, key: &str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = match lookup(key) {
        Some(raw) => raw,
        None => return Ok(default),
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, &raw)),
    }
}
