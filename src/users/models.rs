use chrono::NaiveDateTime;
use crypto::pbkdf2::{pbkdf2_check, pbkdf2_simple};
use db::schema::users;
use errors::*;

/// PBKDF2-SHA256 iteration count used for every stored credential.
pub const PASSWORD_HASH_ROUNDS: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Queryable)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password: String,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub created_at: NaiveDateTime,
}

impl User {
    /// Salted one-way hash in rust-crypto's `$rpbkdf2$` format.
    pub fn make_password(password: &str) -> Result<String> {
        pbkdf2_simple(password, PASSWORD_HASH_ROUNDS).chain_err(|| ErrorKind::PasswordHash)
    }

    pub fn verify_password(&self, password_to_verify: &str) -> Result<bool> {
        pbkdf2_check(password_to_verify, &self.password).map_err(|_| ErrorKind::PasswordHash.into())
    }
}

#[derive(Debug, Insertable)]
#[table_name = "users"]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: String,
    pub bio: Option<&'a str>,
    pub image: Option<&'a str>,
    pub created_at: NaiveDateTime,
}
