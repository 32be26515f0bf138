pub mod models;
mod utils;

pub use self::models::{NewUser, User, PASSWORD_HASH_ROUNDS};
pub use self::utils::{validate_email_re, validate_password, validate_username_re};
