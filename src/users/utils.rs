use regex::Regex;
use types::{Validate, ValidationError};
use fixtures::UserFixture;

lazy_static!{
    static ref EMAIL_RE: Regex = {
        let pattern = r"\A[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\z";
        Regex::new(pattern).unwrap()
    };
}

pub fn validate_email_re(email: &str) -> Result<(), ValidationError> {
    if !EMAIL_RE.is_match(email) {
        Err(ValidationError::from(
            "email",
            format!("Invalid email: {}", email),
        ))
    } else {
        Ok(())
    }
}

pub fn validate_username_re(username: &str) -> Result<(), ValidationError> {
    if username.trim().len() < 3 {
        Err(ValidationError::from(
            "username",
            format!("username too short: {}", username),
        ))
    } else {
        Ok(())
    }
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < 5 {
        Err(ValidationError::from("password", "Password too short"))
    } else {
        Ok(())
    }
}

impl Validate for UserFixture {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::default();
        for check in vec![
            validate_username_re(&self.username),
            validate_email_re(&self.email),
            validate_password(&self.password),
        ] {
            if let Err(e) = check {
                errors.merge(e);
            }
        }
        errors.into_result()
    }
}
