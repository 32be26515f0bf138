use chrono::NaiveDateTime;
use db::schema::comments;
use fixtures::CommentFixture;
use types::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Queryable)]
pub struct Comment {
    pub id: i32,
    pub body: String,
    pub author_id: i32,
    pub article_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[table_name = "comments"]
pub struct NewComment<'a> {
    pub body: &'a str,
    pub author_id: i32,
    pub article_id: i32,
    pub created_at: NaiveDateTime,
}

impl Validate for CommentFixture {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.body.trim().is_empty() {
            Err(ValidationError::from("body", "empty body"))
        } else {
            Ok(())
        }
    }
}
