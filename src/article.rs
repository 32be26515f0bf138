use chrono::NaiveDateTime;
use db::schema::{article_tags, articles, tags};
use fixtures::ArticleFixture;
use slug::slugify;
use types::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Queryable)]
pub struct Article {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub author_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable)]
#[table_name = "articles"]
pub struct NewArticle<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub body: &'a str,
    pub author_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Queryable)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Insertable)]
#[table_name = "tags"]
pub struct NewTag<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Queryable, Insertable)]
#[table_name = "article_tags"]
pub struct ArticleTag {
    pub article_id: i32,
    pub tag_id: i32,
}

impl ArticleFixture {
    /// The explicit slug, or one derived from the title.
    pub fn slug(&self) -> String {
        match self.slug {
            Some(ref slug) => slug.clone(),
            None => slugify(&self.title),
        }
    }
}

impl Validate for ArticleFixture {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut error = ValidationError::default();
        if self.body.trim().len() == 0 {
            error.add_error("body", "empty body");
        }

        if self.title.trim().len() == 0 {
            error.add_error("title", "empty title");
        }

        if self.description.trim().len() == 0 {
            error.add_error("description", "empty description");
        }

        let slug = self.slug();
        if slug.is_empty() || slugify(&slug) != slug {
            error.add_error("slug", format!("malformed slug: {}", slug));
        }

        if self.tags.iter().any(|tag| tag.trim().is_empty()) {
            error.add_error("tagList", "empty tag name");
        }

        error.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(slug: Option<&str>, title: &str) -> ArticleFixture {
        ArticleFixture {
            slug: slug.map(|s| s.to_string()),
            title: title.to_string(),
            description: "desc".to_string(),
            body: "body".to_string(),
            author: "johndoe".to_string(),
            tags: vec!["aws".to_string()],
        }
    }

    #[test]
    fn slug_is_derived_from_title_when_missing() {
        assert_eq!(
            fixture(None, "Introduction to AWS WAF").slug(),
            "introduction-to-aws-waf"
        );
        assert_eq!(fixture(Some("custom-slug"), "Whatever").slug(), "custom-slug");
    }

    #[test]
    fn validate_rejects_blank_fields_and_bad_slug() {
        let mut article = fixture(Some("Not A Slug"), " ");
        article.body = String::new();
        article.tags.push("  ".to_string());

        let errors = article.validate().unwrap_err();
        assert_eq!(errors.messages("title"), &["empty title".to_string()]);
        assert_eq!(errors.messages("body"), &["empty body".to_string()]);
        assert_eq!(errors.messages("slug").len(), 1);
        assert_eq!(errors.messages("tagList").len(), 1);
        assert!(errors.messages("description").is_empty());
    }
}
