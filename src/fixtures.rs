//! The sample dataset the loader writes.
//!
//! [`Fixtures::builtin`] is the stock blog: two authors, five tags, three
//! articles and a handful of comments, follows and favorites. A JSON file
//! with the same shape can stand in for it.

use errors::*;
use serde_json;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use types::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFixture {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleFixture {
    #[serde(default)]
    pub slug: Option<String>,
    pub title: String,
    pub description: String,
    pub body: String,
    pub author: String,
    #[serde(default, rename = "tagList")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentFixture {
    pub body: String,
    pub author: String,
    pub article: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowFixture {
    pub follower: String,
    pub followee: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteFixture {
    pub username: String,
    pub articles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixtures {
    pub users: Vec<UserFixture>,
    pub tags: Vec<String>,
    pub articles: Vec<ArticleFixture>,
    pub comments: Vec<CommentFixture>,
    pub follows: Vec<FollowFixture>,
    pub favorites: Vec<FavoriteFixture>,
}

impl Fixtures {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Fixtures> {
        let path = path.as_ref();
        let file = File::open(path)
            .chain_err(|| format!("failed to open fixtures `{}`", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .chain_err(|| format!("failed to parse fixtures `{}`", path.display()))
    }

    /// The file at `path`, or the built-in dataset, validated. Runs before
    /// any connection is opened so bad fixtures never reach the database.
    pub fn load(path: Option<&Path>) -> Result<Fixtures> {
        let fixtures = match path {
            Some(path) => {
                info!("loading fixtures from {}", path.display());
                Fixtures::from_path(path)?
            }
            None => Fixtures::builtin(),
        };
        fixtures.validate()?;
        Ok(fixtures)
    }

    /// Checks field shapes only. References between fixtures are resolved
    /// by the store when they are used.
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationError::default();
        for (i, user) in self.users.iter().enumerate() {
            if let Err(e) = user.validate() {
                errors.merge(e.nested(&format!("users[{}]", i)));
            }
        }
        for (i, tag) in self.tags.iter().enumerate() {
            if tag.trim().is_empty() {
                errors.add_error(format!("tags[{}]", i), "empty tag name");
            }
        }
        for (i, article) in self.articles.iter().enumerate() {
            if let Err(e) = article.validate() {
                errors.merge(e.nested(&format!("articles[{}]", i)));
            }
        }
        for (i, comment) in self.comments.iter().enumerate() {
            if let Err(e) = comment.validate() {
                errors.merge(e.nested(&format!("comments[{}]", i)));
            }
        }

        if errors.empty() {
            Ok(())
        } else {
            Err(ErrorKind::InvalidFixtures(errors).into())
        }
    }

    pub fn builtin() -> Fixtures {
        Fixtures {
            users: vec![
                UserFixture {
                    username: "johndoe".to_string(),
                    email: "john@example.com".to_string(),
                    password: "password123".to_string(),
                    bio: Some("I am a software developer interested in web technologies.".to_string()),
                    image: Some("https://i.pravatar.cc/200?u=johndoe".to_string()),
                },
                UserFixture {
                    username: "janedoe".to_string(),
                    email: "jane@example.com".to_string(),
                    password: "password123".to_string(),
                    bio: Some("Full-stack developer with a passion for UI/UX.".to_string()),
                    image: Some("https://i.pravatar.cc/200?u=janedoe".to_string()),
                },
            ],
            tags: strings(&["javascript", "typescript", "aws", "web-security", "waf"]),
            articles: vec![
                ArticleFixture {
                    slug: Some("introduction-to-aws-waf".to_string()),
                    title: "Introduction to AWS WAF".to_string(),
                    description: "Learn the basics of AWS Web Application Firewall".to_string(),
                    body: AWS_WAF_INTRO_BODY.to_string(),
                    author: "johndoe".to_string(),
                    tags: strings(&["aws", "web-security", "waf"]),
                },
                ArticleFixture {
                    slug: Some("implementing-aws-waf-with-cloudfront".to_string()),
                    title: "Implementing AWS WAF with CloudFront".to_string(),
                    description: "A step-by-step guide to implementing AWS WAF with CloudFront"
                        .to_string(),
                    body: AWS_WAF_CLOUDFRONT_BODY.to_string(),
                    author: "johndoe".to_string(),
                    tags: strings(&["aws", "web-security", "waf"]),
                },
                ArticleFixture {
                    slug: Some("typescript-best-practices".to_string()),
                    title: "TypeScript Best Practices".to_string(),
                    description: "Learn the best practices for TypeScript development".to_string(),
                    body: TYPESCRIPT_BODY.to_string(),
                    author: "janedoe".to_string(),
                    tags: strings(&["javascript", "typescript"]),
                },
            ],
            comments: vec![
                CommentFixture {
                    body: "Great introduction to AWS WAF! This will be very helpful for my upcoming project.".to_string(),
                    author: "janedoe".to_string(),
                    article: "introduction-to-aws-waf".to_string(),
                },
                CommentFixture {
                    body: "Thanks for the detailed guide on implementing WAF with CloudFront. I was able to follow along and set it up for my application.".to_string(),
                    author: "janedoe".to_string(),
                    article: "implementing-aws-waf-with-cloudfront".to_string(),
                },
                CommentFixture {
                    body: "I appreciate the TypeScript best practices. The section on generics was particularly helpful.".to_string(),
                    author: "johndoe".to_string(),
                    article: "typescript-best-practices".to_string(),
                },
            ],
            follows: vec![FollowFixture {
                follower: "janedoe".to_string(),
                followee: "johndoe".to_string(),
            }],
            favorites: vec![
                FavoriteFixture {
                    username: "janedoe".to_string(),
                    articles: strings(&[
                        "introduction-to-aws-waf",
                        "implementing-aws-waf-with-cloudfront",
                    ]),
                },
                FavoriteFixture {
                    username: "johndoe".to_string(),
                    articles: strings(&["typescript-best-practices"]),
                },
            ],
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

static AWS_WAF_INTRO_BODY: &str = "AWS WAF (Web Application Firewall) is a web application firewall service that helps protect your web applications from common web exploits that could affect application availability, compromise security, or consume excessive resources.

AWS WAF gives you control over how traffic reaches your applications by enabling you to create security rules that block common attack patterns, such as SQL injection or cross-site scripting, and rules that filter out specific traffic patterns you define.

In this article, we'll explore the basics of AWS WAF and how it can help secure your web applications.";

static AWS_WAF_CLOUDFRONT_BODY: &str = "CloudFront is Amazon's Content Delivery Network (CDN) that securely delivers data, videos, applications, and APIs to customers globally with low latency and high transfer speeds. When combined with AWS WAF, it provides an additional layer of security for your web applications.

In this tutorial, we'll walk through the process of implementing AWS WAF with CloudFront to protect your web applications from common security threats.

We'll cover:
1. Setting up a CloudFront distribution
2. Creating AWS WAF rules
3. Associating the WAF WebACL with CloudFront
4. Testing the configuration";

static TYPESCRIPT_BODY: &str = "TypeScript has become increasingly popular in the JavaScript ecosystem, offering strong typing and object-oriented features that make code more maintainable and less prone to runtime errors.

In this article, we'll explore some best practices for TypeScript development that can help you write cleaner, more efficient code.

Topics covered include:
- Type annotations and inference
- Interface vs Type aliases
- Generics
- Utility types
- Error handling
- Async/await patterns";
