use serde::Serialize;

use crate::domain::post::Post;

pub const MIN_TITLE_LEN: usize = 3;
pub const MIN_CONTENT_LEN: usize = 10;
pub const MIN_AUTHOR_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Checks a complete post record, collecting every violated field rather than stopping at the first.
pub fn validate_post(post: Post) -> Result<Post, Vec<FieldViolation>> {
    let mut violations = Vec::new();

    if post.title.chars().count() < MIN_TITLE_LEN {
        violations.push(FieldViolation::new(
            "title",
            format!("Title must be at least {} characters", MIN_TITLE_LEN),
        ));
    }
    if post.content.chars().count() < MIN_CONTENT_LEN {
        violations.push(FieldViolation::new(
            "content",
            format!("Content must be at least {} characters", MIN_CONTENT_LEN),
        ));
    }
    if post.author.chars().count() < MIN_AUTHOR_LEN {
        violations.push(FieldViolation::new(
            "author",
            format!("Author name must be at least {} characters", MIN_AUTHOR_LEN),
        ));
    }

    if violations.is_empty() {
        Ok(post)
    } else {
        Err(violations)
    }
}

pub fn validate_comment(author: &str, content: &str) -> Result<(), Vec<FieldViolation>> {
    let mut violations = Vec::new();

    if author.trim().is_empty() {
        violations.push(FieldViolation::new("author", "Author is required"));
    }
    if content.trim().is_empty() {
        violations.push(FieldViolation::new("content", "Content is required"));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
