use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[serde(default)]
    pub bookmarked: bool,
}

/// Client-supplied fields for a new post. `id` and `date` are assigned on create.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub bookmarked: Option<bool>,
}

impl PostDraft {
    pub fn into_post(self, id: Uuid, date: OffsetDateTime) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            author: self.author,
            tags: self.tags,
            date,
            bookmarked: self.bookmarked.unwrap_or(false),
        }
    }
}

/// Partial update. Absent fields keep their stored value; `id` and `date` cannot be patched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub tags: Option<Vec<String>>,
    pub bookmarked: Option<bool>,
}

impl PostPatch {
    pub fn apply(self, post: &Post) -> Post {
        Post {
            id: post.id,
            title: self.title.unwrap_or_else(|| post.title.clone()),
            content: self.content.unwrap_or_else(|| post.content.clone()),
            author: self.author.unwrap_or_else(|| post.author.clone()),
            tags: self.tags.unwrap_or_else(|| post.tags.clone()),
            date: post.date,
            bookmarked: self.bookmarked.unwrap_or(post.bookmarked),
        }
    }
}
