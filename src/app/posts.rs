use time::OffsetDateTime;
use uuid::Uuid;

use crate::app::error::StoreError;
use crate::domain::comment::Comment;
use crate::domain::post::{Post, PostDraft, PostPatch};
use crate::domain::validation::validate_post;
use crate::infra::storage::JsonCollection;

#[derive(Clone)]
pub struct PostService {
    posts: JsonCollection<Post>,
    comments: JsonCollection<Comment>,
    page_size: usize,
}

impl PostService {
    pub fn new(
        posts: JsonCollection<Post>,
        comments: JsonCollection<Comment>,
        page_size: usize,
    ) -> Self {
        Self {
            posts,
            comments,
            page_size,
        }
    }

    /// Returns one page of posts, newest first. Pages are 1-based.
    pub async fn list_page(&self, page: usize) -> Result<Vec<Post>, StoreError> {
        let mut posts = self.posts.read().await?;
        // Stable: posts sharing a timestamp keep their stored order.
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        let start = page.saturating_sub(1).saturating_mul(self.page_size);
        Ok(posts
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect())
    }

    /// Case-insensitive substring match on titles. An empty query yields the
    /// first page in stored order.
    pub async fn search(&self, query: &str) -> Result<Vec<Post>, StoreError> {
        let posts = self.posts.read().await?;

        if query.is_empty() {
            return Ok(posts.into_iter().take(self.page_size).collect());
        }

        let needle = query.to_lowercase();
        Ok(posts
            .into_iter()
            .filter(|post| post.title.to_lowercase().contains(&needle))
            .collect())
    }

    pub async fn get_post(&self, id: Uuid) -> Result<Post, StoreError> {
        self.posts
            .read()
            .await?
            .into_iter()
            .find(|post| post.id == id)
            .ok_or_else(|| StoreError::post_not_found(id))
    }

    pub async fn create_post(&self, draft: PostDraft) -> Result<Post, StoreError> {
        let post = draft.into_post(Uuid::new_v4(), OffsetDateTime::now_utc());
        let post = validate_post(post).map_err(StoreError::Validation)?;

        let created = self
            .posts
            .modify(|posts| {
                posts.push(post.clone());
                Ok::<_, StoreError>(post)
            })
            .await?;

        tracing::info!(post_id = %created.id, "post created");
        Ok(created)
    }

    /// Merges `patch` onto the stored post. The merged record must still pass validation.
    pub async fn update_post(&self, id: Uuid, patch: PostPatch) -> Result<Post, StoreError> {
        let updated = self
            .posts
            .modify(|posts| {
                let slot = posts
                    .iter_mut()
                    .find(|post| post.id == id)
                    .ok_or_else(|| StoreError::post_not_found(id))?;
                let merged = validate_post(patch.apply(slot)).map_err(StoreError::Validation)?;
                *slot = merged.clone();
                Ok::<_, StoreError>(merged)
            })
            .await?;

        tracing::info!(post_id = %id, "post updated");
        Ok(updated)
    }

    pub async fn toggle_bookmark(&self, id: Uuid) -> Result<Post, StoreError> {
        let updated = self
            .posts
            .modify(|posts| {
                let slot = posts
                    .iter_mut()
                    .find(|post| post.id == id)
                    .ok_or_else(|| StoreError::post_not_found(id))?;
                slot.bookmarked = !slot.bookmarked;
                Ok::<_, StoreError>(slot.clone())
            })
            .await?;

        tracing::info!(post_id = %id, bookmarked = updated.bookmarked, "bookmark toggled");
        Ok(updated)
    }

    /// Removes the post and every comment attached to it.
    ///
    /// Both files are loaded before anything is written, and comments are
    /// persisted first, so a failure never leaves comments whose post is gone.
    pub async fn delete_post(&self, id: Uuid) -> Result<Uuid, StoreError> {
        let posts = self.posts.lock().await;
        let comments = self.comments.lock().await;

        let mut stored_posts = posts.load().await?;
        let index = stored_posts
            .iter()
            .position(|post| post.id == id)
            .ok_or_else(|| StoreError::post_not_found(id))?;
        let mut stored_comments = comments.load().await?;

        stored_posts.remove(index);
        let before = stored_comments.len();
        stored_comments.retain(|comment| comment.post_id != id);
        let removed_comments = before - stored_comments.len();

        comments.persist(&stored_comments).await?;
        posts.persist(&stored_posts).await?;

        tracing::info!(post_id = %id, removed_comments, "post deleted");
        Ok(id)
    }
}
