use time::OffsetDateTime;
use uuid::Uuid;

use crate::app::error::StoreError;
use crate::domain::comment::Comment;
use crate::domain::validation::validate_comment;
use crate::infra::storage::JsonCollection;

#[derive(Clone)]
pub struct CommentService {
    comments: JsonCollection<Comment>,
}

impl CommentService {
    pub fn new(comments: JsonCollection<Comment>) -> Self {
        Self { comments }
    }

    /// Comments on `post_id` in the order they were written.
    pub async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, StoreError> {
        Ok(self
            .comments
            .read()
            .await?
            .into_iter()
            .filter(|comment| comment.post_id == post_id)
            .collect())
    }

    pub async fn create_comment(
        &self,
        post_id: Uuid,
        author: String,
        content: String,
    ) -> Result<Comment, StoreError> {
        validate_comment(&author, &content).map_err(StoreError::Validation)?;

        let comment = Comment {
            id: Uuid::new_v4(),
            post_id,
            author,
            content,
            date: OffsetDateTime::now_utc(),
        };

        let created = self
            .comments
            .modify(|comments| {
                comments.push(comment.clone());
                Ok::<_, StoreError>(comment)
            })
            .await?;

        tracing::info!(comment_id = %created.id, post_id = %post_id, "comment created");
        Ok(created)
    }

    pub async fn delete_comment(&self, id: Uuid) -> Result<Uuid, StoreError> {
        self.comments
            .modify(|comments| {
                let index = comments
                    .iter()
                    .position(|comment| comment.id == id)
                    .ok_or_else(|| StoreError::comment_not_found(id))?;
                comments.remove(index);
                Ok::<_, StoreError>(())
            })
            .await?;

        tracing::info!(comment_id = %id, "comment deleted");
        Ok(id)
    }
}
