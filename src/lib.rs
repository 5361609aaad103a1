pub mod app;
pub mod config;
pub mod domain;
pub mod http;
pub mod infra;

use crate::domain::comment::Comment;
use crate::domain::post::Post;
use crate::infra::storage::JsonCollection;

#[derive(Clone)]
pub struct AppState {
    pub posts: JsonCollection<Post>,
    pub comments: JsonCollection<Comment>,
    pub page_size: usize,
}

impl AppState {
    pub fn new(config: &config::AppConfig) -> Self {
        Self {
            posts: JsonCollection::new(config.posts_file()),
            comments: JsonCollection::new(config.comments_file()),
            page_size: config.page_size,
        }
    }

    /// Makes sure both collection files exist so the first request has something to load.
    pub async fn init_storage(&self) -> anyhow::Result<()> {
        self.posts.ensure_exists().await?;
        self.comments.ensure_exists().await?;
        Ok(())
    }
}
