pub mod comments;
pub mod error;
pub mod export;
pub mod posts;
