use thiserror::Error;
use uuid::Uuid;

use crate::domain::validation::FieldViolation;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl StoreError {
    pub fn post_not_found(id: Uuid) -> Self {
        Self::NotFound { entity: "post", id }
    }

    pub fn comment_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity: "comment",
            id,
        }
    }
}
