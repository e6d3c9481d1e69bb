use thiserror::Error;

use super::todo::TodoId;

#[derive(Error, Debug)]
pub enum TodoError {
    #[error("Validation error: {message}")]
    Validation { message: String },
    #[error("Todo with id {id} not found")]
    NotFound { id: TodoId },
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl TodoError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }
}

pub type TodoResult<T> = Result<T, TodoError>;
