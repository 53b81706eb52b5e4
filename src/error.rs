use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskboardError>;

#[derive(Debug, Error)]
pub enum TaskboardError {
    #[error("Failed to fetch: {0}")]
    Fetch(String),

    #[error("Failed to create: {0}")]
    Create(String),

    #[error("Failed to update: {0}")]
    Update(String),

    #[error("Failed to delete: {0}")]
    Delete(String),

    #[error("Failed to reorder: {0}")]
    Reorder(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
