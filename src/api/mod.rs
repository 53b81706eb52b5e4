use crate::{
    domain::{Board, Column, Task, TaskStatus},
    error::Result,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod rest;

/// Response envelope shared by every backend endpoint
///
/// Non-2xx responses and `success: false` bodies are both failures, with
/// `message` surfaced to the caller.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

/// Payload for POST /tasks
#[derive(Debug, Clone, Serialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub column_id: String,
    pub board_id: String,
    pub position: u32,
}

/// Payload for PATCH /tasks/{id}
///
/// Only the set fields are serialized, so a request carries exactly the
/// fields being changed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl UpdateTaskRequest {
    /// Builds the payload for a card relocation: column, position, status.
    pub fn relocation(column_id: String, position: u32, status: TaskStatus) -> Self {
        Self {
            column_id: Some(column_id),
            position: Some(position),
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Payload for POST /columns
#[derive(Debug, Clone, Serialize)]
pub struct CreateColumnRequest {
    pub title: String,
    pub position: u32,
    pub board_id: String,
}

/// Payload for PATCH /columns/{id}
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateColumnRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

/// Payload for POST /boards
#[derive(Debug, Clone, Serialize)]
pub struct CreateBoardRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Remote persistence for tasks
#[async_trait]
pub trait TasksApi: Send + Sync {
    /// Lists all tasks on a board
    async fn list_board_tasks(&self, board_id: &str) -> Result<Vec<Task>>;

    /// Creates a task, returning the canonical server record
    async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task>;

    /// Patches a task with the set fields, returning the canonical record
    async fn update_task(&self, task_id: &str, request: &UpdateTaskRequest) -> Result<Task>;

    /// Deletes a task
    async fn delete_task(&self, task_id: &str) -> Result<()>;
}

/// Remote persistence for columns
#[async_trait]
pub trait ColumnsApi: Send + Sync {
    /// Lists all columns on a board
    async fn list_board_columns(&self, board_id: &str) -> Result<Vec<Column>>;

    /// Creates a column, returning the canonical server record
    async fn create_column(&self, request: &CreateColumnRequest) -> Result<Column>;

    /// Renames or repositions a column, returning the canonical record
    async fn update_column(&self, column_id: &str, request: &UpdateColumnRequest)
        -> Result<Column>;
}

/// Remote persistence for boards
#[async_trait]
pub trait BoardsApi: Send + Sync {
    /// Lists the boards visible to the authenticated user
    async fn list_boards(&self) -> Result<Vec<Board>>;

    /// Creates a board, returning the canonical server record
    async fn create_board(&self, request: &CreateBoardRequest) -> Result<Board>;

    /// Fetches a single board by id
    async fn get_board(&self, board_id: &str) -> Result<Board>;

    /// Deletes a board
    async fn delete_board(&self, board_id: &str) -> Result<()>;
}
