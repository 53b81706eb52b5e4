//! # Taskboard Core
//!
//! Client-side state management for a kanban task board backed by a REST
//! API.
//!
//! This crate provides the in-memory stores, domain types, and API
//! bindings a board client needs, without any dependency on a specific UI
//! implementation. The centerpiece is [`TaskStore`], which keeps an
//! ordered, position-ranked task collection consistent through
//! drag-and-drop moves: mutations apply optimistically, persist through
//! the [`api`] traits, and roll back to a full-collection snapshot when
//! the backend rejects them.

pub mod api;
pub mod domain;
pub mod error;
pub mod store;

// Re-export commonly used types
pub use api::{
    rest::RestClient, BoardsApi, ColumnsApi, CreateBoardRequest, CreateColumnRequest,
    CreateTaskRequest, TasksApi, UpdateColumnRequest, UpdateTaskRequest,
};
pub use domain::{Board, Column, Task, TaskStatus};
pub use error::{Result, TaskboardError};
pub use store::{BoardStore, ColumnStore, TaskStore};
