use crate::{
    api::{BoardsApi, CreateBoardRequest},
    domain::Board,
    error::{Result, TaskboardError},
    store::remote_message,
};
use std::sync::Arc;
use tracing::debug;

/// In-memory store of the user's boards plus the board currently open
pub struct BoardStore {
    api: Arc<dyn BoardsApi>,
    boards: Vec<Board>,
    selected: Option<Board>,
    is_loading: bool,
    error: Option<String>,
}

impl BoardStore {
    pub fn new(api: Arc<dyn BoardsApi>) -> Self {
        Self {
            api,
            boards: Vec::new(),
            selected: None,
            is_loading: false,
            error: None,
        }
    }

    /// Replaces the board list with the server's
    pub async fn load(&mut self) -> Result<()> {
        self.is_loading = true;
        self.error = None;

        match self.api.list_boards().await {
            Ok(boards) => {
                debug!(count = boards.len(), "loaded boards");
                self.boards = boards;
                self.is_loading = false;
                Ok(())
            }
            Err(err) => {
                let message = remote_message(&err);
                self.record_failure(&message);
                Err(TaskboardError::Fetch(message))
            }
        }
    }

    /// Creates a board and appends the server's canonical record
    pub async fn create(&mut self, title: String, description: Option<String>) -> Result<Board> {
        self.is_loading = true;
        self.error = None;

        let request = CreateBoardRequest { title, description };
        match self.api.create_board(&request).await {
            Ok(board) => {
                self.boards.push(board.clone());
                self.is_loading = false;
                Ok(board)
            }
            Err(err) => {
                let message = remote_message(&err);
                self.record_failure(&message);
                Err(TaskboardError::Create(message))
            }
        }
    }

    /// Fetches a single board without storing it
    pub async fn fetch(&mut self, board_id: &str) -> Result<Board> {
        self.is_loading = true;
        self.error = None;

        match self.api.get_board(board_id).await {
            Ok(board) => {
                self.is_loading = false;
                Ok(board)
            }
            Err(err) => {
                let message = remote_message(&err);
                self.record_failure(&message);
                Err(TaskboardError::Fetch(message))
            }
        }
    }

    /// Deletes a board remotely, removes it locally, and clears a matching
    /// selection
    pub async fn delete(&mut self, board_id: &str) -> Result<()> {
        self.is_loading = true;
        self.error = None;

        match self.api.delete_board(board_id).await {
            Ok(()) => {
                self.boards.retain(|b| b.id != board_id);
                if self.selected.as_ref().is_some_and(|b| b.id == board_id) {
                    self.selected = None;
                }
                self.is_loading = false;
                Ok(())
            }
            Err(err) => {
                let message = remote_message(&err);
                self.record_failure(&message);
                Err(TaskboardError::Delete(message))
            }
        }
    }

    pub fn select(&mut self, board: Option<Board>) {
        self.selected = board;
    }

    pub fn selected(&self) -> Option<&Board> {
        self.selected.as_ref()
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn record_failure(&mut self, message: &str) {
        self.is_loading = false;
        self.error = Some(message.to_string());
    }
}
