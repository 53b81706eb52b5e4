use crate::{
    api::{ColumnsApi, CreateColumnRequest, UpdateColumnRequest},
    domain::Column,
    error::{Result, TaskboardError},
    store::remote_message,
};
use std::sync::Arc;
use tracing::debug;

/// In-memory store of a board's columns, kept sorted by position
///
/// Column mutations are not optimistic: renames and repositions are rare
/// enough that waiting for the canonical record is fine, so there is no
/// snapshot machinery here.
pub struct ColumnStore {
    api: Arc<dyn ColumnsApi>,
    columns: Vec<Column>,
    is_loading: bool,
    error: Option<String>,
}

impl ColumnStore {
    pub fn new(api: Arc<dyn ColumnsApi>) -> Self {
        Self {
            api,
            columns: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    /// Replaces the column set with the server's list for a board
    pub async fn load(&mut self, board_id: &str) -> Result<()> {
        self.is_loading = true;
        self.error = None;

        match self.api.list_board_columns(board_id).await {
            Ok(mut columns) => {
                debug!(board_id, count = columns.len(), "loaded board columns");
                columns.sort_by_key(|c| c.position);
                self.columns = columns;
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

    /// Creates a column and inserts the server's canonical record in
    /// position order
    pub async fn create(&mut self, request: CreateColumnRequest) -> Result<Column> {
        self.is_loading = true;
        self.error = None;

        match self.api.create_column(&request).await {
            Ok(column) => {
                self.columns.push(column.clone());
                self.columns.sort_by_key(|c| c.position);
                self.is_loading = false;
                Ok(column)
            }
            Err(err) => {
                let message = remote_message(&err);
                self.record_failure(&message);
                Err(TaskboardError::Create(message))
            }
        }
    }

    /// Renames or repositions a column, replacing the local record with
    /// the canonical copy and re-sorting
    pub async fn update(&mut self, column_id: &str, patch: UpdateColumnRequest) -> Result<Column> {
        self.is_loading = true;
        self.error = None;

        match self.api.update_column(column_id, &patch).await {
            Ok(column) => {
                if let Some(existing) = self.columns.iter_mut().find(|c| c.id == column_id) {
                    *existing = column.clone();
                }
                self.columns.sort_by_key(|c| c.position);
                self.is_loading = false;
                Ok(column)
            }
            Err(err) => {
                let message = remote_message(&err);
                self.record_failure(&message);
                Err(TaskboardError::Update(message))
            }
        }
    }

    /// Columns of a board, ascending by position
    pub fn columns_in_board(&self, board_id: &str) -> Vec<Column> {
        self.columns
            .iter()
            .filter(|c| c.board_id == board_id)
            .cloned()
            .collect()
    }

    pub fn get(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
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

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    };

    #[derive(Default)]
    struct MockApi {
        records: Mutex<Vec<Column>>,
        fail_all: AtomicBool,
    }

    #[async_trait]
    impl ColumnsApi for MockApi {
        async fn list_board_columns(&self, board_id: &str) -> Result<Vec<Column>> {
            if self.fail_all.load(Ordering::SeqCst) {
                return Err(TaskboardError::Api("network unreachable".to_string()));
            }
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.board_id == board_id)
                .cloned()
                .collect())
        }

        async fn create_column(&self, request: &CreateColumnRequest) -> Result<Column> {
            if self.fail_all.load(Ordering::SeqCst) {
                return Err(TaskboardError::Api("create rejected".to_string()));
            }
            let now = Utc::now();
            let column = Column {
                id: uuid::Uuid::new_v4().to_string(),
                title: request.title.clone(),
                position: request.position,
                board_id: request.board_id.clone(),
                created_at: now,
                updated_at: now,
            };
            self.records.lock().unwrap().push(column.clone());
            Ok(column)
        }

        async fn update_column(
            &self,
            column_id: &str,
            request: &UpdateColumnRequest,
        ) -> Result<Column> {
            if self.fail_all.load(Ordering::SeqCst) {
                return Err(TaskboardError::Api("update rejected".to_string()));
            }
            let mut records = self.records.lock().unwrap();
            let column = records
                .iter_mut()
                .find(|c| c.id == column_id)
                .ok_or_else(|| TaskboardError::Api("column not found".to_string()))?;
            if let Some(title) = &request.title {
                column.title = title.clone();
            }
            if let Some(position) = request.position {
                column.position = position;
            }
            column.updated_at = Utc::now();
            Ok(column.clone())
        }
    }

    fn column(id: &str, title: &str, position: u32) -> Column {
        let now = Utc::now();
        Column {
            id: id.to_string(),
            title: title.to_string(),
            position,
            board_id: "board1".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_load_sorts_by_position() {
        let api = Arc::new(MockApi::default());
        *api.records.lock().unwrap() = vec![
            column("c3", "Done", 2),
            column("c1", "To Do", 0),
            column("c2", "In Progress", 1),
        ];
        let mut store = ColumnStore::new(api);

        store.load("board1").await.unwrap();

        let columns = store.columns_in_board("board1");
        let titles: Vec<&str> = columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["To Do", "In Progress", "Done"]);
    }

    #[tokio::test]
    async fn test_load_failure_sets_error() {
        let api = Arc::new(MockApi::default());
        api.fail_all.store(true, Ordering::SeqCst);
        let mut store = ColumnStore::new(api);

        let err = store.load("board1").await.unwrap_err();

        assert!(matches!(err, TaskboardError::Fetch(_)));
        assert_eq!(store.error(), Some("network unreachable"));
    }

    #[tokio::test]
    async fn test_create_keeps_position_order() {
        let api = Arc::new(MockApi::default());
        *api.records.lock().unwrap() = vec![column("c1", "To Do", 0), column("c3", "Done", 2)];
        let mut store = ColumnStore::new(api);
        store.load("board1").await.unwrap();

        store
            .create(CreateColumnRequest {
                title: "In Progress".to_string(),
                position: 1,
                board_id: "board1".to_string(),
            })
            .await
            .unwrap();

        let positions: Vec<u32> = store
            .columns_in_board("board1")
            .iter()
            .map(|c| c.position)
            .collect();
        assert_eq!(positions, [0, 1, 2]);
    }

    #[tokio::test]
    async fn test_update_reposition_resorts() {
        let api = Arc::new(MockApi::default());
        *api.records.lock().unwrap() = vec![
            column("c1", "To Do", 0),
            column("c2", "In Progress", 1),
        ];
        let mut store = ColumnStore::new(api);
        store.load("board1").await.unwrap();

        store
            .update(
                "c1",
                UpdateColumnRequest {
                    position: Some(2),
                    ..UpdateColumnRequest::default()
                },
            )
            .await
            .unwrap();

        let columns = store.columns_in_board("board1");
        let ids: Vec<&str> = columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c2", "c1"]);
    }
}
