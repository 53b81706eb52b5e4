use crate::{
    api::{CreateTaskRequest, TasksApi, UpdateTaskRequest},
    domain::{Task, TaskStatus},
    error::{Result, TaskboardError},
    store::remote_message,
};
use futures::future::join_all;
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, warn};

/// In-memory store of the tasks for the board currently on screen
///
/// The store exclusively owns the task map; the presentation layer reads
/// derived views and issues commands but never mutates state directly.
/// Mutations that persist remotely are optimistic: the local change is
/// applied first, and on failure the whole collection is restored from a
/// snapshot taken before the change. Rolling back the full collection
/// rather than the single touched record keeps interleaved moves from
/// leaving the rest of the map matching neither the pre- nor post-update
/// server truth.
pub struct TaskStore {
    api: Arc<dyn TasksApi>,
    tasks: HashMap<String, Task>,
    is_loading: bool,
    error: Option<String>,
}

impl TaskStore {
    pub fn new(api: Arc<dyn TasksApi>) -> Self {
        Self {
            api,
            tasks: HashMap::new(),
            is_loading: false,
            error: None,
        }
    }

    /// Replaces the whole in-memory set with the server's list for a board.
    ///
    /// Last fetch wins; there are no merge semantics. On failure the prior
    /// state is left untouched.
    pub async fn load(&mut self, board_id: &str) -> Result<()> {
        self.is_loading = true;
        self.error = None;

        match self.api.list_board_tasks(board_id).await {
            Ok(tasks) => {
                debug!(board_id, count = tasks.len(), "loaded board tasks");
                self.tasks = tasks.into_iter().map(|t| (t.id.clone(), t)).collect();
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

    /// Creates a task and inserts the server's canonical record.
    ///
    /// Nothing is mutated locally until the request succeeds; the server
    /// is authoritative for the id and timestamps.
    pub async fn create(&mut self, request: CreateTaskRequest) -> Result<Task> {
        self.is_loading = true;
        self.error = None;

        match self.api.create_task(&request).await {
            Ok(task) => {
                self.tasks.insert(task.id.clone(), task.clone());
                self.is_loading = false;
                Ok(task)
            }
            Err(err) => {
                let message = remote_message(&err);
                self.record_failure(&message);
                Err(TaskboardError::Create(message))
            }
        }
    }

    /// Optimistically merges the patch into the local task, persists the
    /// changed fields, and replaces the local record with the server's
    /// canonical copy on success.
    ///
    /// The canonical copy, not just the patch, is taken back so any
    /// server-side derived changes are absorbed. On failure the entire
    /// collection is rolled back to the pre-merge snapshot.
    pub async fn update_fields(&mut self, task_id: &str, patch: UpdateTaskRequest) -> Result<Task> {
        if !self.tasks.contains_key(task_id) {
            return Err(TaskboardError::TaskNotFound(task_id.to_string()));
        }

        self.is_loading = true;
        self.error = None;
        let snapshot = self.tasks.clone();

        if let Some(task) = self.tasks.get_mut(task_id) {
            if let Some(title) = &patch.title {
                task.title = title.clone();
            }
            if let Some(description) = &patch.description {
                task.description = Some(description.clone());
            }
            if let Some(status) = patch.status {
                task.status = status;
            }
            if let Some(column_id) = &patch.column_id {
                task.column_id = column_id.clone();
            }
            if let Some(position) = patch.position {
                task.position = position;
            }
        }

        match self.api.update_task(task_id, &patch).await {
            Ok(task) => {
                self.tasks.insert(task.id.clone(), task.clone());
                self.is_loading = false;
                Ok(task)
            }
            Err(err) => {
                warn!(task_id, "task update rejected, rolling back");
                self.tasks = snapshot;
                let message = remote_message(&err);
                self.record_failure(&message);
                Err(TaskboardError::Update(message))
            }
        }
    }

    /// Deletes a task remotely, then removes it locally
    pub async fn delete(&mut self, task_id: &str) -> Result<()> {
        self.is_loading = true;
        self.error = None;

        match self.api.delete_task(task_id).await {
            Ok(()) => {
                self.tasks.remove(task_id);
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

    /// Relocates a single task to a column slot (a coarse drop, not a full
    /// column reorder).
    ///
    /// Peers in the source and destination columns are not renumbered, so
    /// positions may be non-dense or duplicated until a subsequent
    /// [`Self::reorder_column`] or [`Self::load`] settles them. On failure
    /// the full collection snapshot is restored.
    pub async fn move_task(
        &mut self,
        task_id: &str,
        column_id: &str,
        position: u32,
        status: TaskStatus,
    ) -> Result<()> {
        if !self.tasks.contains_key(task_id) {
            return Err(TaskboardError::TaskNotFound(task_id.to_string()));
        }

        let snapshot = self.tasks.clone();
        if let Some(task) = self.tasks.get_mut(task_id) {
            task.relocate(column_id.to_string(), position, status);
        }

        let request = UpdateTaskRequest::relocation(column_id.to_string(), position, status);
        match self.api.update_task(task_id, &request).await {
            Ok(_) => Ok(()),
            Err(err) => {
                warn!(task_id, column_id, "task move rejected, rolling back");
                self.tasks = snapshot;
                let message = remote_message(&err);
                self.error = Some(message.clone());
                Err(TaskboardError::Update(message))
            }
        }
    }

    /// Applies a column's full, final card order after a drag gesture.
    ///
    /// Every listed task gets `position = index` in sequence along with the
    /// target column and status, in one state update, so cross-column drops
    /// are expressed as the destination column's new complete order. Ids
    /// not present in the store are skipped. One persistence call is issued
    /// per task, in parallel; if any fails the whole collection rolls back
    /// to the pre-reorder snapshot and a single aggregated error is
    /// surfaced. Calls that already committed server-side are left as they
    /// are and get re-synced by the next [`Self::load`].
    pub async fn reorder_column(
        &mut self,
        ordered_ids: &[String],
        column_id: &str,
        board_id: &str,
        status: TaskStatus,
    ) -> Result<()> {
        debug!(
            board_id,
            column_id,
            count = ordered_ids.len(),
            "reordering column"
        );
        let snapshot = self.tasks.clone();

        for (index, task_id) in ordered_ids.iter().enumerate() {
            if let Some(task) = self.tasks.get_mut(task_id) {
                task.relocate(column_id.to_string(), index as u32, status);
            }
        }

        let api = Arc::clone(&self.api);
        let calls = ordered_ids.iter().enumerate().map(|(index, task_id)| {
            let api = Arc::clone(&api);
            let request =
                UpdateTaskRequest::relocation(column_id.to_string(), index as u32, status);
            async move {
                api.update_task(task_id, &request)
                    .await
                    .map_err(|err| format!("{task_id}: {}", remote_message(&err)))
            }
        });

        let failures: Vec<String> = join_all(calls)
            .await
            .into_iter()
            .filter_map(|result| result.err())
            .collect();

        if failures.is_empty() {
            // Every call succeeded: the optimistic state matches the
            // server, no re-fetch needed.
            Ok(())
        } else {
            warn!(
                column_id,
                failed = failures.len(),
                "column reorder partially rejected, rolling back"
            );
            self.tasks = snapshot;
            let message = failures.join("; ");
            self.error = Some(message.clone());
            Err(TaskboardError::Reorder(message))
        }
    }

    /// Tasks in a column, ascending by position.
    ///
    /// Recomputed from current state on every call. Ties on position (a
    /// transient state reachable via [`Self::move_task`]) are broken by id
    /// so repeated reads are deterministic absent mutation.
    pub fn tasks_in_column(&self, column_id: &str) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .values()
            .filter(|task| task.column_id == column_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
        tasks
    }

    /// All tasks on a board, in id order
    pub fn tasks_in_board(&self, board_id: &str) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .values()
            .filter(|task| task.board_id == board_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| a.id.cmp(&b.id));
        tasks
    }

    /// Tasks on a board with a given status, ascending by position
    pub fn tasks_by_status(&self, board_id: &str, status: TaskStatus) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .values()
            .filter(|task| task.board_id == board_id && task.status == status)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
        tasks
    }

    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.tasks.get(task_id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
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
