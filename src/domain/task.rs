use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a task on the kanban board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Todo => write!(f, "To Do"),
            Self::InProgress => write!(f, "In Progress"),
            Self::Done => write!(f, "Done"),
        }
    }
}

impl TaskStatus {
    /// Derives the intended status from a column's title.
    ///
    /// Columns carry no explicit status field, so the presentation layer
    /// maps the title's semantic label to a status before issuing a move:
    /// "PROGRESS"/"DOING" means in progress, "DONE"/"COMPLETE" means done,
    /// anything else is treated as to-do.
    pub fn from_column_title(title: &str) -> Self {
        let upper = title.to_uppercase();
        if upper.contains("PROGRESS") || upper.contains("DOING") {
            Self::InProgress
        } else if upper.contains("DONE") || upper.contains("COMPLETE") {
            Self::Done
        } else {
            Self::Todo
        }
    }
}

/// A kanban task card
///
/// `position` is a zero-based rank within the set of tasks sharing the same
/// `column_id`. Positions are expected to be dense and unique per column
/// once mutations settle; a single-card move can leave them temporarily
/// non-dense until the next full reorder or reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub column_id: String,
    pub board_id: String,
    pub position: u32,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Sets the title
    pub fn set_title(&mut self, title: String) {
        self.title = title;
        self.updated_at = Utc::now();
    }

    /// Sets the description
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.updated_at = Utc::now();
    }

    /// Relocates the task to a column slot with its new status.
    ///
    /// `board_id` never changes through relocation; only the column,
    /// position, and status do.
    pub fn relocate(&mut self, column_id: String, position: u32, status: TaskStatus) {
        self.column_id = column_id;
        self.position = position;
        self.status = status;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        let now = Utc::now();
        Task {
            id: "task1".to_string(),
            title: "Test".to_string(),
            description: None,
            status: TaskStatus::Todo,
            column_id: "col1".to_string(),
            board_id: "board1".to_string(),
            position: 0,
            created_by: "user1".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::Todo).unwrap(),
            "\"TODO\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Done).unwrap(),
            "\"DONE\""
        );
    }

    #[test]
    fn test_status_from_column_title() {
        assert_eq!(TaskStatus::from_column_title("To Do"), TaskStatus::Todo);
        assert_eq!(TaskStatus::from_column_title("Backlog"), TaskStatus::Todo);
        assert_eq!(
            TaskStatus::from_column_title("In Progress"),
            TaskStatus::InProgress
        );
        assert_eq!(
            TaskStatus::from_column_title("doing"),
            TaskStatus::InProgress
        );
        assert_eq!(TaskStatus::from_column_title("Done"), TaskStatus::Done);
        assert_eq!(
            TaskStatus::from_column_title("Completed"),
            TaskStatus::Done
        );
    }

    #[test]
    fn test_relocate_changes_only_column_position_status() {
        let mut task = sample_task();
        task.relocate("col2".to_string(), 3, TaskStatus::Done);

        assert_eq!(task.column_id, "col2");
        assert_eq!(task.position, 3);
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.board_id, "board1");
    }

    #[test]
    fn test_set_title_updates_updated_at() {
        let mut task = sample_task();
        let initial_updated_at = task.updated_at;

        std::thread::sleep(std::time::Duration::from_millis(10));
        task.set_title("New Title".to_string());

        assert!(task.updated_at > initial_updated_at);
    }

    #[test]
    fn test_task_deserialization_from_api_shape() {
        let json = r#"{
        "id": "t1",
        "title": "Wire up login",
        "description": null,
        "status": "IN_PROGRESS",
        "column_id": "c1",
        "board_id": "b1",
        "position": 2,
        "created_by": "u1",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-02T00:00:00Z"
    }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "t1");
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.position, 2);
        assert!(task.description.is_none());
    }

    #[test]
    fn test_task_serialization_without_description() {
        let task = sample_task();
        let json = serde_json::to_string(&task).unwrap();

        // Field omitted due to skip_serializing_if
        assert!(!json.contains("description"));
    }
}
