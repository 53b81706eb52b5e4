use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A kanban board: container for columns and tasks
///
/// Boards have no internal ordering concerns; column and task ordering
/// live on the contained records themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
