use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A kanban board column
///
/// `position` is a zero-based rank unique within the owning board. Column
/// ordering follows the same position pattern as tasks but in a single
/// dimension, with no status axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
    pub position: u32,
    pub board_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
