use crate::error::TaskboardError;

pub mod board_store;
pub mod column_store;
pub mod task_store;

pub use board_store::BoardStore;
pub use column_store::ColumnStore;
pub use task_store::TaskStore;

/// Extracts the user-facing message from a remote failure.
///
/// Envelope failures already carry the backend's message verbatim; other
/// failures (transport, decode) fall back to their display form.
pub(crate) fn remote_message(err: &TaskboardError) -> String {
    match err {
        TaskboardError::Api(message) => message.clone(),
        other => other.to_string(),
    }
}
