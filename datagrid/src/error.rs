use alloc::string::String;

use crate::EditPhase;

/// Errors returned by grid operations.
///
/// `InvalidRange` is a caller contract violation. `ConcurrentEdit` and `InvalidState` leave the
/// existing state untouched, so callers may ignore them after logging.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("invalid window range: start {start} is after end {end} (total_size={total_size})")]
    InvalidRange {
        start: usize,
        end: usize,
        total_size: usize,
    },
    #[error("another cell is already being edited")]
    ConcurrentEdit,
    #[error("row key is not in the current collection")]
    UnknownRow,
    #[error("`{operation}` is not allowed while the edit transaction is {phase}")]
    InvalidState {
        operation: &'static str,
        phase: EditPhase,
    },
}

/// A validation or persistence failure reported by the external commit handler.
///
/// Stored in the edit snapshot rather than propagated, so the UI can render it next to the cell.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("commit rejected: {message}")]
pub struct CommitRejected {
    pub message: String,
}

impl CommitRejected {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
