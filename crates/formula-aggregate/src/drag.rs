use crate::classify::DisabledReason;

/// Why a column may not be picked up from the column menu.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DragRejected {
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("column {column} is disabled: {reason}")]
    Disabled {
        column: String,
        reason: DisabledReason,
    },
}
