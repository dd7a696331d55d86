//! Error types for the character-generation engine.

use thiserror::Error;

/// Result type for chargen operations.
pub type ChargenResult<T> = Result<T, ChargenError>;

/// Errors that abort a single chargen transition.
///
/// None of these leave persisted state half-written: every transition runs in
/// memory and is committed in one write at the end.
#[derive(Debug, Error)]
pub enum ChargenError {
    /// A table row payload could not be decoded into a choice.
    #[error("invalid JSON in {table} result:\n{message}\n\nText was:\n{preview}")]
    Decode {
        /// Name of the table the row came from.
        table: String,
        /// What went wrong.
        message: String,
        /// The start of the raw payload (at most 500 characters).
        preview: String,
    },

    /// A table reference did not resolve.
    #[error("roll table not found: {0}")]
    TableNotFound(String),

    /// A table has no rows to draw from.
    #[error("roll table \"{0}\" has no results")]
    EmptyTable(String),

    /// The chosen card carries no rewards.
    #[error("no rewards defined for choice \"{0}\"")]
    NoRewards(String),

    /// Weighted selection produced nothing.
    #[error("no valid reward could be selected")]
    NoRewardSelected,

    /// The operation needs a run but the character has none.
    #[error("no character generation run in progress")]
    NoActiveRun,

    /// The run has already finished.
    #[error("character generation already finished")]
    RunFinished,

    /// Character store failure.
    #[error(transparent)]
    Store(#[from] lw_core::LwError),

    /// The persisted chargen state could not be read or written.
    #[error("corrupt chargen state: {0}")]
    State(#[from] serde_json::Error),
}
