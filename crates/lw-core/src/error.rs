use std::path::PathBuf;

/// Alias for `Result<T, LwError>`.
pub type LwResult<T> = Result<T, LwError>;

/// Errors raised at the character and table boundary.
#[derive(Debug, thiserror::Error)]
pub enum LwError {
    /// The host rejected an attribute or flag write.
    #[error("character update rejected: {0}")]
    UpdateRejected(String),

    /// A character or table file could not be read or written.
    #[error("i/o error on {path}: {source}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// A character or table document is not valid JSON for its type.
    #[error("invalid document: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Two tables in a library share the same id.
    #[error("duplicate table id: \"{0}\"")]
    DuplicateTable(String),
}
