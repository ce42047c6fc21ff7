//! Server error types

use axum::http::StatusCode;
use thiserror::Error;

/// Main server error type
#[derive(Debug, Error)]
pub enum ServerError {
    // ========== Not Found ==========
    /// User does not exist
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// Forum does not exist
    #[error("forum not found: {0}")]
    ForumNotFound(String),

    /// Thread does not exist (by slug or id)
    #[error("thread not found: {0}")]
    ThreadNotFound(String),

    /// Post does not exist
    #[error("post not found: {0}")]
    PostNotFound(i64),

    // ========== Conflict ==========
    /// Nickname or email already taken
    #[error("user conflict: {0}")]
    UserConflict(String),

    /// Forum slug already taken
    #[error("forum conflict: {0}")]
    ForumConflict(String),

    /// Thread slug already taken
    #[error("thread conflict: {0}")]
    ThreadConflict(String),

    /// Duplicate post id, or a non-empty batch that persisted nothing
    #[error("post conflict: {0}")]
    PostConflict(String),

    /// Parent post missing from the target thread, or owned by another thread
    #[error("invalid parent post: {0}")]
    ParentConflict(i64),

    // ========== Validation ==========
    /// Invalid argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // ========== Storage ==========
    /// Storage operation failed (NOT a missing row - those map to *NotFound)
    #[error("storage error: {0}")]
    Storage(StorageError),

    // ========== Server ==========
    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Storage-specific errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database connection failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Transaction failed
    #[error("transaction failed: {0}")]
    TransactionFailed(String),

    /// Schema migration failed
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// SQLite database error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Server result type alias
pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 404 Not Found
            ServerError::UserNotFound(_)
            | ServerError::ForumNotFound(_)
            | ServerError::ThreadNotFound(_)
            | ServerError::PostNotFound(_) => StatusCode::NOT_FOUND,

            // 409 Conflict
            ServerError::UserConflict(_)
            | ServerError::ForumConflict(_)
            | ServerError::ThreadConflict(_)
            | ServerError::PostConflict(_)
            | ServerError::ParentConflict(_) => StatusCode::CONFLICT,

            // 400 Bad Request
            ServerError::InvalidArgument(_) => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error
            ServerError::Storage(_) | ServerError::Internal(_) | ServerError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get error code for API response
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::UserNotFound(_) => "USER_NOT_FOUND",
            ServerError::ForumNotFound(_) => "FORUM_NOT_FOUND",
            ServerError::ThreadNotFound(_) => "THREAD_NOT_FOUND",
            ServerError::PostNotFound(_) => "POST_NOT_FOUND",
            ServerError::UserConflict(_) => "USER_CONFLICT",
            ServerError::ForumConflict(_) => "FORUM_CONFLICT",
            ServerError::ThreadConflict(_) => "THREAD_CONFLICT",
            ServerError::PostConflict(_) => "POST_CONFLICT",
            ServerError::ParentConflict(_) => "PARENT_CONFLICT",
            ServerError::InvalidArgument(_) => "INVALID_ARGUMENT",
            ServerError::Storage(_) => "STORAGE_ERROR",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Check if error is recoverable (client can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ServerError::Storage(StorageError::ConnectionFailed(_))
        )
    }
}

// Conversions from external errors

impl From<rusqlite::Error> for ServerError {
    fn from(e: rusqlite::Error) -> Self {
        ServerError::Storage(StorageError::Sqlite(e))
    }
}

impl From<StorageError> for ServerError {
    fn from(e: StorageError) -> Self {
        ServerError::Storage(e)
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(e: serde_json::Error) -> Self {
        ServerError::InvalidArgument(e.to_string())
    }
}
