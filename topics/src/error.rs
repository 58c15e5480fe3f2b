//! Topic collection errors.

use uuid::Uuid;

/// Grepable error code for structured error responses.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopicError {
    #[error("topic not found: {0}")]
    NotFound(Uuid),
    #[error("example query index {index} out of range (len {len})")]
    QueryIndexOutOfRange { index: usize, len: usize },
    #[error("invalid sort key: {0}")]
    InvalidSortKey(String),
}

impl ErrorCode for TopicError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_TOPIC_NOT_FOUND",
            Self::QueryIndexOutOfRange { .. } => "E_QUERY_INDEX",
            Self::InvalidSortKey(_) => "E_INVALID_SORT_KEY",
        }
    }
}
