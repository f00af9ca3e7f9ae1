use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("message {message_id} has an unparseable timestamp {timestamp:?}: {source}")]
    InvalidTimestamp {
        message_id: String,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("gap threshold of {0} minutes is outside 0..={max}", max = crate::config::MAX_GAP_MINUTES)]
    InvalidGapThreshold(i64),

    #[error("author name {0:?} cannot be used as a file name")]
    UnsafeAuthorName(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
