//! Internal library error types

use thiserror::Error;

/// Internal library errors
#[derive(Error, Debug)]
pub enum InternalError {
    /// Buffer pool error
    #[error("Buffer pool error: {message}")]
    BufferPool { message: String },
}

impl InternalError {
    /// Create a buffer pool error
    pub fn buffer_pool(message: impl Into<String>) -> Self {
        Self::BufferPool {
            message: message.into(),
        }
    }
}
