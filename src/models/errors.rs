use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("bind error: {message}")]
    BindError { message: String },

    #[error("server error: {message}")]
    ServerError { message: String },

    #[error("storage error: {message}")]
    StorageError { message: String },
}

// Convenience functions for creating specific errors
impl AppError {
    pub fn bind_failed(message: impl Into<String>) -> Self {
        AppError::BindError { message: message.into() }
    }

    pub fn server_failed(message: impl Into<String>) -> Self {
        AppError::ServerError { message: message.into() }
    }

    pub fn storage_failed(message: impl Into<String>) -> Self {
        AppError::StorageError { message: message.into() }
    }
}
