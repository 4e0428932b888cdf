use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during user record operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User validation error: {0}")]
    Validation(String),
    #[error("User with id = {0} already exists")]
    Conflict(u32),
    #[error("User with id = {0} does not exist")]
    NotFound(u32),
    #[error("User record is not initialized")]
    Uninitialized,
    #[error("User record {id} is corrupt: {reason}")]
    Corrupt { id: u32, reason: String },
    #[error("User storage error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Storage configuration error: {0}")]
    Config(String),
}

impl UserError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        UserError::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, UserError>;
