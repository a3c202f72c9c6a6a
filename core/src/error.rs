use std::string::FromUtf8Error;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("file content is not valid UTF-8: {path}")]
    InvalidEncoding {
        path: String,
        #[source]
        source: FromUtf8Error,
    },

    /// The move transaction was rolled back before this was returned.
    #[error("failed to move {from} to {to}")]
    MoveFailed {
        from: String,
        to: String,
        #[source]
        source: Box<Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::Backend(_) => "backend",
            Error::InvalidArgument(_) => "invalid_argument",
            Error::InvalidConfig(_) => "invalid_config",
            Error::NotFound(_) => "not_found",
            Error::AlreadyExists(_) => "already_exists",
            Error::InvalidEncoding { .. } => "invalid_encoding",
            Error::MoveFailed { .. } => "move_failed",
        }
    }
}
