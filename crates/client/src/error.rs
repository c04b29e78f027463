use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Refused before any request was sent.
    #[error("{0}")]
    InvalidInput(String),
}

impl ClientError {
    /// Maps a non-2xx status and its message to an error.
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            422 => Self::Validation(message),
            _ => Self::Server { status, message },
        }
    }
}
