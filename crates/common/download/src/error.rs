use reqwest::StatusCode;
use std::io;

/// An error that can be returned while fetching or saving file content.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("{context}")]
    FromIo { context: String, source: io::Error },

    #[error("Could not make a successful request to the remote server")]
    Request(#[from] reqwest::Error),

    #[error("Failed to get file from Google Drive: {status}")]
    UnexpectedStatus { status: StatusCode },

    #[error("Cannot use {url} as the Drive API base url")]
    InvalidApiUrl { url: String },
}

impl DownloadError {
    /// The HTTP status of a response rejected by the client, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            DownloadError::UnexpectedStatus { status } => Some(*status),
            _ => None,
        }
    }
}

/// A trait for attaching context string to io-like errors.
///
/// `io::Error` doesn't carry the path it failed on, so without a context the
/// user only sees "No such file or directory". This mirrors
/// `anyhow::Context::context` while keeping the error typed.
pub(crate) trait ErrContext<T> {
    fn context(self, context: String) -> Result<T, DownloadError>;
}

impl<T, E: Into<io::Error>> ErrContext<T> for Result<T, E> {
    fn context(self, context: String) -> Result<T, DownloadError> {
        self.map_err(|err| DownloadError::FromIo {
            context,
            source: err.into(),
        })
    }
}
