use camino::Utf8PathBuf;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum RunStateError {
    #[error("Failed to save run state to {path}")]
    SaveFailed { path: Utf8PathBuf, source: io::Error },

    #[error("Failed to read run state from {path}")]
    ReadFailed { path: Utf8PathBuf, source: io::Error },

    #[error("Invalid run state key: {key:?}")]
    InvalidKey { key: String },

    #[error("Run state value for {key:?} contains the delimiter {delimiter}")]
    DelimiterCollision { key: String, delimiter: String },

    #[error("Malformed run state file {path}: {reason}")]
    MalformedStateFile { path: Utf8PathBuf, reason: String },
}
