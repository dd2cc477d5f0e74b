use camino::Utf8PathBuf;
use download::DownloadError;
use run_state::RunStateError;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("No access token provided to action")]
    MissingCredential,

    #[error("Action could not determine file id")]
    UnresolvableIdentifier,

    #[error("No path provided to action")]
    MissingDestination,

    #[error("Failed to get file from Google Drive: {0}")]
    DownloadFailed(u16),

    #[error(transparent)]
    Download(DownloadError),

    #[error(transparent)]
    RunState(#[from] RunStateError),

    #[error("Failed to remove downloaded file {path}")]
    RemoveFailed { path: Utf8PathBuf, source: io::Error },
}

impl From<DownloadError> for StepError {
    fn from(err: DownloadError) -> Self {
        match err.status() {
            Some(status) => StepError::DownloadFailed(status.as_u16()),
            None => StepError::Download(err),
        }
    }
}
