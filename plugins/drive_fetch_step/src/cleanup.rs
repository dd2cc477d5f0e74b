use crate::error::StepError;
use crate::phase::PATH_KEY;
use camino::Utf8PathBuf;
use run_state::RunState;
use std::io::ErrorKind;
use tracing::debug;
use tracing::info;

/// Removes the file downloaded by the main invocation, if it is still there.
///
/// A file moved or consumed by a later step is not an error. Returns the
/// path of the removed file.
pub async fn cleanup<S>(state: &S) -> Result<Option<Utf8PathBuf>, StepError>
where
    S: RunState + ?Sized,
{
    let Some(path) = state
        .get(PATH_KEY)
        .filter(|path| !path.is_empty())
        .map(Utf8PathBuf::from)
    else {
        debug!("No file was downloaded, nothing to remove");
        return Ok(None);
    };

    let remove_failed = |source| StepError::RemoveFailed {
        path: path.clone(),
        source,
    };

    let exists = match tokio::fs::try_exists(&path).await {
        Err(err) if err.kind() == ErrorKind::NotADirectory => false,
        result => result.map_err(remove_failed)?,
    };
    if !exists {
        debug!(%path, "Downloaded file is already gone");
        return Ok(None);
    }

    tokio::fs::remove_file(&path).await.map_err(remove_failed)?;
    info!("Removed downloaded file {path}");

    Ok(Some(path))
}
