use crate::error::StepError;
use crate::file_id::resolve_file_id;
use crate::inputs::StepInputs;
use crate::phase::IS_POST_KEY;
use crate::phase::PATH_KEY;
use camino::Utf8PathBuf;
use download::FileContentSource;
use run_state::RunState;
use tracing::error;
use tracing::info;

/// Downloads the requested file to its destination path.
///
/// The run is marked for cleanup before anything else, so that the post
/// invocation runs even when this one fails. The destination is recorded
/// only once the server has accepted the request, before the content is
/// written: a file left half-written is still removed by the post invocation.
pub async fn acquire<S, C>(
    inputs: &StepInputs,
    state: &mut S,
    source: &C,
) -> Result<Utf8PathBuf, StepError>
where
    S: RunState + ?Sized,
    C: FileContentSource + ?Sized,
{
    state.set(IS_POST_KEY, "true")?;

    let token = inputs
        .token
        .as_deref()
        .ok_or(StepError::MissingCredential)?;

    let file_id = resolve_file_id(inputs.file_id.as_deref(), inputs.file_url.as_deref())
        .unwrap_or_else(|err| {
            error!("{err}");
            None
        })
        .ok_or(StepError::UnresolvableIdentifier)?;

    let path = inputs
        .path
        .as_deref()
        .ok_or(StepError::MissingDestination)?;

    info!(%file_id, %path, "Downloading file from Google Drive");
    let content = source.fetch_file_content(file_id.as_str(), token).await?;

    state.set(PATH_KEY, path.as_str())?;

    let written = content.save(path).await?;
    info!(%path, bytes = written, "Downloaded file");

    Ok(path.to_owned())
}
