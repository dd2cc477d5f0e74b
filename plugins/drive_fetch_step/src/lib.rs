//! A pipeline step making a Google Drive file available for the duration of a run.
//!
//! The runner invokes the step twice per run. The first, main, invocation
//! downloads the file with [`acquire`]; the second, post, invocation removes
//! it with [`cleanup`]. Which one runs is decided by the [`Phase`] recorded in
//! the run state.

mod acquire;
mod cleanup;
mod cli;
mod error;
mod file_id;
mod inputs;
mod phase;

#[cfg(test)]
mod fake_drive;

pub use crate::acquire::acquire;
pub use crate::cleanup::cleanup;
pub use crate::cli::DriveFetchCli;
pub use crate::error::StepError;
pub use crate::file_id::file_id_from_share_url;
pub use crate::file_id::resolve_file_id;
pub use crate::file_id::FileId;
pub use crate::file_id::IllFormedUrl;
pub use crate::inputs::StepInputs;
pub use crate::phase::should_run_cleanup;
pub use crate::phase::Phase;
pub use crate::phase::IS_POST_KEY;
pub use crate::phase::PATH_KEY;

use anyhow::Context;
use download::DriveClient;
use download::FileContentSource;
use run_state::HostRunState;
use run_state::RunState;
use tracing::info;

/// Runs the phase of the step due for this invocation, against the runner's
/// run state and the Google Drive API.
pub async fn run(cli: DriveFetchCli) -> anyhow::Result<()> {
    let mut state = HostRunState::from_env(cli.common.state_file.clone());
    let drive = DriveClient::new(cli.api_url.clone())
        .context("Failed to create the Google Drive client")?;

    run_step(&cli.inputs(), &mut state, &drive).await?;
    Ok(())
}

/// Runs exactly one phase of the step, selected from `state`.
pub async fn run_step<S, C>(
    inputs: &StepInputs,
    state: &mut S,
    source: &C,
) -> Result<Phase, StepError>
where
    S: RunState + ?Sized,
    C: FileContentSource + ?Sized,
{
    let phase = Phase::detect(&*state);
    info!(?phase, "Running step");

    match phase {
        Phase::Main => {
            acquire(inputs, state, source).await?;
        }
        Phase::Post => {
            cleanup(&*state).await?;
        }
    }

    Ok(phase)
}
