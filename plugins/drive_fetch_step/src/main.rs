use clap::Parser;
use drive_fetch_step::DriveFetchCli;
use std::process::ExitCode;
use step_config::log_init;
use step_config::WorkflowCommand;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = DriveFetchCli::parse();

    if let Err(err) = log_init(&cli.common.log_args) {
        eprintln!("Can't enable logging due to error: {err}");
        return ExitCode::FAILURE;
    }

    match drive_fetch_step::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let message = format!("{err:#}");
            tracing::error!("{message}");
            WorkflowCommand::error(&message).issue();
            ExitCode::FAILURE
        }
    }
}
