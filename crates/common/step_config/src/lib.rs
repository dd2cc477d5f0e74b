//! Conventions shared by the pipeline steps of this workspace:
//! command line arguments, logging setup and the runner's workflow commands.

pub mod cli;
mod log_init;
mod workflow_command;

pub use crate::log_init::log_init;
pub use crate::log_init::LogInitError;
pub use crate::workflow_command::WorkflowCommand;
