//! State shared by the main and the post invocations of a pipeline step.
//!
//! The runner executes a step with a post action twice, as two separate
//! processes. Anything the main invocation wants the post invocation to know
//! has to go through the runner, using the [`RunState`] of this crate:
//!
//! - [`HostRunState`] talks to the runner, through `STATE_*` variables and
//!   the state file
//! - [`InMemoryRunState`] keeps everything in the process, for tests

mod error;
mod host;
mod memory;

pub use crate::error::RunStateError;
pub use crate::host::read_state_file;
pub use crate::host::HostRunState;
pub use crate::memory::InMemoryRunState;

/// A string key/value store scoped to one run of a step.
pub trait RunState {
    /// The value saved under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Saves `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), RunStateError>;
}
