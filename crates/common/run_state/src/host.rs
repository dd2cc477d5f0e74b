use crate::RunState;
use crate::RunStateError;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use step_config::WorkflowCommand;
use tracing::debug;

const STATE_ENV_PREFIX: &str = "STATE_";
const HEREDOC_MARKER: &str = "<<";

/// Run state persisted by the pipeline runner.
///
/// The runner hands the state saved by the main invocation of a step to its
/// post invocation as `STATE_<key>` environment variables. Values are saved
/// by appending them to the state file named by the runner or, on runners
/// without a state file, with `::save-state` workflow commands.
///
/// The `STATE_*` variables are read once, when the store is created: a value
/// set by a process is only visible to the next invocation of the step.
#[derive(Debug, Clone, Default)]
pub struct HostRunState {
    saved: BTreeMap<String, String>,
    state_file: Option<Utf8PathBuf>,
}

impl HostRunState {
    /// Reads the state saved by previous invocations from the process environment.
    pub fn from_env(state_file: Option<Utf8PathBuf>) -> Self {
        let vars = std::env::vars_os().filter_map(|(name, value)| {
            Some((name.into_string().ok()?, value.into_string().ok()?))
        });
        Self::from_vars(vars, state_file)
    }

    pub fn from_vars<I, K, V>(vars: I, state_file: Option<Utf8PathBuf>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let saved = vars
            .into_iter()
            .filter_map(|(name, value)| {
                let key = name.as_ref().strip_prefix(STATE_ENV_PREFIX)?;
                Some((key.to_owned(), value.into()))
            })
            .collect();

        Self { saved, state_file }
    }
}

impl RunState for HostRunState {
    fn get(&self, key: &str) -> Option<String> {
        self.saved.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), RunStateError> {
        validate_key(key)?;

        match &self.state_file {
            Some(path) => {
                let entry = state_file_entry(key, value)?;
                append_to_file(path, &entry)?;
                debug!(key, state_file = %path, "Saved run state");
            }
            None => {
                WorkflowCommand::save_state(key, value).issue();
                debug!(key, "Saved run state with a workflow command");
            }
        }

        Ok(())
    }
}

fn validate_key(key: &str) -> Result<(), RunStateError> {
    if key.is_empty() || key.contains(['=', '\r', '\n']) || key.contains(HEREDOC_MARKER) {
        return Err(RunStateError::InvalidKey {
            key: key.to_owned(),
        });
    }
    Ok(())
}

fn state_file_entry(key: &str, value: &str) -> Result<String, RunStateError> {
    if !value.contains(['\r', '\n']) {
        return Ok(format!("{key}={value}\n"));
    }

    let delimiter = format!("ghadelimiter_{:032x}", rand::random::<u128>());
    if value.contains(&delimiter) {
        return Err(RunStateError::DelimiterCollision {
            key: key.to_owned(),
            delimiter,
        });
    }
    Ok(format!("{key}{HEREDOC_MARKER}{delimiter}\n{value}\n{delimiter}\n"))
}

fn append_to_file(path: &Utf8Path, entry: &str) -> Result<(), RunStateError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut file| file.write_all(entry.as_bytes()))
        .map_err(|source| RunStateError::SaveFailed {
            path: path.to_owned(),
            source,
        })
}

/// Reads a state file the way the runner does when preparing the `STATE_*`
/// variables of the post invocation.
///
/// Entries are either `key=value` lines or `key<<DELIMITER` blocks spanning
/// the lines up to a line holding only the delimiter.
pub fn read_state_file(path: &Utf8Path) -> Result<BTreeMap<String, String>, RunStateError> {
    let content = std::fs::read_to_string(path).map_err(|source| RunStateError::ReadFailed {
        path: path.to_owned(),
        source,
    })?;
    let malformed = |reason: String| RunStateError::MalformedStateFile {
        path: path.to_owned(),
        reason,
    };

    let mut entries = BTreeMap::new();
    let mut lines = content.lines();
    while let Some(line) = lines.next() {
        if line.is_empty() {
            continue;
        }

        let equals = line.find('=');
        let heredoc = line.find(HEREDOC_MARKER);
        match (equals, heredoc) {
            (Some(eq), hd) if hd.is_none_or(|hd| eq < hd) => {
                entries.insert(line[..eq].to_owned(), line[eq + 1..].to_owned());
            }
            (_, Some(hd)) => {
                let key = &line[..hd];
                let delimiter = &line[hd + HEREDOC_MARKER.len()..];
                let mut value_lines = Vec::new();
                loop {
                    match lines.next() {
                        Some(line) if line == delimiter => break,
                        Some(line) => value_lines.push(line),
                        None => {
                            return Err(malformed(format!(
                                "missing delimiter {delimiter} for {key}"
                            )))
                        }
                    }
                }
                entries.insert(key.to_owned(), value_lines.join("\n"));
            }
            _ => return Err(malformed(format!("invalid entry {line:?}"))),
        }
    }

    Ok(entries)
}
