use camino::Utf8PathBuf;

/// The inputs given to the step.
///
/// All inputs are optional at this level: missing required inputs are
/// reported by [`acquire`](crate::acquire), after the run has been marked for
/// cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepInputs {
    pub token: Option<String>,
    pub file_id: Option<String>,
    pub file_url: Option<String>,
    pub path: Option<Utf8PathBuf>,
}

impl StepInputs {
    /// Builds the inputs from raw values, trimming them and dropping the empty ones.
    pub fn from_raw(
        token: Option<&str>,
        file_id: Option<&str>,
        file_url: Option<&str>,
        path: Option<&str>,
    ) -> Self {
        Self {
            token: input_value(token),
            file_id: input_value(file_id),
            file_url: input_value(file_url),
            path: input_value(path).map(Utf8PathBuf::from),
        }
    }
}

fn input_value(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}
