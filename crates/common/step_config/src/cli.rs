use camino::Utf8PathBuf;

#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct CommonArgs {
    /// File to which the runner expects saved run state to be appended.
    ///
    /// When unset, run state is saved with `::save-state` workflow commands.
    #[arg(long, env = "GITHUB_STATE", hide_env_values = true)]
    pub state_file: Option<Utf8PathBuf>,

    #[command(flatten)]
    pub log_args: LogConfigArgs,
}

#[derive(clap::Args, Debug, Clone, PartialEq, Eq, Default)]
pub struct LogConfigArgs {
    /// Turn-on the DEBUG log level.
    ///
    /// If off only reports ERROR, WARN, and INFO, if on also reports DEBUG
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configures the logging level.
    ///
    /// One of error/warn/info/debug/trace.
    /// Overrides `--debug`
    #[arg(long, global = true)]
    pub log_level: Option<tracing::Level>,
}
