use crate::cli::LogConfigArgs;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::util::TryInitError;

/// The basic subscriber
macro_rules! subscriber_builder {
    () => {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal() && yansi::Condition::no_color())
            .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
    };
}

const DEFAULT_MAX_LEVEL: tracing::Level = tracing::Level::INFO;

#[derive(Debug, thiserror::Error)]
#[error("Failed to initialise logging")]
pub struct LogInitError(#[from] TryInitError);

/// Configures and enables logging taking into account flags and env variables.
///
/// 1. If `--log-level` or `--debug` flags are set, they decide the level
/// 2. Otherwise, if `RUST_LOG` variable is set, it is used as an env filter
/// 3. Otherwise only `error!`, `warn!` and `info!` are reported
///
/// Logs go to stderr, keeping stdout free for the runner's workflow commands.
pub fn log_init(flags: &LogConfigArgs) -> Result<(), LogInitError> {
    let filter = log_filter(flags, std::env::var("RUST_LOG").is_ok());
    logger(filter).try_init()?;
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum LogFilter {
    MaxLevel(tracing::Level),
    FromEnv,
}

fn log_filter(flags: &LogConfigArgs, rust_log_is_set: bool) -> LogFilter {
    let log_level = flags
        .log_level
        .or(flags.debug.then_some(tracing::Level::DEBUG));

    match log_level {
        Some(log_level) => LogFilter::MaxLevel(log_level),
        None if rust_log_is_set => LogFilter::FromEnv,
        None => LogFilter::MaxLevel(DEFAULT_MAX_LEVEL),
    }
}

fn logger(filter: LogFilter) -> Arc<dyn tracing::Subscriber + Send + Sync> {
    let subscriber = subscriber_builder!();

    match filter {
        LogFilter::MaxLevel(log_level) => Arc::new(subscriber.with_max_level(log_level).finish()),
        LogFilter::FromEnv => Arc::new(
            subscriber
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .with_file(true)
                .with_line_number(true)
                .finish(),
        ),
    }
}
