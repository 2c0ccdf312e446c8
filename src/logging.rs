use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const STATUS_LOG_TARGET: &str = "loopcast";
const DEFAULT_STATUS_LOG: &str = "./logs/loopcast.log";

/// Console output filtered by `TRACING_LEVEL`, plus the status log file at
/// `LOG_FILE_PATH`. The status log only records events from this crate, at
/// `LOG_FILE_LEVEL` (default `info`), so dependency noise stays on the console.
pub fn init_logger() -> impl Drop {
    let console_filter =
        EnvFilter::new(env::var("TRACING_LEVEL").unwrap_or_else(|_| "info".to_string()));

    let file_level = env::var("LOG_FILE_LEVEL")
        .ok()
        .and_then(|level| level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::INFO);

    let log_file_path = env::var("LOG_FILE_PATH").unwrap_or_else(|_| DEFAULT_STATUS_LOG.to_string());
    let (directory, file_name) = status_log_location(&log_file_path);

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(false)
                .without_time()
                .with_ansi(true)
                .with_filter(console_filter),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(status_log_targets(file_level)),
        )
        .init();

    debug!("Status log at {}", log_file_path);

    guard
}

fn status_log_targets(level: LevelFilter) -> Targets {
    Targets::new().with_target(STATUS_LOG_TARGET, level)
}

/// Splits the configured path into the appender's directory and file name.
fn status_log_location(path: &str) -> (PathBuf, PathBuf) {
    let path = Path::new(path);
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("loopcast.log"));
    (directory, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_status_log_keeps_only_crate_targets() {
        let targets = status_log_targets(LevelFilter::INFO);
        assert!(targets.would_enable("loopcast", &Level::INFO));
        assert!(targets.would_enable("loopcast::launch", &Level::WARN));
        assert!(!targets.would_enable("loopcast::catalog", &Level::DEBUG));
        assert!(!targets.would_enable("walkdir", &Level::ERROR));
        assert!(!targets.would_enable("tracing_appender", &Level::INFO));
    }

    #[test]
    fn test_status_log_location_splits_path() {
        assert_eq!(
            status_log_location("./logs/loopcast.log"),
            (PathBuf::from("./logs"), PathBuf::from("loopcast.log"))
        );
        assert_eq!(
            status_log_location("status.log"),
            (PathBuf::from("."), PathBuf::from("status.log"))
        );
    }
}
