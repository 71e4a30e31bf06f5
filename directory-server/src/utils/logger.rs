//! Logging Infrastructure
//!
//! `RUST_LOG` wins over the configured level. With a log directory the output
//! goes to a daily rolling file instead of stdout.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Default filter when neither `RUST_LOG` nor a level is given
pub const DEFAULT_FILTER: &str = "directory_server=info,tower_http=info,security=info";

/// Build the env filter for a configured level
pub fn build_filter(log_level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match log_level {
        Some(level) => EnvFilter::new(format!(
            "directory_server={level},shared={level},tower_http={level},security={level}"
        )),
        None => EnvFilter::new(DEFAULT_FILTER),
    })
}

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, false, None);
}

/// Initialize the logger with optional JSON and file output
///
/// A missing log directory is created; if that fails logging falls back to stdout.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(log_level))
        .with_target(true);

    let file_appender = log_dir.and_then(|dir| {
        let path = Path::new(dir);
        if let Err(e) = std::fs::create_dir_all(path) {
            eprintln!("Cannot create log directory {dir}: {e}, logging to stdout");
            return None;
        }
        Some(tracing_appender::rolling::daily(path, "directory-server.log"))
    });

    let result = match (file_appender, json) {
        (Some(appender), true) => builder
            .json()
            .with_ansi(false)
            .with_writer(appender)
            .try_init(),
        (Some(appender), false) => builder.with_ansi(false).with_writer(appender).try_init(),
        (None, true) => builder.json().try_init(),
        (None, false) => builder.try_init(),
    };

    if let Err(e) = result {
        eprintln!("Logger already initialized: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_logging_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("logs");
        let dir_str = dir.to_str().unwrap();

        init_logger_with_file(Some("debug"), true, Some(dir_str));
        tracing::info!("written to file");

        assert!(dir.is_dir());
    }
}
