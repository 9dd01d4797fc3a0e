//! Logging setup
//!
//! The UI owns the terminal, so logs go to a file. Writes are handed to a
//! background worker so the event loop never blocks on disk. `RUST_LOG`
//! overrides the default filter.

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "weather_lookup=info,lookup_dispatch=info";

/// Install the global subscriber, appending to `path`.
///
/// Buffered lines are flushed when the returned guard is dropped, so keep it
/// alive for the whole run.
pub fn init(path: &Path) -> io::Result<WorkerGuard> {
    let (writer, guard) = tracing_appender::non_blocking(file_appender(path)?);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))?;

    tracing::info!(log_file = %path.display(), "Logging initialized");
    Ok(guard)
}

/// Single, never-rotated log file at `path`.
fn file_appender(path: &Path) -> io::Result<RollingFileAppender> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}: log path has no file name", path.display()),
        )
    })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .map_err(|e| io::Error::other(e.to_string()))
}

/// Route panic reports to the log instead of the (raw-mode) terminal.
///
/// Render panics are caught by the fault boundary afterwards; this only
/// replaces the default stderr report.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        tracing::error!(panic = %info, "Panic");
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_appender_writes_to_exact_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather-lookup.log");

        let mut appender = file_appender(&path).unwrap();
        appender.write_all(b"hello\n").unwrap();
        appender.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_appender_rejects_path_without_file_name() {
        let err = file_appender(Path::new("/")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
