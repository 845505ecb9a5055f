//! Logging system initialization
//!
//! Sets up tracing-based logging to `carousel.log` inside the data directory.
//! Each run starts a fresh file; the previous nine runs are kept as
//! `carousel.log.1` (newest) through `carousel.log.9` (oldest).

use crate::error::{CarouselError, Result, StringError};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

/// Base name of the active log file
pub const LOG_FILE_NAME: &str = "carousel.log";

/// Number of historical log files kept
const MAX_LOG_FILES: u8 = 9;

/// Initialize the global subscriber writing into `log_dir`
///
/// Log level defaults to INFO and can be overridden with `RUST_LOG`.
pub fn init_logging(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;
    rotate_logs_on_startup(&log_dir.join(LOG_FILE_NAME))?;

    // Rotation happens above, once per run
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("carousel")
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| CarouselError::ConfigError(Box::new(e)))?;

    let subscriber = fmt()
        .with_writer(file_appender)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| CarouselError::ConfigError(Box::new(e)))?;

    tracing::info!("MapleCarousel v{} started", env!("CARGO_PKG_VERSION"));
    Ok(())
}

/// Shift `carousel.log` → `.1` → … → `.9`, dropping the oldest
fn rotate_logs_on_startup(log_path: &Path) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let (Some(log_dir), Some(log_name)) = (log_path.parent(), log_path.file_name()) else {
        return Err(CarouselError::ConfigError(StringError::new(format!(
            "Invalid log path: {}",
            log_path.display()
        ))));
    };
    let log_name = log_name.to_string_lossy();
    let numbered = |i: u8| log_dir.join(format!("{log_name}.{i}"));

    let oldest = numbered(MAX_LOG_FILES);
    if oldest.exists() {
        std::fs::remove_file(&oldest)?;
    }

    for i in (1..MAX_LOG_FILES).rev() {
        let current = numbered(i);
        if current.exists() {
            std::fs::rename(&current, numbered(i + 1))?;
        }
    }

    std::fs::rename(log_path, numbered(1))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_dir;
    use std::fs;

    fn run_session(dir: &Path, content: &str) {
        let log_path = dir.join(LOG_FILE_NAME);
        fs::write(&log_path, content).unwrap();
        rotate_logs_on_startup(&log_path).unwrap();
    }

    #[test]
    fn test_rotation_moves_current_log() {
        let dir = create_test_dir();
        run_session(dir.path(), "run 1");

        assert!(!dir.path().join(LOG_FILE_NAME).exists());
        let rotated = fs::read_to_string(dir.path().join("carousel.log.1")).unwrap();
        assert_eq!(rotated, "run 1");
    }

    #[test]
    fn test_rotation_keeps_newest_first() {
        let dir = create_test_dir();
        for run in 1..=4 {
            run_session(dir.path(), &format!("run {run}"));
        }

        for i in 1..=4 {
            let content = fs::read_to_string(dir.path().join(format!("carousel.log.{i}"))).unwrap();
            assert_eq!(content, format!("run {}", 5 - i));
        }
    }

    #[test]
    fn test_rotation_caps_history() {
        let dir = create_test_dir();
        for run in 1..=12 {
            run_session(dir.path(), &format!("run {run}"));
        }

        assert!(dir.path().join("carousel.log.9").exists());
        assert!(!dir.path().join("carousel.log.10").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("carousel.log.9")).unwrap(),
            "run 4"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("carousel.log.1")).unwrap(),
            "run 12"
        );
    }

    #[test]
    fn test_rotation_without_existing_log() {
        let dir = create_test_dir();
        rotate_logs_on_startup(&dir.path().join(LOG_FILE_NAME)).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_rotation_with_gaps() {
        let dir = create_test_dir();
        fs::write(dir.path().join("carousel.log.2"), "older").unwrap();
        run_session(dir.path(), "latest");

        assert_eq!(
            fs::read_to_string(dir.path().join("carousel.log.1")).unwrap(),
            "latest"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("carousel.log.3")).unwrap(),
            "older"
        );
        assert!(!dir.path().join("carousel.log.2").exists());
    }
}
