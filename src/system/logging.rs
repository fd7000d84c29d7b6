//! Logging system initialization
//!
//! This module builds the global tracing subscriber from [`LoggingConfig`]:
//! one of three [`LogPattern`] presets (or JSON lines), console or file
//! output, and a level filter that can be swapped at runtime.

use std::fmt;
use std::io::Write;
use std::path::Path;

use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, reload};

use crate::config::{LogPattern, LoggingConfig};
use crate::errors::{CommonsError, Result};

const DEFAULT_LOG_FILE: &str = "commons.log";

/// `yyyy-MM-dd HH:mm:ss.SSS` in local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTimestamp;

impl FormatTime for LocalTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Keeps the background writer alive and controls the level filter.
///
/// Dropping the handle flushes pending log lines and stops the writer.
pub struct LoggingHandle {
    _guard: WorkerGuard,
    filter: reload::Handle<EnvFilter, Registry>,
}

impl LoggingHandle {
    /// Replaces the level filter, e.g. `"debug"` or `"commons=trace,warn"`.
    pub fn set_level(&self, directive: &str) -> Result<()> {
        let filter = parse_filter(directive)?;
        self.filter
            .reload(filter)
            .map_err(|e| CommonsError::logging(format!("Failed to reload log filter: {}", e)))
    }

    /// Current filter directive.
    pub fn level(&self) -> Option<String> {
        self.filter.with_current(|f| f.to_string()).ok()
    }
}

impl fmt::Debug for LoggingHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingHandle")
            .field("level", &self.level())
            .finish()
    }
}

/// Initialize logging system based on configuration
///
/// **Note**: only one global subscriber may exist per process; a second call
/// returns `CommonsError::Logging`.
///
/// # Returns
/// * `LoggingHandle` - Must be kept alive for the duration of the program
///   to ensure non-blocking log writes are flushed
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingHandle> {
    let writer = build_writer(config)?;
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);

    let (filter_layer, filter_handle) = reload::Layer::new(parse_filter(&config.level)?);
    let ansi = config.log_file().is_none();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(format_layer(config, non_blocking_writer, ansi))
        .try_init()
        .map_err(|e| CommonsError::logging(format!("Failed to install subscriber: {}", e)))?;

    Ok(LoggingHandle {
        _guard: guard,
        filter: filter_handle,
    })
}

fn parse_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| CommonsError::logging(format!("Invalid log level '{}': {}", directive, e)))
}

/// Console when no file is configured; otherwise a daily rolling appender
/// or a plain append-mode file.
fn build_writer(config: &LoggingConfig) -> Result<Box<dyn Write + Send + Sync>> {
    let Some(log_file) = config.log_file() else {
        return Ok(Box::new(std::io::stdout()));
    };

    let path = Path::new(log_file);
    if config.enable_rotation {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let filename = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or(DEFAULT_LOG_FILE);
        let appender = rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix(filename.trim_end_matches(".log"))
            .filename_suffix("log")
            .max_log_files(config.max_backups.max(1) as usize)
            .build(dir)
            .map_err(|e| {
                CommonsError::logging(format!("Failed to create rolling log appender: {}", e))
            })?;
        Ok(Box::new(appender))
    } else {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                CommonsError::logging(format!("Failed to open log file {}: {}", log_file, e))
            })?;
        Ok(Box::new(file))
    }
}

fn format_layer<S>(
    config: &LoggingConfig,
    writer: NonBlocking,
    ansi: bool,
) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let base = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_level(true);

    if config.is_json() {
        return base.json().with_timer(LocalTimestamp).boxed();
    }

    match config.pattern {
        LogPattern::Limited => base.without_time().with_target(false).boxed(),
        LogPattern::Basic => base.with_timer(LocalTimestamp).with_target(false).boxed(),
        LogPattern::Extended => base
            .with_timer(LocalTimestamp)
            .with_thread_names(true)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_invalid_level_is_logging_error() {
        let err = parse_filter("commons=loud").unwrap_err();
        assert!(matches!(err, CommonsError::Logging(_)));
    }

    #[test]
    fn test_console_writer_without_file() {
        let config = LoggingConfig {
            file: Some(String::new()),
            ..LoggingConfig::default()
        };
        assert!(build_writer(&config).is_ok());
    }

    #[test]
    fn test_plain_file_writer_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let config = LoggingConfig {
            file: Some(path.display().to_string()),
            enable_rotation: false,
            ..LoggingConfig::default()
        };

        let mut writer = build_writer(&config).unwrap();
        writer.write_all(b"line\n").unwrap();
        writer.flush().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "line\n");
    }

    #[test]
    fn test_rolling_writer_in_missing_parent_fails_cleanly() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let config = LoggingConfig {
            // 父路径是普通文件，无法创建目录
            file: Some(blocker.join("app.log").display().to_string()),
            ..LoggingConfig::default()
        };
        assert!(matches!(build_writer(&config), Err(CommonsError::Logging(_))));
    }
}
