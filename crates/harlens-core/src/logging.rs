//! Logging init: file under XDG state dir, or graceful fallback to stderr.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,harlens=debug,harlens_core=debug";

/// Writer that is either the log file or stderr (used when the file clone fails).
enum LogSink {
    File(fs::File),
    Stderr,
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct FileMakeWriter(fs::File);

impl<'a> MakeWriter<'a> for FileMakeWriter {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(LogSink::File)
            .unwrap_or(LogSink::Stderr)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Path of the log file: `~/.local/state/harlens/harlens.log`.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("harlens")?;
    Ok(xdg_dirs.get_state_home().join("harlens.log"))
}

/// Initialize structured logging to the XDG state log file.
/// On failure (e.g. log dir unwritable), returns Err so the caller can fall back to stderr.
pub fn init_logging() -> Result<()> {
    let log_file_path = log_path()?;
    if let Some(dir) = log_file_path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("create log dir: {}", dir.display()))?;
    }

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)
        .with_context(|| format!("open log file: {}", log_file_path.display()))?;

    let writer = BoxMakeWriter::new(FileMakeWriter(file));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))?;

    tracing::info!("harlens logging initialized at {}", log_file_path.display());

    Ok(())
}

/// Initialize logging to stderr only (no file). Use when init_logging() fails so the CLI doesn't crash.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
