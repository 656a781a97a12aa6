//! Log writer module
//!
//! Thread-safe log writing to files or stdout/stderr. The writer is built
//! once at startup from the logging configuration and never changes after.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use super::{AccessLogFormat, LogLevel};

/// Global log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Log output target
enum LogTarget {
    Stdout,
    Stderr,
    File(Mutex<File>),
}

impl LogTarget {
    fn open(path: Option<&str>, fallback: Self) -> io::Result<Self> {
        match path {
            Some(p) => Ok(Self::File(Mutex::new(open_log_file(p)?))),
            None => Ok(fallback),
        }
    }

    fn write_line(&self, message: &str) {
        match self {
            Self::Stdout => println!("{message}"),
            Self::Stderr => eprintln!("{message}"),
            Self::File(file) => {
                if let Ok(mut f) = file.lock() {
                    let _ = writeln!(f, "{message}");
                }
            }
        }
    }
}

/// Writer settings taken from the logging configuration
pub struct WriterSettings<'a> {
    pub tag: &'a str,
    pub level: LogLevel,
    pub access_format: AccessLogFormat,
    pub access_log_file: Option<&'a str>,
    pub error_log_file: Option<&'a str>,
}

/// Thread-safe log writer
pub struct LogWriter {
    tag: String,
    level: LogLevel,
    access_format: AccessLogFormat,
    /// Access log and info messages
    access: LogTarget,
    /// Warnings and errors
    error: LogTarget,
}

impl LogWriter {
    fn new(settings: &WriterSettings<'_>) -> io::Result<Self> {
        Ok(Self {
            tag: settings.tag.to_string(),
            level: settings.level,
            access_format: settings.access_format,
            access: LogTarget::open(settings.access_log_file, LogTarget::Stdout)?,
            error: LogTarget::open(settings.error_log_file, LogTarget::Stderr)?,
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub const fn level(&self) -> LogLevel {
        self.level
    }

    pub const fn access_format(&self) -> AccessLogFormat {
        self.access_format
    }

    pub fn write_access(&self, message: &str) {
        self.access.write_line(message);
    }

    pub fn write_error(&self, message: &str) {
        self.error.write_line(message);
    }

    pub fn write_info(&self, message: &str) {
        self.access.write_line(message);
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize the global log writer
///
/// Call once at startup. Returns an error if a log file cannot be opened or
/// the writer was already initialized.
pub fn init(settings: &WriterSettings<'_>) -> io::Result<()> {
    let writer = LogWriter::new(settings)?;
    LOG_WRITER.set(writer).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Log writer already initialized",
        )
    })
}

/// Get the global log writer, if initialized
pub fn get() -> Option<&'static LogWriter> {
    LOG_WRITER.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_target_appends_lines() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("logs/access.log");
        let path_str = path.to_string_lossy().to_string();

        let writer = LogWriter::new(&WriterSettings {
            tag: "test",
            level: LogLevel::Debug,
            access_format: AccessLogFormat::Common,
            access_log_file: Some(&path_str),
            error_log_file: None,
        })
        .expect("writer");

        writer.write_access("first");
        writer.write_info("second");

        let content = std::fs::read_to_string(&path).expect("log file");
        assert_eq!(content, "first\nsecond\n");
        assert_eq!(writer.tag(), "test");
    }
}
