//! Diagnostics logging for shader builds
//!
//! Every failure in the shader core is logged where it happens, then carried
//! back to the caller as an `Error`. Driver compile and link logs are often
//! several lines long, so the default console logger keeps them readable by
//! indenting every line after the first under the header.
//!
//! The active logger lives in the `Lumen` facade; the `lumen_*!` macros are
//! the only way the crate itself emits entries.

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Sink for log entries
///
/// Install one with `Lumen::set_logger` to capture compile and link
/// diagnostics instead of printing them.
///
/// # Example
///
/// ```no_run
/// use lumen_shader::lumen::log::{Logger, LogEntry, LogSeverity};
///
/// /// Keeps only failures, e.g. for a shader hot-reload overlay
/// struct FailureSink {
///     failures: std::sync::Mutex<Vec<String>>,
/// }
///
/// impl Logger for FailureSink {
///     fn log(&self, entry: &LogEntry) {
///         if entry.severity == LogSeverity::Error {
///             self.failures.lock().unwrap().push(entry.message.clone());
///         }
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    fn log(&self, entry: &LogEntry);
}

/// One emitted log line (message may span several lines)
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub severity: LogSeverity,

    pub timestamp: SystemTime,

    /// Emitting component, e.g. "lumen::ShaderStage" or "lumen::gl"
    pub source: String,

    pub message: String,

    /// Set by `lumen_error!` only
    pub file: Option<&'static str>,

    /// Set by `lumen_error!` only
    pub line: Option<u32>,
}

impl LogEntry {
    /// `file:line` of the emitting call, when recorded
    pub fn location(&self) -> Option<String> {
        match (self.file, self.line) {
            (Some(file), Some(line)) => Some(format!("{}:{}", file, line)),
            _ => None,
        }
    }
}

/// Severity, ordered from most verbose to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-object driver traffic (creation, release)
    Trace,
    /// Build progress (sources resolved, stages compiling)
    Debug,
    /// Programs linked
    Info,
    /// Recoverable surprises (duplicate stage sources)
    Warn,
    /// Failed stages, links and source resolution
    Error,
}

impl LogSeverity {
    /// Fixed-width label used by the console logger
    pub fn label(self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }

    fn colored_label(self) -> ColoredString {
        let label = self.label();
        match self {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        }
    }
}

/// Indent every line after the first by `width` spaces
///
/// Trailing newlines are dropped so driver logs do not leave blank lines.
pub fn indent_continuation(message: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    let mut lines = message.trim_end_matches('\n').lines();
    let mut out = lines.next().unwrap_or_default().to_string();
    for line in lines {
        out.push('\n');
        out.push_str(&pad);
        out.push_str(line);
    }
    out
}

/// Console logger used until another one is installed
///
/// `[time] [LEVEL] [source] message (file:line)`, where the location only
/// appears on error entries and continuation lines of multi-line messages
/// are indented by four spaces.
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let time: DateTime<Local> = entry.timestamp.into();
        let mut line = format!(
            "[{}] [{}] [{}] {}",
            time.format("%H:%M:%S%.3f"),
            entry.severity.colored_label(),
            entry.source.bright_blue(),
            indent_continuation(&entry.message, 4),
        );
        if let Some(location) = entry.location() {
            line.push_str(&format!(" ({})", location.dimmed()));
        }
        println!("{}", line);
    }
}

// ===== MACROS =====

#[doc(hidden)]
#[macro_export]
macro_rules! __lumen_log {
    ($severity:ident, $source:expr, $($arg:tt)*) => {
        $crate::lumen::Lumen::log(
            $crate::lumen::log::LogSeverity::$severity,
            $source,
            format!($($arg)*),
        )
    };
}

/// Per-object driver traffic
///
/// ```ignore
/// lumen_trace!("lumen::Owned", "Releasing {} {}", "shader", handle);
/// ```
#[macro_export]
macro_rules! lumen_trace {
    ($source:expr, $($arg:tt)*) => { $crate::__lumen_log!(Trace, $source, $($arg)*) };
}

/// Build progress
#[macro_export]
macro_rules! lumen_debug {
    ($source:expr, $($arg:tt)*) => { $crate::__lumen_log!(Debug, $source, $($arg)*) };
}

/// Successful builds
#[macro_export]
macro_rules! lumen_info {
    ($source:expr, $($arg:tt)*) => { $crate::__lumen_log!(Info, $source, $($arg)*) };
}

/// Recoverable surprises
#[macro_export]
macro_rules! lumen_warn {
    ($source:expr, $($arg:tt)*) => { $crate::__lumen_log!(Warn, $source, $($arg)*) };
}

/// Failures; records the calling `file!()` and `line!()`
///
/// ```ignore
/// lumen_error!("lumen::ShaderProgram", "Program '{}' failed to link", label);
/// ```
#[macro_export]
macro_rules! lumen_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::lumen::Lumen::log_detailed(
            $crate::lumen::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!(),
        )
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
