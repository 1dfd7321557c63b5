//! Error types for the Lumen shader core
//!
//! This module defines the failure taxonomy shared by shader stages,
//! source resolution and program linking.

use std::fmt;

/// Result type for Lumen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Lumen shader errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The driver refused to allocate a shader or program object
    ObjectCreationFailure(String),

    /// A stage failed to compile (driver log plus offending source)
    CompileFailure(String),

    /// No vertex stage among the compiled stages, or no sources at all
    MissingRequiredStage(String),

    /// The driver rejected linking an otherwise valid set of stages
    LinkFailure(String),

    /// Reading a path or scanning a directory failed
    SourceResolutionFailure(String),

    /// Sentinel held by a stage whose resource was transferred away
    Moved,
}

impl Error {
    /// Payload text without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            Error::ObjectCreationFailure(msg)
            | Error::CompileFailure(msg)
            | Error::MissingRequiredStage(msg)
            | Error::LinkFailure(msg)
            | Error::SourceResolutionFailure(msg) => msg,
            Error::Moved => "stage was moved",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ObjectCreationFailure(msg) => write!(f, "Object creation failed: {}", msg),
            Error::CompileFailure(msg) => write!(f, "Compile failure: {}", msg),
            Error::MissingRequiredStage(msg) => write!(f, "Missing required stage: {}", msg),
            Error::LinkFailure(msg) => write!(f, "Link failure: {}", msg),
            Error::SourceResolutionFailure(msg) => write!(f, "Source resolution failed: {}", msg),
            Error::Moved => write!(f, "Stage was moved"),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an error and build the matching `Error` variant
///
/// # Example
///
/// ```no_run
/// # use lumen_shader::lumen_err;
/// let err = lumen_err!("lumen::ShaderProgram", LinkFailure, "link rejected: {}", "log");
/// ```
#[macro_export]
macro_rules! lumen_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::lumen_error!($source, "{}", message);
        $crate::lumen::Error::$variant(message)
    }};
}

/// Log an error and return it from the current function
#[macro_export]
macro_rules! lumen_bail {
    ($source:expr, $variant:ident, $($arg:tt)*) => {
        return Err($crate::lumen_err!($source, $variant, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
