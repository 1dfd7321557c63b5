/*!
# Lumen Shader

Compilation, validation, linking and teardown of GPU shader programs.

This crate owns the lifecycle of shader and program objects behind a small
driver seam. Backends (OpenGL via `lumen_shader_gl`, or the headless
`MockShaderDriver`) implement the `ShaderDriver` trait; this crate decides
what to allocate, when to release it, and how failures are reported.

## Architecture

- **ShaderDriver**: native driver trait (create/compile/link/delete)
- **Owned**: move-only owner releasing one driver object exactly once
- **ShaderStage**: one compiled stage (or its diagnostic)
- **SourceResolver**: text, explicit paths, directory scan or explicit map
- **ShaderProgram**: validate → link → cleanup state machine
- **error_aggregator**: deterministic concatenation of stage diagnostics
*/

// Internal modules
mod error;
mod facade;
mod config;
pub mod log;
pub mod driver;
pub mod handle;
pub mod shader;
pub mod source;
pub mod program;
pub mod error_aggregator;

// Main lumen namespace module
pub mod lumen {
    // Error types
    pub use crate::error::{Error, Result};

    // Logger facade
    pub use crate::facade::Lumen;

    // Configuration
    pub use crate::config::ProgramConfig;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, indent_continuation};
    }

    // Driver seam and handles
    pub use crate::driver::{NativeHandle, ShaderDriver, SharedDriver, MockShaderDriver};
    pub use crate::handle::{Owned, ResourceKind, ShaderObject, ProgramObject};

    // Stages, sources and programs
    pub use crate::shader::{ShaderStage, StageKind, STAGE_EXTENSIONS};
    pub use crate::source::{ShaderSources, SourceResolver};
    pub use crate::program::{ShaderProgram, ProgramState, MISSING_VERTEX_STAGE};
    pub use crate::error_aggregator::{aggregate, DIAGNOSTIC_SEPARATOR};
}
