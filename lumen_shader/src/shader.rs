/// Shader stages - one compiled shading-stage resource per `ShaderStage`

use std::fmt;

use crate::config::ProgramConfig;
use crate::driver::{NativeHandle, SharedDriver};
use crate::error::Error;
use crate::handle::{Owned, ShaderObject};

// ============================================================================
// Stage kinds
// ============================================================================

/// Pipeline stage a shader object is compiled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StageKind {
    /// Vertex shader (required by every program)
    Vertex,
    /// Tessellation control shader
    TessControl,
    /// Tessellation evaluation shader
    TessEvaluation,
    /// Geometry shader
    Geometry,
    /// Fragment/Pixel shader
    Fragment,
    /// Compute shader
    Compute,
}

/// File extension → stage table, in pipeline order
///
/// Both explicit paths and directory scans classify files through this table.
pub const STAGE_EXTENSIONS: [(&str, StageKind); 6] = [
    ("vert", StageKind::Vertex),
    ("tesc", StageKind::TessControl),
    ("tese", StageKind::TessEvaluation),
    ("geom", StageKind::Geometry),
    ("frag", StageKind::Fragment),
    ("comp", StageKind::Compute),
];

impl StageKind {
    /// Stage for a file extension (without the dot), if supported
    pub fn from_extension(extension: &str) -> Option<StageKind> {
        STAGE_EXTENSIONS
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|&(_, kind)| kind)
    }

    /// Canonical file extension for this stage
    pub fn extension(self) -> &'static str {
        STAGE_EXTENSIONS
            .iter()
            .find(|&&(_, kind)| kind == self)
            .map(|&(ext, _)| ext)
            .unwrap_or_default()
    }

    /// Position in the extension table (pipeline order)
    pub fn pipeline_index(self) -> usize {
        STAGE_EXTENSIONS
            .iter()
            .position(|&(_, kind)| kind == self)
            .unwrap_or(STAGE_EXTENSIONS.len())
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageKind::Vertex => "vertex",
            StageKind::TessControl => "tessellation control",
            StageKind::TessEvaluation => "tessellation evaluation",
            StageKind::Geometry => "geometry",
            StageKind::Fragment => "fragment",
            StageKind::Compute => "compute",
        };
        f.write_str(name)
    }
}

// ============================================================================
// ShaderStage
// ============================================================================

/// One compiled (or failed) shading stage
///
/// Either holds a live shader object and no diagnostic, or holds no object and
/// exactly one diagnostic. The shader object is released when the stage is
/// dropped, unless it was released or transferred before.
#[derive(Debug)]
pub struct ShaderStage {
    kind: StageKind,
    resource: Owned<ShaderObject>,
    source: String,
    diagnostic: Option<Error>,
}

impl ShaderStage {
    /// Compile `source` as a `kind` stage with the default configuration
    pub fn compile(driver: SharedDriver, kind: StageKind, source: impl Into<String>) -> Self {
        Self::compile_with_config(driver, kind, source, &ProgramConfig::default())
    }

    /// Compile `source` as a `kind` stage
    ///
    /// Never fails outright: a failure is recorded in `diagnostic()` and the
    /// stage holds no driver object.
    pub fn compile_with_config(
        driver: SharedDriver,
        kind: StageKind,
        source: impl Into<String>,
        config: &ProgramConfig,
    ) -> Self {
        let source = source.into();

        if source.is_empty() {
            let err = crate::lumen_err!("lumen::ShaderStage",
                CompileFailure, "{} stage failed to compile: source is empty", kind);
            return Self::failed(driver, kind, source, err);
        }

        let handle = driver.create_shader(kind);
        if handle.is_none() {
            let err = crate::lumen_err!("lumen::ShaderStage",
                ObjectCreationFailure, "driver could not create a {} shader object", kind);
            return Self::failed(driver, kind, source, err);
        }

        let mut resource = Owned::<ShaderObject>::new(driver.clone(), handle);
        crate::lumen_trace!("lumen::ShaderStage",
            "Compiling {} stage {} ({} bytes)", kind, handle, source.len());

        driver.shader_source(handle, &source);
        driver.compile_shader(handle);
        if driver.shader_compile_status(handle) {
            return Self {
                kind,
                resource,
                source,
                diagnostic: None,
            };
        }

        let log = driver.shader_info_log(handle);
        resource.release();

        let mut message = format!("{} stage failed to compile:\n{}", kind, log.trim_end());
        if config.include_source_in_diagnostics {
            message.push_str(&format!("\n--- {} source ---\n{}", kind, source));
        }
        crate::lumen_error!("lumen::ShaderStage", "{} stage failed to compile: {}", kind, log.trim_end());

        Self {
            kind,
            resource,
            source,
            diagnostic: Some(Error::CompileFailure(message)),
        }
    }

    fn failed(driver: SharedDriver, kind: StageKind, source: String, err: Error) -> Self {
        Self {
            kind,
            resource: Owned::empty(driver),
            source,
            diagnostic: Some(err),
        }
    }

    // ===== ACCESSORS =====

    pub fn kind(&self) -> StageKind {
        self.kind
    }

    /// Native shader object (`NONE` if failed, released or transferred)
    pub fn handle(&self) -> NativeHandle {
        self.resource.handle()
    }

    /// Whether the stage holds a usable compiled object
    pub fn is_compiled(&self) -> bool {
        self.resource.is_live()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Failure recorded for this stage, if any
    pub fn diagnostic(&self) -> Option<&Error> {
        self.diagnostic.as_ref()
    }

    // ===== OWNERSHIP =====

    /// Transfer this stage into a new owner
    ///
    /// `self` keeps its kind but holds no object afterwards, and its
    /// diagnostic becomes `Error::Moved`, so dropping it releases nothing.
    pub fn take(&mut self) -> ShaderStage {
        ShaderStage {
            kind: self.kind,
            resource: self.resource.take(),
            source: std::mem::take(&mut self.source),
            diagnostic: std::mem::replace(&mut self.diagnostic, Some(Error::Moved)),
        }
    }
}

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;
