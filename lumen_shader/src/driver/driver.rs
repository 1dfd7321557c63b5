/// ShaderDriver trait - the native driver seam

use std::fmt;
use std::rc::Rc;

use crate::shader::StageKind;

// ============================================================================
// Native handle
// ============================================================================

/// Opaque integer identifier returned by the driver (0 = none)
///
/// A plain value: copying it never duplicates ownership and dropping it never
/// releases anything. Ownership lives in [`crate::handle::Owned`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NativeHandle(u32);

impl NativeHandle {
    /// The "no resource" handle
    pub const NONE: NativeHandle = NativeHandle(0);

    /// Wrap a raw driver name
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw driver name
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Whether this is the "no resource" handle
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// ShaderDriver trait
// ============================================================================

/// Shared driver reference held by every owned resource
///
/// `Rc` keeps programs on the thread that owns the rendering context.
pub type SharedDriver = Rc<dyn ShaderDriver>;

/// Native shader driver
///
/// Implemented by backend-specific drivers (e.g., `GlShaderDriver`) and by the
/// headless `MockShaderDriver`. Every call blocks; callers serialize access to
/// one logical rendering context.
pub trait ShaderDriver {
    // ===== SHADER OBJECTS =====

    /// Allocate a shader object for `kind`
    ///
    /// # Returns
    ///
    /// The new handle, or `NativeHandle::NONE` if the driver refused
    fn create_shader(&self, kind: StageKind) -> NativeHandle;

    /// Upload source text to a shader object
    fn shader_source(&self, shader: NativeHandle, source: &str);

    /// Request compilation of the uploaded source
    fn compile_shader(&self, shader: NativeHandle);

    /// Whether the last compilation succeeded
    fn shader_compile_status(&self, shader: NativeHandle) -> bool;

    /// Driver diagnostic log of the last compilation
    fn shader_info_log(&self, shader: NativeHandle) -> String;

    /// Release a shader object
    fn delete_shader(&self, shader: NativeHandle);

    /// Whether `shader` names a live shader object
    fn is_shader(&self, shader: NativeHandle) -> bool;

    // ===== PROGRAM OBJECTS =====

    /// Allocate a program object (`NativeHandle::NONE` if refused)
    fn create_program(&self) -> NativeHandle;

    fn attach_shader(&self, program: NativeHandle, shader: NativeHandle);

    fn detach_shader(&self, program: NativeHandle, shader: NativeHandle);

    /// Request linking of all attached shaders
    fn link_program(&self, program: NativeHandle);

    /// Whether the last link succeeded
    fn program_link_status(&self, program: NativeHandle) -> bool;

    /// Driver diagnostic log of the last link
    fn program_info_log(&self, program: NativeHandle) -> String;

    /// Release a program object
    fn delete_program(&self, program: NativeHandle);

    /// Whether `program` names a live program object
    fn is_program(&self, program: NativeHandle) -> bool;
}
