/// GlShaderDriver - OpenGL implementation of the ShaderDriver trait

use std::num::NonZeroU32;
use std::rc::Rc;

use glow::HasContext;
use lumen_shader::lumen::{NativeHandle, ShaderDriver, StageKind};
use lumen_shader::{lumen_error, lumen_trace};

use crate::gl_stage::stage_to_gl;

/// OpenGL shader driver
///
/// Every call goes straight to the context; the driver holds no objects of
/// its own. `NativeHandle::NONE` is never forwarded to GL.
pub struct GlShaderDriver {
    /// GL context (shared with the caller's renderer)
    gl: Rc<glow::Context>,
}

impl GlShaderDriver {
    pub fn new(gl: Rc<glow::Context>) -> Self {
        Self { gl }
    }

    /// Underlying GL context
    pub fn context(&self) -> &Rc<glow::Context> {
        &self.gl
    }
}

pub(crate) fn to_native_shader(handle: NativeHandle) -> Option<glow::NativeShader> {
    NonZeroU32::new(handle.raw()).map(glow::NativeShader)
}

pub(crate) fn to_native_program(handle: NativeHandle) -> Option<glow::NativeProgram> {
    NonZeroU32::new(handle.raw()).map(glow::NativeProgram)
}

pub(crate) fn shader_handle(shader: glow::NativeShader) -> NativeHandle {
    NativeHandle::from_raw(shader.0.get())
}

pub(crate) fn program_handle(program: glow::NativeProgram) -> NativeHandle {
    NativeHandle::from_raw(program.0.get())
}

impl ShaderDriver for GlShaderDriver {
    fn create_shader(&self, kind: StageKind) -> NativeHandle {
        match unsafe { self.gl.create_shader(stage_to_gl(kind)) } {
            Ok(shader) => {
                lumen_trace!("lumen::gl", "glCreateShader({}) -> {}", kind, shader.0);
                shader_handle(shader)
            }
            Err(e) => {
                lumen_error!("lumen::gl", "glCreateShader({}) failed: {}", kind, e);
                NativeHandle::NONE
            }
        }
    }

    fn shader_source(&self, shader: NativeHandle, source: &str) {
        if let Some(shader) = to_native_shader(shader) {
            unsafe { self.gl.shader_source(shader, source) }
        }
    }

    fn compile_shader(&self, shader: NativeHandle) {
        if let Some(shader) = to_native_shader(shader) {
            unsafe { self.gl.compile_shader(shader) }
        }
    }

    fn shader_compile_status(&self, shader: NativeHandle) -> bool {
        to_native_shader(shader).is_some_and(|shader| unsafe { self.gl.get_shader_compile_status(shader) })
    }

    fn shader_info_log(&self, shader: NativeHandle) -> String {
        to_native_shader(shader)
            .map(|shader| unsafe { self.gl.get_shader_info_log(shader) })
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: NativeHandle) {
        if let Some(shader) = to_native_shader(shader) {
            unsafe { self.gl.delete_shader(shader) }
        }
    }

    fn is_shader(&self, shader: NativeHandle) -> bool {
        to_native_shader(shader).is_some_and(|shader| unsafe { self.gl.is_shader(shader) })
    }

    fn create_program(&self) -> NativeHandle {
        match unsafe { self.gl.create_program() } {
            Ok(program) => program_handle(program),
            Err(e) => {
                lumen_error!("lumen::gl", "glCreateProgram failed: {}", e);
                NativeHandle::NONE
            }
        }
    }

    fn attach_shader(&self, program: NativeHandle, shader: NativeHandle) {
        if let (Some(program), Some(shader)) = (to_native_program(program), to_native_shader(shader)) {
            unsafe { self.gl.attach_shader(program, shader) }
        }
    }

    fn detach_shader(&self, program: NativeHandle, shader: NativeHandle) {
        if let (Some(program), Some(shader)) = (to_native_program(program), to_native_shader(shader)) {
            unsafe { self.gl.detach_shader(program, shader) }
        }
    }

    fn link_program(&self, program: NativeHandle) {
        if let Some(program) = to_native_program(program) {
            unsafe { self.gl.link_program(program) }
        }
    }

    fn program_link_status(&self, program: NativeHandle) -> bool {
        to_native_program(program).is_some_and(|program| unsafe { self.gl.get_program_link_status(program) })
    }

    fn program_info_log(&self, program: NativeHandle) -> String {
        to_native_program(program)
            .map(|program| unsafe { self.gl.get_program_info_log(program) })
            .unwrap_or_default()
    }

    fn delete_program(&self, program: NativeHandle) {
        if let Some(program) = to_native_program(program) {
            unsafe { self.gl.delete_program(program) }
        }
    }

    fn is_program(&self, program: NativeHandle) -> bool {
        to_native_program(program).is_some_and(|program| unsafe { self.gl.is_program(program) })
    }
}

#[cfg(test)]
#[path = "gl_shader_driver_tests.rs"]
mod tests;
