/*!
# Lumen Shader - OpenGL Backend

OpenGL implementation of the `ShaderDriver` seam from `lumen_shader`,
built on the glow bindings.

The caller owns the GL context and must keep it current on the calling
thread for as long as programs built through this driver are alive.

```no_run
use std::rc::Rc;
use lumen_shader::lumen::{ShaderProgram, SharedDriver};
use lumen_shader_gl::GlShaderDriver;

# fn with_context(gl: glow::Context) {
let driver: SharedDriver = Rc::new(GlShaderDriver::new(Rc::new(gl)));
let program = ShaderProgram::from_text(driver, "#version 330 core\nvoid main() {}\n");
assert!(program.is_valid());
# }
```
*/

mod gl_shader_driver;
mod gl_stage;

pub use gl_shader_driver::GlShaderDriver;
pub use gl_stage::stage_to_gl;
