/// Stage kind → GL shader type mapping

use lumen_shader::lumen::StageKind;

/// GL shader type enum for a stage kind
pub fn stage_to_gl(kind: StageKind) -> u32 {
    match kind {
        StageKind::Vertex => glow::VERTEX_SHADER,
        StageKind::TessControl => glow::TESS_CONTROL_SHADER,
        StageKind::TessEvaluation => glow::TESS_EVALUATION_SHADER,
        StageKind::Geometry => glow::GEOMETRY_SHADER,
        StageKind::Fragment => glow::FRAGMENT_SHADER,
        StageKind::Compute => glow::COMPUTE_SHADER,
    }
}

#[cfg(test)]
#[path = "gl_stage_tests.rs"]
mod tests;
