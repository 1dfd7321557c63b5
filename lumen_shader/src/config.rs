/// Program configuration

/// Options applied while building a `ShaderProgram`
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Name used in log lines for this program
    pub label: String,
    /// Append the offending source text to compile diagnostics
    pub include_source_in_diagnostics: bool,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            label: "unnamed".to_string(),
            include_source_in_diagnostics: true,
        }
    }
}

impl ProgramConfig {
    /// Default configuration with a label
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }
}
