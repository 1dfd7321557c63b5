/// Shader program - compiles, validates and links a set of shader stages
///
/// Building a program runs the whole sequence in one call:
///
/// 1. allocate the program object
/// 2. compile one `ShaderStage` per source, in request order
/// 3. validate: every stage compiled, and a vertex stage is present
/// 4. attach, link, then detach and release the per-stage objects
///
/// Any failure moves the program to `ProgramState::Failed`, aggregates the
/// diagnostics in request order and releases every driver object it holds.
/// A failed program is never partially usable.

use std::fmt;
use std::path::Path;

use crate::config::ProgramConfig;
use crate::driver::{NativeHandle, SharedDriver};
use crate::error::{Error, Result};
use crate::error_aggregator;
use crate::handle::{Owned, ProgramObject};
use crate::shader::{ShaderStage, StageKind};
use crate::source::{self, ShaderSources, SourceResolver};

/// Diagnostic recorded when no vertex stage is requested
pub const MISSING_VERTEX_STAGE: &str = "must at least have a vertex shading stage";

/// Lifecycle of a `ShaderProgram`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramState {
    /// Nothing requested yet
    Empty,
    /// Program object allocated, stages being compiled
    Compiling,
    /// Every stage compiled and a vertex stage is present
    Validated,
    /// Linked; the program handle is usable for drawing
    Linked,
    /// Any step failed; nothing is held
    Failed,
}

impl fmt::Display for ProgramState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Executable program built from one or more shader stages
pub struct ShaderProgram {
    // Stages drop before the program object
    stages: Vec<ShaderStage>,
    program: Owned<ProgramObject>,
    linked_kinds: Vec<StageKind>,
    failure: Option<Error>,
    state: ProgramState,
    config: ProgramConfig,
}

impl ShaderProgram {
    // ===== CONSTRUCTION =====

    /// Build a program from resolved sources with the default configuration
    pub fn build(driver: SharedDriver, sources: ShaderSources) -> Self {
        Self::build_with_config(driver, sources, ProgramConfig::default())
    }

    /// Build a program from resolved sources
    pub fn build_with_config(driver: SharedDriver, sources: ShaderSources, config: ProgramConfig) -> Self {
        let mut program = Self::empty(driver, config);
        program.run(sources);
        program
    }

    /// Resolve `resolver`, then build
    ///
    /// A resolution failure yields a `Failed` program without touching the driver.
    pub fn from_resolver(driver: SharedDriver, resolver: &SourceResolver, config: ProgramConfig) -> Self {
        match resolver.resolve() {
            Ok(sources) => Self::build_with_config(driver, sources, config),
            Err(err) => Self::unresolved(driver, config, err),
        }
    }

    /// Single vertex-stage program from source text
    pub fn from_text(driver: SharedDriver, source: impl Into<String>) -> Self {
        Self::build(driver, source::from_text(source))
    }

    /// Program from explicit files (stage inferred from each extension)
    pub fn from_paths<P: AsRef<Path>>(driver: SharedDriver, paths: &[P]) -> Self {
        let config = ProgramConfig::default();
        match source::from_paths(paths) {
            Ok(sources) => Self::build_with_config(driver, sources, config),
            Err(err) => Self::unresolved(driver, config, err),
        }
    }

    /// Program from `<base_name>.<ext>` files found in `directory`
    pub fn from_directory(driver: SharedDriver, base_name: &str, directory: impl AsRef<Path>) -> Self {
        let config = ProgramConfig::labeled(base_name);
        match source::from_directory(base_name, directory) {
            Ok(sources) => Self::build_with_config(driver, sources, config),
            Err(err) => Self::unresolved(driver, config, err),
        }
    }

    /// Program from explicit stage → source pairs
    pub fn from_map<I, S>(driver: SharedDriver, pairs: I) -> Self
    where
        I: IntoIterator<Item = (StageKind, S)>,
        S: Into<String>,
    {
        Self::build(driver, source::from_map(pairs))
    }

    fn empty(driver: SharedDriver, config: ProgramConfig) -> Self {
        Self {
            stages: Vec::new(),
            program: Owned::empty(driver),
            linked_kinds: Vec::new(),
            failure: None,
            state: ProgramState::Empty,
            config,
        }
    }

    fn unresolved(driver: SharedDriver, config: ProgramConfig, err: Error) -> Self {
        let mut program = Self::empty(driver, config);
        program.fail(err);
        program
    }

    // ===== STATE MACHINE =====

    fn run(&mut self, sources: ShaderSources) {
        let driver = self.program.driver().clone();

        // No sources: fail before touching the driver
        if sources.is_empty() {
            self.fail(Error::MissingRequiredStage(format!(
                "program '{}' {}", self.config.label, MISSING_VERTEX_STAGE)));
            return;
        }

        // Empty -> Compiling
        let handle = driver.create_program();
        if handle.is_none() {
            let err = Error::ObjectCreationFailure(format!(
                "driver could not create a program object for '{}'", self.config.label));
            self.fail(err);
            return;
        }
        self.program = Owned::new(driver.clone(), handle);
        self.state = ProgramState::Compiling;

        crate::lumen_debug!("lumen::ShaderProgram",
            "Compiling {} stages for '{}'", sources.len(), self.config.label);
        for (kind, text) in sources {
            self.stages.push(ShaderStage::compile_with_config(driver.clone(), kind, text, &self.config));
        }

        // Compiling -> Validated
        if let Err(err) = self.validate() {
            self.fail(err);
            return;
        }
        self.state = ProgramState::Validated;

        // Validated -> Linked
        self.link();
    }

    fn validate(&self) -> Result<()> {
        let failures: Vec<&Error> = self.stages.iter().filter_map(ShaderStage::diagnostic).collect();
        if let Some(first) = failures.first() {
            let message = error_aggregator::aggregate(failures.iter().copied()).unwrap_or_default();
            return Err(match first {
                Error::ObjectCreationFailure(_) => Error::ObjectCreationFailure(message),
                _ => Error::CompileFailure(message),
            });
        }

        if !self.stages.iter().any(|stage| stage.kind() == StageKind::Vertex) {
            return Err(Error::MissingRequiredStage(format!(
                "program '{}' {}", self.config.label, MISSING_VERTEX_STAGE)));
        }
        Ok(())
    }

    fn link(&mut self) {
        let driver = self.program.driver().clone();
        let handle = self.program.handle();

        for stage in &self.stages {
            driver.attach_shader(handle, stage.handle());
        }
        driver.link_program(handle);
        let linked = driver.program_link_status(handle);
        let log = if linked { String::new() } else { driver.program_info_log(handle) };

        // The program keeps its own copy of the linked code
        for stage in &self.stages {
            driver.detach_shader(handle, stage.handle());
        }

        if !linked {
            self.fail(Error::LinkFailure(format!(
                "program '{}' failed to link:\n{}", self.config.label, log.trim_end())));
            return;
        }

        self.linked_kinds = self.stages.iter().map(ShaderStage::kind).collect();
        self.stages.clear();
        self.state = ProgramState::Linked;
        crate::lumen_info!("lumen::ShaderProgram",
            "Program '{}' linked as {} ({} stages)", self.config.label, handle, self.linked_kinds.len());
    }

    /// Enter `Failed`: release every stage and the program object
    fn fail(&mut self, err: Error) {
        crate::lumen_error!("lumen::ShaderProgram",
            "Program '{}' failed in state {}: {}", self.config.label, self.state, err);
        self.stages.clear();
        self.program.release();
        self.linked_kinds.clear();
        self.failure = Some(err);
        self.state = ProgramState::Failed;
    }

    // ===== PUBLIC CONTRACT =====

    /// True iff the program linked
    pub fn is_valid(&self) -> bool {
        self.state == ProgramState::Linked
    }

    /// Native program for draw calls (`NONE` unless linked)
    pub fn native_handle(&self) -> NativeHandle {
        if self.is_valid() {
            self.program.handle()
        } else {
            NativeHandle::NONE
        }
    }

    /// Human-readable failure text (empty unless failed)
    pub fn diagnostic(&self) -> &str {
        self.failure.as_ref().map(Error::message).unwrap_or("")
    }

    /// Typed failure (only in `Failed`)
    pub fn error(&self) -> Option<&Error> {
        self.failure.as_ref()
    }

    pub fn state(&self) -> ProgramState {
        self.state
    }

    /// Stage kinds the program was linked from (empty unless linked)
    pub fn stage_kinds(&self) -> &[StageKind] {
        &self.linked_kinds
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }
}

impl fmt::Debug for ShaderProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("label", &self.config.label)
            .field("state", &self.state)
            .field("handle", &self.program.handle())
            .field("stages", &self.linked_kinds)
            .finish()
    }
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;
