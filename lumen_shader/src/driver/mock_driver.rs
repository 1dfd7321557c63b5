/// Mock ShaderDriver (no GPU required)
///
/// A headless driver that follows GL object semantics closely enough to
/// exercise the whole compile/validate/link/cleanup sequence: handles are
/// allocated from one name space, compile and link produce driver-style logs,
/// and every release is counted so tests can prove exactly-once teardown.
///
/// Compile rule: the source must declare `main`, and the characters `@`, `$`
/// and `` ` `` are syntax errors (reported with line number and token).
/// Link rule: every attached shader must be compiled, a kind may appear once,
/// and compute cannot be mixed with graphics stages.

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use crate::driver::{NativeHandle, ShaderDriver};
use crate::shader::StageKind;

/// Characters the mock compiler rejects
const INVALID_CHARS: [char; 3] = ['@', '$', '`'];

// ============================================================================
// Internal state
// ============================================================================

#[derive(Debug)]
struct MockShader {
    kind: StageKind,
    source: String,
    compiled: bool,
    info_log: String,
}

#[derive(Debug, Default)]
struct MockProgram {
    attached: Vec<NativeHandle>,
    linked: bool,
    info_log: String,
}

#[derive(Debug, Default)]
struct MockState {
    next_name: u32,
    shaders: FxHashMap<NativeHandle, MockShader>,
    programs: FxHashMap<NativeHandle, MockProgram>,
    release_counts: FxHashMap<NativeHandle, u32>,
    invalid_releases: u32,
    calls: Vec<&'static str>,
    fail_shader_creation: bool,
    fail_program_creation: bool,
    fail_link: bool,
}

impl MockState {
    fn alloc_name(&mut self) -> NativeHandle {
        self.next_name += 1;
        NativeHandle::from_raw(self.next_name)
    }

    fn record_release(&mut self, handle: NativeHandle, removed: bool) {
        if removed {
            *self.release_counts.entry(handle).or_insert(0) += 1;
        } else {
            self.invalid_releases += 1;
        }
    }
}

// ============================================================================
// MockShaderDriver
// ============================================================================

/// Headless shader driver with failure injection and release bookkeeping
#[derive(Debug, Default)]
pub struct MockShaderDriver {
    state: RefCell<MockState>,
}

impl MockShaderDriver {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== FAILURE INJECTION =====

    /// Make `create_shader` return `NONE`
    pub fn set_fail_shader_creation(&self, fail: bool) {
        self.state.borrow_mut().fail_shader_creation = fail;
    }

    /// Make `create_program` return `NONE`
    pub fn set_fail_program_creation(&self, fail: bool) {
        self.state.borrow_mut().fail_program_creation = fail;
    }

    /// Make every link fail with an injected log
    pub fn set_fail_link(&self, fail: bool) {
        self.state.borrow_mut().fail_link = fail;
    }

    // ===== BOOKKEEPING =====

    /// Number of live shader objects
    pub fn live_shader_count(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    /// Number of live program objects
    pub fn live_program_count(&self) -> usize {
        self.state.borrow().programs.len()
    }

    /// How many times `handle` was released (0 if never)
    pub fn release_count(&self, handle: NativeHandle) -> u32 {
        self.state.borrow().release_counts.get(&handle).copied().unwrap_or(0)
    }

    /// Releases of handles that were not live (double release or garbage)
    pub fn invalid_release_count(&self) -> u32 {
        self.state.borrow().invalid_releases
    }

    /// Names of every driver call made so far, in order
    pub fn calls(&self) -> Vec<&'static str> {
        self.state.borrow().calls.clone()
    }

    /// Source last uploaded to a live shader
    pub fn shader_source_text(&self, shader: NativeHandle) -> Option<String> {
        self.state.borrow().shaders.get(&shader).map(|s| s.source.clone())
    }

    /// Shaders currently attached to a live program
    pub fn attached_shaders(&self, program: NativeHandle) -> Vec<NativeHandle> {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|p| p.attached.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: &'static str) -> std::cell::RefMut<'_, MockState> {
        let mut state = self.state.borrow_mut();
        state.calls.push(call);
        state
    }
}

/// Produce a driver-style compile log, or `None` if the source compiles
fn check_source(source: &str) -> Option<String> {
    for (index, line) in source.lines().enumerate() {
        if let Some(token) = line
            .split_whitespace()
            .find(|word| word.contains(INVALID_CHARS))
        {
            return Some(format!(
                "0:{}: error: syntax error, unexpected token '{}'",
                index + 1,
                token
            ));
        }
    }
    if !source.contains("main") {
        return Some("0:0: error: missing entry point 'main'".to_string());
    }
    None
}

impl ShaderDriver for MockShaderDriver {
    fn create_shader(&self, kind: StageKind) -> NativeHandle {
        let mut state = self.record("create_shader");
        if state.fail_shader_creation {
            return NativeHandle::NONE;
        }
        let handle = state.alloc_name();
        state.shaders.insert(
            handle,
            MockShader {
                kind,
                source: String::new(),
                compiled: false,
                info_log: String::new(),
            },
        );
        handle
    }

    fn shader_source(&self, shader: NativeHandle, source: &str) {
        let mut state = self.record("shader_source");
        if let Some(s) = state.shaders.get_mut(&shader) {
            s.source = source.to_string();
        }
    }

    fn compile_shader(&self, shader: NativeHandle) {
        let mut state = self.record("compile_shader");
        if let Some(s) = state.shaders.get_mut(&shader) {
            match check_source(&s.source) {
                Some(log) => {
                    s.compiled = false;
                    s.info_log = log;
                }
                None => {
                    s.compiled = true;
                    s.info_log.clear();
                }
            }
        }
    }

    fn shader_compile_status(&self, shader: NativeHandle) -> bool {
        let state = self.record("shader_compile_status");
        state.shaders.get(&shader).is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: NativeHandle) -> String {
        let state = self.record("shader_info_log");
        state.shaders.get(&shader).map(|s| s.info_log.clone()).unwrap_or_default()
    }

    fn delete_shader(&self, shader: NativeHandle) {
        let mut state = self.record("delete_shader");
        let removed = state.shaders.remove(&shader).is_some();
        state.record_release(shader, removed);
    }

    fn is_shader(&self, shader: NativeHandle) -> bool {
        self.state.borrow().shaders.contains_key(&shader)
    }

    fn create_program(&self) -> NativeHandle {
        let mut state = self.record("create_program");
        if state.fail_program_creation {
            return NativeHandle::NONE;
        }
        let handle = state.alloc_name();
        state.programs.insert(handle, MockProgram::default());
        handle
    }

    fn attach_shader(&self, program: NativeHandle, shader: NativeHandle) {
        let mut state = self.record("attach_shader");
        if let Some(p) = state.programs.get_mut(&program) {
            if !p.attached.contains(&shader) {
                p.attached.push(shader);
            }
        }
    }

    fn detach_shader(&self, program: NativeHandle, shader: NativeHandle) {
        let mut state = self.record("detach_shader");
        if let Some(p) = state.programs.get_mut(&program) {
            p.attached.retain(|&h| h != shader);
        }
    }

    fn link_program(&self, program: NativeHandle) {
        let mut state = self.record("link_program");
        let Some(attached) = state.programs.get(&program).map(|p| p.attached.clone()) else {
            return;
        };

        let mut kinds = Vec::new();
        let mut error = if state.fail_link {
            Some("error: link rejected by driver".to_string())
        } else {
            None
        };
        for shader in &attached {
            match state.shaders.get(shader) {
                Some(s) if !s.compiled => {
                    error.get_or_insert_with(|| format!("error: shader {} is not compiled", shader));
                }
                Some(s) => {
                    if kinds.contains(&s.kind) {
                        error.get_or_insert_with(|| format!("error: more than one {} shader attached", s.kind));
                    }
                    kinds.push(s.kind);
                }
                None => {
                    error.get_or_insert_with(|| format!("error: shader {} does not exist", shader));
                }
            }
        }
        if kinds.contains(&StageKind::Compute) && kinds.len() > 1 {
            error.get_or_insert_with(|| "error: compute shader cannot be linked with graphics stages".to_string());
        }

        if let Some(p) = state.programs.get_mut(&program) {
            p.linked = error.is_none();
            p.info_log = error.unwrap_or_default();
        }
    }

    fn program_link_status(&self, program: NativeHandle) -> bool {
        let state = self.record("program_link_status");
        state.programs.get(&program).is_some_and(|p| p.linked)
    }

    fn program_info_log(&self, program: NativeHandle) -> String {
        let state = self.record("program_info_log");
        state.programs.get(&program).map(|p| p.info_log.clone()).unwrap_or_default()
    }

    fn delete_program(&self, program: NativeHandle) {
        let mut state = self.record("delete_program");
        let removed = state.programs.remove(&program).is_some();
        state.record_release(program, removed);
    }

    fn is_program(&self, program: NativeHandle) -> bool {
        self.state.borrow().programs.contains_key(&program)
    }
}

#[cfg(test)]
#[path = "mock_driver_tests.rs"]
mod tests;
