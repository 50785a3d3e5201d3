/// Mock GraphicsContext for unit tests (no GPU required)
///
/// Records every call in order and performs a small reflection of the
/// compilation unit it is given:
/// - the leading `<type> <name>[<n>];` lines are the program's globals
/// - a global is referenced when its name appears as a word after them
/// - sampler globals get texture units in declaration order
/// - extra globals registered with `with_extra_global` are appended, or
///   override the class of a declared global with the same name
/// - compilation fails (compiler error, null program) when the entry point
///   does not appear in the source, and with an `Other` error when the
///   profile is unknown

use std::cell::RefCell;
use rustc_hash::FxHashMap;

use crate::context::{
    GraphicsContext, ParameterClass, ParameterHandle, ParameterUpload, Profile,
    ProgramCreation, ProgramDesc, ProgramHandle, ProgramParameter, CompileError,
    CompileErrorKind, SamplerState, ShaderStage,
};

// ============================================================================
// Profiles known to the mock
// ============================================================================

pub const ARBVP1: Profile = Profile::new(1);
pub const VP40: Profile = Profile::new(2);
pub const ARBFP1: Profile = Profile::new(3);
pub const FP40: Profile = Profile::new(4);

// ============================================================================
// Recorded calls
// ============================================================================

/// Owned copy of a `ParameterUpload`
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedUpload {
    Int1(i32),
    IntArray(Vec<i32>),
    Float1(f32),
    FloatArray(Vec<f32>),
    Float2([f32; 2]),
    Float3([f32; 3]),
    Float4([f32; 4]),
    Float4Array(Vec<[f32; 4]>),
    Matrix4([f32; 16]),
    Matrix4Array(Vec<[f32; 16]>),
}

impl From<ParameterUpload<'_>> for RecordedUpload {
    fn from(upload: ParameterUpload<'_>) -> Self {
        match upload {
            ParameterUpload::Int1(v) => RecordedUpload::Int1(v),
            ParameterUpload::IntArray(v) => RecordedUpload::IntArray(v.to_vec()),
            ParameterUpload::Float1(v) => RecordedUpload::Float1(v),
            ParameterUpload::FloatArray(v) => RecordedUpload::FloatArray(v.to_vec()),
            ParameterUpload::Float2(v) => RecordedUpload::Float2(v),
            ParameterUpload::Float3(v) => RecordedUpload::Float3(v),
            ParameterUpload::Float4(v) => RecordedUpload::Float4(v),
            ParameterUpload::Float4Array(v) => RecordedUpload::Float4Array(v.to_vec()),
            ParameterUpload::Matrix4(v) => RecordedUpload::Matrix4(v),
            ParameterUpload::Matrix4Array(v) => RecordedUpload::Matrix4Array(v.to_vec()),
        }
    }
}

/// One call made against the mock, in order
#[derive(Debug, Clone, PartialEq)]
pub enum ContextCall {
    CreateProgram { stage: ShaderStage, profile: Profile, entry_point: String },
    LoadProgram(ProgramHandle),
    DestroyProgram(ProgramHandle),
    BindProgram(ProgramHandle),
    EnableProfile(Profile),
    DisableProfile(Profile),
    SetParameter { name: String, upload: RecordedUpload },
    SetSampler { unit: u32, sampler: SamplerState },
    DisableSampler(u32),
}

// ============================================================================
// Mock state
// ============================================================================

struct MockProgram {
    source: String,
    parameters: Vec<ProgramParameter>,
}

struct MockParameter {
    name: String,
    texture_unit: u32,
}

#[derive(Default)]
struct MockState {
    calls: Vec<ContextCall>,
    programs: FxHashMap<ProgramHandle, MockProgram>,
    parameters: FxHashMap<ParameterHandle, MockParameter>,
    next_handle: u64,
    extra_globals: Vec<(String, ParameterClass)>,
}

impl MockState {
    fn allocate(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

/// A global declaration line of the compilation unit
struct Declaration {
    type_name: String,
    name: String,
    array_size: u32,
}

fn parse_declaration(line: &str) -> Option<Declaration> {
    let body = line.trim().strip_suffix(';')?;
    let mut parts = body.split_whitespace();
    let type_name = parts.next()?;
    let declarator = parts.next()?;
    if parts.next().is_some() || declarator.contains('(') {
        return None;
    }
    let (name, array_size) = match declarator.split_once('[') {
        Some((name, rest)) => (name, rest.strip_suffix(']')?.parse().ok()?),
        None => (declarator, 0),
    };
    Some(Declaration {
        type_name: type_name.to_string(),
        name: name.to_string(),
        array_size,
    })
}

/// Split a compilation unit into its leading declarations and the rest
fn reflect(source: &str) -> (Vec<Declaration>, String) {
    let mut declarations = Vec::new();
    let mut lines = source.lines().peekable();
    while let Some(decl) = lines.peek().and_then(|line| parse_declaration(line)) {
        declarations.push(decl);
        lines.next();
    }
    let body: Vec<&str> = lines.collect();
    (declarations, body.join("\n"))
}

fn class_of(type_name: &str, array_size: u32) -> ParameterClass {
    if array_size > 0 {
        return ParameterClass::Array;
    }
    match type_name {
        "bool" | "int" | "float" => ParameterClass::Scalar,
        "float2" | "float3" | "float4" => ParameterClass::Vector,
        "float4x4" => ParameterClass::Matrix,
        "sampler" => ParameterClass::Sampler,
        _ => ParameterClass::Struct,
    }
}

/// Whole-identifier search
pub fn contains_word(text: &str, word: &str) -> bool {
    let is_ident = |c: char| c.is_ascii_alphanumeric() || c == '_';
    text.match_indices(word).any(|(i, _)| {
        let before = text[..i].chars().next_back();
        let after = text[i + word.len()..].chars().next();
        !before.map_or(false, is_ident) && !after.map_or(false, is_ident)
    })
}

// ============================================================================
// MockContext
// ============================================================================

pub struct MockContext {
    state: RefCell<MockState>,
}

impl MockContext {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(MockState::default()),
        }
    }

    /// Report a global of the given class in every program
    ///
    /// A declared global of the same name takes this class instead.
    pub fn with_extra_global(self, name: &str, class: ParameterClass) -> Self {
        self.state.borrow_mut().extra_globals.push((name.to_string(), class));
        self
    }

    pub fn calls(&self) -> Vec<ContextCall> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// `SetParameter` calls only, as (parameter name, upload)
    pub fn parameter_pushes(&self) -> Vec<(String, RecordedUpload)> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                ContextCall::SetParameter { name, upload } => Some((name.clone(), upload.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn live_program_count(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn program_source(&self, program: ProgramHandle) -> Option<String> {
        self.state.borrow().programs.get(&program).map(|p| p.source.clone())
    }

    fn record(&self, call: ContextCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl Default for MockContext {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsContext for MockContext {
    fn latest_profile(&self, stage: ShaderStage) -> Profile {
        match stage {
            ShaderStage::Vertex => VP40,
            ShaderStage::Fragment => FP40,
        }
    }

    fn profile_by_name(&self, name: &str) -> Profile {
        match name {
            "arbvp1" => ARBVP1,
            "vp40" => VP40,
            "arbfp1" => ARBFP1,
            "fp40" => FP40,
            _ => Profile::UNKNOWN,
        }
    }

    fn create_program(&self, desc: &ProgramDesc<'_>) -> ProgramCreation {
        self.record(ContextCall::CreateProgram {
            stage: desc.stage,
            profile: desc.profile,
            entry_point: desc.entry_point.to_string(),
        });

        if !desc.profile.is_known() {
            return ProgramCreation {
                program: ProgramHandle::NULL,
                error: Some(CompileError {
                    kind: CompileErrorKind::Other,
                    message: "The profile is not supported".to_string(),
                    listing: None,
                }),
            };
        }

        let (declarations, body) = reflect(desc.source);
        if !contains_word(&body, desc.entry_point) {
            return ProgramCreation {
                program: ProgramHandle::NULL,
                error: Some(CompileError {
                    kind: CompileErrorKind::Compiler,
                    message: "The compile returned an error".to_string(),
                    listing: Some(format!(
                        "error: entry point '{}' not found in {} lines",
                        desc.entry_point,
                        desc.source.lines().count()
                    )),
                }),
            };
        }

        let mut state = self.state.borrow_mut();
        let program = ProgramHandle::new(state.allocate());

        let mut globals: Vec<(String, ParameterClass)> = declarations
            .iter()
            .map(|d| (d.name.clone(), class_of(&d.type_name, d.array_size)))
            .collect();
        for (name, class) in &state.extra_globals {
            match globals.iter_mut().find(|(declared, _)| declared == name) {
                Some(global) => global.1 = *class,
                None => globals.push((name.clone(), *class)),
            }
        }

        let mut parameters = Vec::with_capacity(globals.len());
        let mut next_unit = 0;
        for (name, class) in globals {
            let handle = ParameterHandle::new(state.allocate());
            let texture_unit = if class == ParameterClass::Sampler {
                next_unit += 1;
                next_unit - 1
            } else {
                0
            };
            state.parameters.insert(handle, MockParameter { name: name.clone(), texture_unit });
            parameters.push(ProgramParameter {
                handle,
                referenced: contains_word(&body, &name),
                name,
                class,
            });
        }

        state.programs.insert(program, MockProgram {
            source: desc.source.to_string(),
            parameters,
        });

        ProgramCreation { program, error: None }
    }

    fn load_program(&self, program: ProgramHandle) {
        self.record(ContextCall::LoadProgram(program));
    }

    fn destroy_program(&self, program: ProgramHandle) {
        self.record(ContextCall::DestroyProgram(program));
        let mut state = self.state.borrow_mut();
        if let Some(removed) = state.programs.remove(&program) {
            for parameter in removed.parameters {
                state.parameters.remove(&parameter.handle);
            }
        }
    }

    fn global_parameters(&self, program: ProgramHandle) -> Vec<ProgramParameter> {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|p| p.parameters.clone())
            .unwrap_or_default()
    }

    fn bind_program(&self, program: ProgramHandle) {
        self.record(ContextCall::BindProgram(program));
    }

    fn enable_profile(&self, profile: Profile) {
        self.record(ContextCall::EnableProfile(profile));
    }

    fn disable_profile(&self, profile: Profile) {
        self.record(ContextCall::DisableProfile(profile));
    }

    fn set_parameter(&self, parameter: ParameterHandle, value: ParameterUpload<'_>) {
        let name = self
            .state
            .borrow()
            .parameters
            .get(&parameter)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "<invalid>".to_string());
        self.record(ContextCall::SetParameter { name, upload: value.into() });
    }

    fn texture_unit(&self, parameter: ParameterHandle) -> u32 {
        self.state
            .borrow()
            .parameters
            .get(&parameter)
            .map(|p| p.texture_unit)
            .unwrap_or(0)
    }

    fn set_sampler(&self, unit: u32, sampler: &SamplerState) {
        self.record(ContextCall::SetSampler { unit, sampler: sampler.clone() });
    }

    fn disable_sampler(&self, unit: u32) {
        self.record(ContextCall::DisableSampler(unit));
    }
}

#[cfg(test)]
#[path = "mock_context_tests.rs"]
mod tests;
