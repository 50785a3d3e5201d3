/// Pass - one compiled vertex/fragment program pair and its bound parameters
///
/// Lifecycle:
/// - `read()` once: compile each configured stage against the effect's full
///   compilation unit and cache which effect parameters each program uses
/// - `begin()` per draw: bind programs, push dirty parameters, bind samplers
/// - `end()` after the draw: disable profiles and the texture units used
///
/// Nothing here returns an error. A stage without an entry point is simply
/// absent, shader globals without an effect parameter are left unbound, and
/// a failed compile leaves the stage holding the (null) program it got back.

use std::cell::Cell;
use std::rc::Rc;

use crate::context::{
    GraphicsContext, ParameterHandle, ParameterUpload, Profile, ShaderStage,
};
use crate::effect::render_state::{
    RenderState, RenderStateCode, RenderStateValue, ShaderDesc, AUTO_PROFILE,
};
use crate::effect::{
    CompiledProgram, EffectResources, ParamType, ParamValue, ParameterDescriptor, ParameterTable,
};
use crate::error::Result;
use crate::{engine_bail, engine_debug, engine_trace};

const SOURCE: &str = "fx::Pass";

// ===== STAGE SLOT =====

#[derive(Debug)]
struct StageSlot {
    profile: Profile,
    program: Option<CompiledProgram>,
    descriptors: Vec<ParameterDescriptor>,
}

impl StageSlot {
    fn absent() -> Self {
        Self {
            profile: Profile::UNKNOWN,
            program: None,
            descriptors: Vec::new(),
        }
    }
}

// ===== PASS =====

#[derive(Debug)]
pub struct Pass {
    name: String,
    states: Vec<RenderState>,
    stages: [StageSlot; 2],
    active: Cell<bool>,
}

impl Pass {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            states: Vec::new(),
            stages: [StageSlot::absent(), StageSlot::absent()],
            active: Cell::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ===== RENDER STATES =====

    pub fn add_state(&mut self, state: RenderState) -> &mut Self {
        self.states.push(state);
        self
    }

    /// Add a state addressed by its effect-description name
    pub fn add_state_by_name(&mut self, name: &str, value: RenderStateValue) -> Result<&mut Self> {
        let Some(code) = RenderStateCode::from_name(name) else {
            engine_bail!(SOURCE, "Pass '{}': unknown render state '{}'", self.name, name);
        };
        Ok(self.add_state(RenderState::new(code, value)))
    }

    /// Select profile and entry point for a stage
    pub fn set_shader(&mut self, stage: ShaderStage, profile: &str, entry_point: &str) -> &mut Self {
        self.add_state(RenderState::shader(stage, profile, entry_point))
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn state(&self, index: usize) -> Option<&RenderState> {
        self.states.get(index)
    }

    /// Stage selection: the first state carrying that stage's code
    pub fn shader_desc(&self, stage: ShaderStage) -> Option<&ShaderDesc> {
        let code = RenderStateCode::for_stage(stage);
        let state = self.states.iter().find(|s| s.code == code)?;
        match &state.value {
            RenderStateValue::Shader(desc) => Some(desc),
            _ => None,
        }
    }

    // ===== INTROSPECTION =====

    /// Program compiled for a stage (None when the stage is absent)
    pub fn program(&self, stage: ShaderStage) -> Option<&CompiledProgram> {
        self.stages[stage.index()].program.as_ref()
    }

    pub fn profile(&self, stage: ShaderStage) -> Profile {
        self.stages[stage.index()].profile
    }

    /// Bound parameters of a stage, in program enumeration order
    pub fn descriptors(&self, stage: ShaderStage) -> &[ParameterDescriptor] {
        &self.stages[stage.index()].descriptors
    }

    /// Between `begin()` and `end()`
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Every compiled program came from `context`
    fn read_with(&self, context: &dyn GraphicsContext) -> bool {
        self.stages
            .iter()
            .filter_map(|slot| slot.program.as_ref())
            .all(|program| program.belongs_to(context))
    }

    fn all_descriptors(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.stages.iter().flat_map(|slot| slot.descriptors.iter())
    }

    fn sampler_descriptors(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.all_descriptors()
            .filter(|d| d.parameter().param_type() == ParamType::Sampler)
    }

    // ===== READ =====

    /// Compile both stages and discover their bound parameters
    ///
    /// Reading again replaces (and releases) previously compiled programs.
    pub fn read(&mut self, resources: &EffectResources, context: &Rc<dyn GraphicsContext>) {
        let compiler = resources.compiler();
        let vertex_profile = self
            .shader_desc(ShaderStage::Vertex)
            .map(|desc| desc.profile.clone())
            .unwrap_or_default();
        let mut unit: Option<String> = None;

        for stage in ShaderStage::ALL {
            let selected = self
                .shader_desc(stage)
                .filter(|desc| !desc.entry_point.is_empty())
                .cloned();
            let Some(desc) = selected else {
                self.stages[stage.index()] = StageSlot::absent();
                continue;
            };

            // The reused vertex name is looked up verbatim, so "auto" there is unknown
            let profile = if stage == ShaderStage::Fragment
                && desc.profile != AUTO_PROFILE
                && compiler.config().reuse_vertex_profile_name
            {
                context.profile_by_name(&vertex_profile)
            } else {
                compiler.resolve_profile(&**context, stage, &desc.profile)
            };

            let source = unit.get_or_insert_with(|| resources.compilation_unit());
            let compilation = compiler.compile(context, stage, profile, &desc.entry_point, source);
            compilation.program.load();

            let descriptors =
                Self::bind_parameters(&compilation.program, resources.parameters(), &**context);
            engine_trace!(SOURCE, "Pass '{}': {} program '{}' binds {} parameters",
                self.name, stage, desc.entry_point, descriptors.len());

            self.stages[stage.index()] = StageSlot {
                profile,
                program: Some(compilation.program),
                descriptors,
            };
        }
    }

    /// Intersect a program's referenced leaf globals with the effect's parameters
    fn bind_parameters(
        program: &CompiledProgram,
        parameters: &ParameterTable,
        context: &dyn GraphicsContext,
    ) -> Vec<ParameterDescriptor> {
        if !program.is_valid() {
            return Vec::new();
        }

        let mut descriptors = Vec::new();
        for global in context.global_parameters(program.handle()) {
            if !global.referenced || !global.class.is_leaf() {
                continue;
            }
            match parameters.by_name(&global.name) {
                Some(parameter) => {
                    descriptors.push(ParameterDescriptor::new(parameter.clone(), global.handle));
                }
                None => {
                    engine_debug!(SOURCE, "{} global '{}' has no effect parameter, left unbound",
                        program.stage(), global.name);
                }
            }
        }
        descriptors
    }

    // ===== BEGIN / END =====

    /// Activate the programs and push changed parameter values
    ///
    /// `context` must be the context the pass was read with.
    pub fn begin(&self, context: &dyn GraphicsContext) {
        let was_active = self.active.replace(true);
        debug_assert!(!was_active, "pass '{}' begun twice without end()", self.name);
        debug_assert!(self.read_with(context), "pass '{}' begun on a foreign context", self.name);

        for slot in &self.stages {
            if let Some(program) = &slot.program {
                context.bind_program(program.handle());
                context.enable_profile(slot.profile);
            }
        }

        for descriptor in self.all_descriptors() {
            let parameter = descriptor.parameter();
            if parameter.is_dirty() {
                push_value(context, descriptor.handle(), &parameter.value());
            }
        }

        // Units are assigned by the active program, so samplers go last
        for descriptor in self.sampler_descriptors() {
            let unit = context.texture_unit(descriptor.handle());
            if let ParamValue::Sampler(sampler) = &*descriptor.parameter().value() {
                context.set_sampler(unit, sampler);
            }
        }
    }

    /// Disable the profiles and texture units enabled by `begin()`
    pub fn end(&self, context: &dyn GraphicsContext) {
        debug_assert!(self.read_with(context), "pass '{}' ended on a foreign context", self.name);
        for slot in &self.stages {
            if slot.program.is_some() {
                context.disable_profile(slot.profile);
            }
        }

        for descriptor in self.sampler_descriptors() {
            context.disable_sampler(context.texture_unit(descriptor.handle()));
        }

        self.active.set(false);
    }

    /// `begin()` now, `end()` when the guard drops
    pub fn activate<'a>(&'a self, context: &'a dyn GraphicsContext) -> ActivePass<'a> {
        self.begin(context);
        ActivePass { pass: self, context }
    }
}

/// Push one value with the call shape matching its type
fn push_value(context: &dyn GraphicsContext, handle: ParameterHandle, value: &ParamValue) {
    match value {
        ParamValue::Bool(v) => context.set_parameter(handle, ParameterUpload::Int1(*v as i32)),
        ParamValue::BoolArray(v) => {
            let widened: Vec<i32> = v.iter().map(|&b| b as i32).collect();
            context.set_parameter(handle, ParameterUpload::IntArray(&widened));
        }
        ParamValue::Int(v) => context.set_parameter(handle, ParameterUpload::Int1(*v)),
        ParamValue::IntArray(v) => context.set_parameter(handle, ParameterUpload::IntArray(v)),
        ParamValue::Float(v) => context.set_parameter(handle, ParameterUpload::Float1(*v)),
        ParamValue::FloatArray(v) => context.set_parameter(handle, ParameterUpload::FloatArray(v)),
        ParamValue::Float2(v) => context.set_parameter(handle, ParameterUpload::Float2(v.to_array())),
        ParamValue::Float3(v) => context.set_parameter(handle, ParameterUpload::Float3(v.to_array())),
        ParamValue::Float4(v) => context.set_parameter(handle, ParameterUpload::Float4(v.to_array())),
        ParamValue::Float4Array(v) => {
            let vectors = bytemuck::cast_slice::<glam::Vec4, [f32; 4]>(v.as_slice());
            context.set_parameter(handle, ParameterUpload::Float4Array(vectors));
        }
        ParamValue::Float4x4(m) => {
            context.set_parameter(handle, ParameterUpload::Matrix4(m.transpose().to_cols_array()));
        }
        ParamValue::Float4x4Array(v) => {
            let rows: Vec<[f32; 16]> = v.iter().map(|m| m.transpose().to_cols_array()).collect();
            context.set_parameter(handle, ParameterUpload::Matrix4Array(&rows));
        }
        // Bound to its texture unit after all values are pushed
        ParamValue::Sampler(_) => {}
    }
}

// ===== ACTIVE PASS GUARD =====

/// A pass between `begin()` and `end()`
///
/// `end()` runs when the guard drops, including during unwinding.
pub struct ActivePass<'a> {
    pass: &'a Pass,
    context: &'a dyn GraphicsContext,
}

impl ActivePass<'_> {
    pub fn pass(&self) -> &Pass {
        self.pass
    }
}

impl Drop for ActivePass<'_> {
    fn drop(&mut self) {
        self.pass.end(self.context);
    }
}

#[cfg(test)]
#[path = "pass_tests.rs"]
mod tests;
