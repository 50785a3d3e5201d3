/// Effect - parameters, shader source blocks and techniques of one effect
///
/// Built by an effect loader through the factory methods (`add_parameter`,
/// `add_shader_block`, `make_technique`, `Technique::make_pass`), then
/// compiled once with `read()`. Afterwards the host writes parameter values,
/// renders techniques, and calls `end_frame()` at the frame boundary.
///
/// Example:
/// ```ignore
/// let mut effect = Effect::new("tinted");
/// let color = effect.add_parameter("color", ParamType::Float4, 0)?;
/// effect.add_shader_block("float4 vs_main(float4 p : POSITION) : COLOR { return color; }");
/// effect.make_technique("main")?
///     .make_pass("p0")?
///     .set_shader(ShaderStage::Vertex, "auto", "vs_main");
/// effect.read(&context);
///
/// color.set(Vec4::new(1.0, 0.0, 0.0, 1.0))?;
/// effect.technique(0).unwrap().render(&*context, |_, _| draw());
/// effect.end_frame();
/// ```

use std::rc::Rc;

use crate::context::GraphicsContext;
use crate::effect::{
    EffectConfig, EffectParameter, ParamType, ParameterTable, ShaderCompiler, Technique,
};
use crate::error::Result;
use crate::{engine_bail, engine_debug};

const SOURCE: &str = "fx::Effect";

// ===== EFFECT RESOURCES =====

/// Everything a pass reads while compiling
#[derive(Debug, Default)]
pub struct EffectResources {
    parameters: ParameterTable,
    shader_blocks: Vec<String>,
    compiler: ShaderCompiler,
}

impl EffectResources {
    fn new(config: EffectConfig) -> Self {
        Self {
            parameters: ParameterTable::new(),
            shader_blocks: Vec::new(),
            compiler: ShaderCompiler::new(config),
        }
    }

    pub fn parameters(&self) -> &ParameterTable {
        &self.parameters
    }

    pub fn compiler(&self) -> &ShaderCompiler {
        &self.compiler
    }

    pub fn shader_block(&self, index: usize) -> Option<&str> {
        self.shader_blocks.get(index).map(String::as_str)
    }

    pub fn shader_block_count(&self) -> usize {
        self.shader_blocks.len()
    }

    /// Source handed to the compiler for every stage of every pass
    ///
    /// One declaration line per parameter, in declaration order, followed by
    /// each shader block and a newline.
    pub fn compilation_unit(&self) -> String {
        let mut unit = self.parameters.declarations();
        for block in &self.shader_blocks {
            unit.push_str(block);
            unit.push('\n');
        }
        unit
    }
}

// ===== EFFECT =====

#[derive(Debug)]
pub struct Effect {
    name: String,
    resources: EffectResources,
    techniques: Vec<Technique>,
}

impl Effect {
    /// Empty effect with the default configuration
    pub fn new(name: &str) -> Self {
        Self::with_config(name, EffectConfig::default())
    }

    pub fn with_config(name: &str, config: EffectConfig) -> Self {
        Self {
            name: name.to_string(),
            resources: EffectResources::new(config),
            techniques: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &EffectConfig {
        self.resources.compiler.config()
    }

    pub fn resources(&self) -> &EffectResources {
        &self.resources
    }

    // ===== PARAMETERS =====

    /// Declare a parameter; `array_size` 0 declares a single value
    pub fn add_parameter(
        &mut self,
        name: &str,
        param_type: ParamType,
        array_size: u32,
    ) -> Result<Rc<EffectParameter>> {
        let parameter = self.resources.parameters.add(name, param_type, array_size)?;
        engine_debug!(SOURCE, "Effect '{}': parameter {} {} declared",
            self.name, param_type, name);
        Ok(parameter)
    }

    /// Lookup by name; None when the effect does not declare it
    pub fn parameter_by_name(&self, name: &str) -> Option<&Rc<EffectParameter>> {
        self.resources.parameters.by_name(name)
    }

    pub fn parameter(&self, index: usize) -> Option<&Rc<EffectParameter>> {
        self.resources.parameters.by_index(index)
    }

    pub fn parameter_count(&self) -> usize {
        self.resources.parameters.len()
    }

    /// Frame boundary: clear every parameter's dirty flag
    ///
    /// Call once per frame after every pass that may use the parameters has
    /// begun. Values written afterwards are pushed at the next `begin()`.
    pub fn end_frame(&self) {
        self.resources.parameters.clear_dirty();
    }

    // ===== SHADER BLOCKS =====

    /// Append a block of shader source to the compilation unit
    pub fn add_shader_block(&mut self, source: &str) -> usize {
        self.resources.shader_blocks.push(source.to_string());
        self.resources.shader_blocks.len() - 1
    }

    pub fn shader_block(&self, index: usize) -> Option<&str> {
        self.resources.shader_block(index)
    }

    pub fn shader_block_count(&self) -> usize {
        self.resources.shader_block_count()
    }

    // ===== TECHNIQUES =====

    /// Append a new, empty technique (names are unique within an effect)
    pub fn make_technique(&mut self, name: &str) -> Result<&mut Technique> {
        if self.technique_by_name(name).is_some() {
            engine_bail!(SOURCE, "Effect '{}' already has a technique named '{}'", self.name, name);
        }
        engine_debug!(SOURCE, "Effect '{}': technique '{}' created", self.name, name);
        self.techniques.push(Technique::new(name));
        let index = self.techniques.len() - 1;
        Ok(&mut self.techniques[index])
    }

    pub fn technique(&self, index: usize) -> Option<&Technique> {
        self.techniques.get(index)
    }

    pub fn technique_mut(&mut self, index: usize) -> Option<&mut Technique> {
        self.techniques.get_mut(index)
    }

    pub fn technique_by_name(&self, name: &str) -> Option<&Technique> {
        self.techniques.iter().find(|t| t.name() == name)
    }

    pub fn technique_count(&self) -> usize {
        self.techniques.len()
    }

    // ===== READ =====

    /// Compile every pass of every technique against the current unit
    ///
    /// Never fails; stages that do not compile end up holding a null program
    /// and no bound parameters.
    pub fn read(&mut self, context: &Rc<dyn GraphicsContext>) {
        let Self { name, resources, techniques } = self;
        engine_debug!(SOURCE, "Effect '{}': reading {} techniques", name, techniques.len());
        for technique in techniques.iter_mut() {
            technique.read(resources, context);
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
