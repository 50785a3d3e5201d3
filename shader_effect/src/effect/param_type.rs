/// Effect parameter type tags

use std::fmt;

/// Declared type of an effect parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Bool,
    Int,
    Float,
    Float2,
    Float3,
    Float4,
    Float4x4,
    Sampler,
}

impl ParamType {
    pub const ALL: [ParamType; 8] = [
        ParamType::Bool,
        ParamType::Int,
        ParamType::Float,
        ParamType::Float2,
        ParamType::Float3,
        ParamType::Float4,
        ParamType::Float4x4,
        ParamType::Sampler,
    ];

    /// Shader-language spelling used in synthesized declarations
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamType::Bool => "bool",
            ParamType::Int => "int",
            ParamType::Float => "float",
            ParamType::Float2 => "float2",
            ParamType::Float3 => "float3",
            ParamType::Float4 => "float4",
            ParamType::Float4x4 => "float4x4",
            ParamType::Sampler => "sampler",
        }
    }

    /// Inverse of `type_name`
    pub fn from_name(name: &str) -> Option<ParamType> {
        Self::ALL.iter().copied().find(|ty| ty.type_name() == name)
    }

    /// Whether parameters of this type may be declared as arrays
    ///
    /// float2/float3 are only ever pushed as single vectors, and samplers
    /// occupy exactly one texture unit.
    pub fn supports_array(&self) -> bool {
        matches!(
            self,
            ParamType::Bool | ParamType::Int | ParamType::Float | ParamType::Float4 | ParamType::Float4x4
        )
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}
