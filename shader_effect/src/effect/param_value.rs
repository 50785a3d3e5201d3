/// Typed parameter values
///
/// One variant per (type tag, scalar/array) pair. Shapes the runtime never
/// pushes (float2/float3/sampler arrays) have no variant, so they cannot be
/// stored in the first place.

use glam::{Mat4, Vec2, Vec3, Vec4};
use crate::context::SamplerState;
use crate::effect::ParamType;

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    BoolArray(Vec<bool>),
    Int(i32),
    IntArray(Vec<i32>),
    Float(f32),
    FloatArray(Vec<f32>),
    Float2(Vec2),
    Float3(Vec3),
    Float4(Vec4),
    Float4Array(Vec<Vec4>),
    Float4x4(Mat4),
    Float4x4Array(Vec<Mat4>),
    Sampler(SamplerState),
}

impl ParamValue {
    /// Zero value (identity for matrices) of the given shape
    ///
    /// `array_size` is ignored for types without array support.
    pub fn default_for(ty: ParamType, array_size: u32) -> ParamValue {
        let n = array_size as usize;
        match (ty, array_size) {
            (ParamType::Bool, 0) => ParamValue::Bool(false),
            (ParamType::Bool, _) => ParamValue::BoolArray(vec![false; n]),
            (ParamType::Int, 0) => ParamValue::Int(0),
            (ParamType::Int, _) => ParamValue::IntArray(vec![0; n]),
            (ParamType::Float, 0) => ParamValue::Float(0.0),
            (ParamType::Float, _) => ParamValue::FloatArray(vec![0.0; n]),
            (ParamType::Float2, _) => ParamValue::Float2(Vec2::ZERO),
            (ParamType::Float3, _) => ParamValue::Float3(Vec3::ZERO),
            (ParamType::Float4, 0) => ParamValue::Float4(Vec4::ZERO),
            (ParamType::Float4, _) => ParamValue::Float4Array(vec![Vec4::ZERO; n]),
            (ParamType::Float4x4, 0) => ParamValue::Float4x4(Mat4::IDENTITY),
            (ParamType::Float4x4, _) => ParamValue::Float4x4Array(vec![Mat4::IDENTITY; n]),
            (ParamType::Sampler, _) => ParamValue::Sampler(SamplerState::default()),
        }
    }

    /// Type tag of this value
    pub fn param_type(&self) -> ParamType {
        match self {
            ParamValue::Bool(_) | ParamValue::BoolArray(_) => ParamType::Bool,
            ParamValue::Int(_) | ParamValue::IntArray(_) => ParamType::Int,
            ParamValue::Float(_) | ParamValue::FloatArray(_) => ParamType::Float,
            ParamValue::Float2(_) => ParamType::Float2,
            ParamValue::Float3(_) => ParamType::Float3,
            ParamValue::Float4(_) | ParamValue::Float4Array(_) => ParamType::Float4,
            ParamValue::Float4x4(_) | ParamValue::Float4x4Array(_) => ParamType::Float4x4,
            ParamValue::Sampler(_) => ParamType::Sampler,
        }
    }

    /// Element count for array values, None for single values
    pub fn array_len(&self) -> Option<usize> {
        match self {
            ParamValue::BoolArray(v) => Some(v.len()),
            ParamValue::IntArray(v) => Some(v.len()),
            ParamValue::FloatArray(v) => Some(v.len()),
            ParamValue::Float4Array(v) => Some(v.len()),
            ParamValue::Float4x4Array(v) => Some(v.len()),
            _ => None,
        }
    }
}

// ===== CONVERSIONS =====

macro_rules! impl_from_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::$variant(value)
                }
            }
        )*
    };
}

impl_from_value! {
    bool => Bool,
    Vec<bool> => BoolArray,
    i32 => Int,
    Vec<i32> => IntArray,
    f32 => Float,
    Vec<f32> => FloatArray,
    Vec2 => Float2,
    Vec3 => Float3,
    Vec4 => Float4,
    Vec<Vec4> => Float4Array,
    Mat4 => Float4x4,
    Vec<Mat4> => Float4x4Array,
    SamplerState => Sampler,
}
