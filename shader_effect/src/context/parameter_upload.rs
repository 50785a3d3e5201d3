/// Call shapes for pushing parameter values into a context

/// One value push, shaped like the API call that carries it
///
/// Bool values are widened to `i32` (0/1) before reaching the context.
/// Matrices are row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterUpload<'a> {
    /// Single int (bool or int scalar)
    Int1(i32),
    /// Batched int array (bool or int array)
    IntArray(&'a [i32]),
    /// Single float
    Float1(f32),
    /// Batched float array
    FloatArray(&'a [f32]),
    /// Single 2-component vector
    Float2([f32; 2]),
    /// Single 3-component vector
    Float3([f32; 3]),
    /// Single 4-component vector
    Float4([f32; 4]),
    /// Batched 4-wide vector array
    Float4Array(&'a [[f32; 4]]),
    /// Single 4x4 matrix, row-major
    Matrix4([f32; 16]),
    /// Batched 4x4 matrix array, each row-major
    Matrix4Array(&'a [[f32; 16]]),
}

impl ParameterUpload<'_> {
    /// Number of elements carried (1 for single-value calls)
    pub fn element_count(&self) -> usize {
        match self {
            ParameterUpload::IntArray(v) => v.len(),
            ParameterUpload::FloatArray(v) => v.len(),
            ParameterUpload::Float4Array(v) => v.len(),
            ParameterUpload::Matrix4Array(v) => v.len(),
            _ => 1,
        }
    }

    /// Whether this is a batched array call
    pub fn is_array(&self) -> bool {
        matches!(
            self,
            ParameterUpload::IntArray(_)
                | ParameterUpload::FloatArray(_)
                | ParameterUpload::Float4Array(_)
                | ParameterUpload::Matrix4Array(_)
        )
    }
}
