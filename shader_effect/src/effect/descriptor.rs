/// ParameterDescriptor - cached effect parameter ↔ program parameter binding

use std::rc::Rc;
use crate::context::ParameterHandle;
use crate::effect::EffectParameter;

/// Binding between an effect parameter and one program's parameter handle
///
/// Built once when a pass is read; the handle is only meaningful for the
/// program it was enumerated from.
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    parameter: Rc<EffectParameter>,
    handle: ParameterHandle,
}

impl ParameterDescriptor {
    pub(crate) fn new(parameter: Rc<EffectParameter>, handle: ParameterHandle) -> Self {
        Self { parameter, handle }
    }

    pub fn parameter(&self) -> &Rc<EffectParameter> {
        &self.parameter
    }

    pub fn handle(&self) -> ParameterHandle {
        self.handle
    }
}
