/// Effect parameters and the per-effect parameter table
///
/// Parameters are shared as `Rc<EffectParameter>` between the table and the
/// descriptors of every pass that binds them. Values and dirty flags use
/// interior mutability so the host can write through any shared reference.
///
/// Dirty-flag lifecycle:
/// - declaring or writing a parameter marks it dirty
/// - passes only read the flag
/// - the host clears all flags once per frame (`ParameterTable::clear_dirty`)

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::effect::{ParamType, ParamValue};

// ===== EFFECT PARAMETER =====

/// A named, typed effect parameter with its current value and dirty flag
#[derive(Debug)]
pub struct EffectParameter {
    name: String,
    param_type: ParamType,
    array_size: u32,
    value: RefCell<ParamValue>,
    dirty: Cell<bool>,
}

impl EffectParameter {
    /// Declare a parameter
    ///
    /// `array_size` 0 declares a single value. The parameter starts dirty,
    /// holding zero (identity for matrices, default sampler state).
    pub fn new(name: &str, param_type: ParamType, array_size: u32) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::InvalidParameter("parameter name is empty".to_string()));
        }
        if array_size > 0 && !param_type.supports_array() {
            return Err(Error::InvalidParameter(format!(
                "'{}': type {} cannot be declared as an array",
                name, param_type
            )));
        }
        let value = ParamValue::default_for(param_type, array_size);

        Ok(Self {
            name: name.to_string(),
            param_type,
            array_size,
            value: RefCell::new(value),
            dirty: Cell::new(true),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param_type(&self) -> ParamType {
        self.param_type
    }

    /// Declared array length (0 = single value)
    pub fn array_size(&self) -> u32 {
        self.array_size
    }

    pub fn is_array(&self) -> bool {
        self.array_size != 0
    }

    // ===== VALUE =====

    /// Current value
    pub fn value(&self) -> Ref<'_, ParamValue> {
        self.value.borrow()
    }

    /// Write a new value and mark the parameter dirty
    ///
    /// The value must match the declared type, and array values must hold
    /// exactly `array_size` elements.
    pub fn set(&self, value: impl Into<ParamValue>) -> Result<()> {
        let value = value.into();

        if value.param_type() != self.param_type {
            return Err(Error::TypeMismatch {
                parameter: self.name.clone(),
                expected: self.param_type,
                found: value.param_type(),
            });
        }

        let found = value.array_len();
        let shape_ok = match found {
            Some(len) => self.array_size != 0 && len == self.array_size as usize,
            None => self.array_size == 0,
        };
        if !shape_ok {
            return Err(Error::ArraySizeMismatch {
                parameter: self.name.clone(),
                expected: self.array_size,
                found: found.unwrap_or(1),
            });
        }

        *self.value.borrow_mut() = value;
        self.dirty.set(true);
        Ok(())
    }

    // ===== DIRTY FLAG =====

    /// Whether the value changed since the flag was last cleared
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    pub fn mark_dirty(&self) {
        self.dirty.set(true);
    }

    pub fn clear_dirty(&self) {
        self.dirty.set(false);
    }
}

// ===== PARAMETER TABLE =====

/// Name-indexed parameters of one effect, in declaration order
#[derive(Debug, Default)]
pub struct ParameterTable {
    parameters: Vec<Rc<EffectParameter>>,
    names: FxHashMap<String, usize>,
}

impl ParameterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new parameter; names are unique within a table
    pub fn add(&mut self, name: &str, param_type: ParamType, array_size: u32) -> Result<Rc<EffectParameter>> {
        if self.names.contains_key(name) {
            return Err(Error::DuplicateParameter(name.to_string()));
        }
        let parameter = Rc::new(EffectParameter::new(name, param_type, array_size)?);
        self.names.insert(name.to_string(), self.parameters.len());
        self.parameters.push(parameter.clone());
        Ok(parameter)
    }

    /// Lookup by name (None when the effect does not declare it)
    pub fn by_name(&self, name: &str) -> Option<&Rc<EffectParameter>> {
        let index = self.names.get(name)?;
        self.parameters.get(*index)
    }

    /// Lookup by declaration index
    pub fn by_index(&self, index: usize) -> Option<&Rc<EffectParameter>> {
        self.parameters.get(index)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Parameters in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Rc<EffectParameter>> {
        self.parameters.iter()
    }

    /// Clear every dirty flag (once per frame, after all passes ran)
    pub fn clear_dirty(&self) {
        for parameter in &self.parameters {
            parameter.clear_dirty();
        }
    }

    /// `<type> <name>;` / `<type> <name>[<n>];` line per parameter, in order
    pub fn declarations(&self) -> String {
        let mut text = String::new();
        for parameter in &self.parameters {
            text.push_str(parameter.param_type.type_name());
            text.push(' ');
            text.push_str(&parameter.name);
            if parameter.array_size != 0 {
                text.push_str(&format!("[{}]", parameter.array_size));
            }
            text.push_str(";\n");
        }
        text
    }
}

#[cfg(test)]
#[path = "parameter_tests.rs"]
mod tests;
