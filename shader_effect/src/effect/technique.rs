/// Technique - an ordered list of passes rendered one after another
///
/// Pure delegation: a technique binds nothing itself, it brackets its
/// passes' begin/end in declaration order.

use std::cell::Cell;
use std::rc::Rc;

use crate::context::GraphicsContext;
use crate::effect::{EffectResources, Pass};
use crate::error::Result;
use crate::{engine_bail, engine_debug};

const SOURCE: &str = "fx::Technique";

#[derive(Debug)]
pub struct Technique {
    name: String,
    passes: Vec<Pass>,
    active: Cell<bool>,
}

impl Technique {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            passes: Vec::new(),
            active: Cell::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ===== PASSES =====

    /// Append a new, empty pass (names are unique within a technique)
    pub fn make_pass(&mut self, name: &str) -> Result<&mut Pass> {
        if self.pass_by_name(name).is_some() {
            engine_bail!(SOURCE, "Technique '{}' already has a pass named '{}'", self.name, name);
        }
        engine_debug!(SOURCE, "Technique '{}': pass '{}' created", self.name, name);
        self.passes.push(Pass::new(name));
        let index = self.passes.len() - 1;
        Ok(&mut self.passes[index])
    }

    pub fn pass(&self, index: usize) -> Option<&Pass> {
        self.passes.get(index)
    }

    pub fn pass_mut(&mut self, index: usize) -> Option<&mut Pass> {
        self.passes.get_mut(index)
    }

    pub fn pass_by_name(&self, name: &str) -> Option<&Pass> {
        self.passes.iter().find(|p| p.name() == name)
    }

    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    pub fn passes(&self) -> impl Iterator<Item = &Pass> {
        self.passes.iter()
    }

    // ===== READ =====

    /// Compile every pass
    pub fn read(&mut self, resources: &EffectResources, context: &Rc<dyn GraphicsContext>) {
        for pass in &mut self.passes {
            pass.read(resources, context);
        }
    }

    // ===== BEGIN / END =====

    /// Open the technique; returns the number of passes to render
    pub fn begin(&self) -> usize {
        let was_active = self.active.replace(true);
        debug_assert!(!was_active, "technique '{}' begun twice without end()", self.name);
        self.passes.len()
    }

    /// Begin pass `index` (out-of-range indices are ignored)
    pub fn begin_pass(&self, index: usize, context: &dyn GraphicsContext) {
        debug_assert!(self.active.get(), "technique '{}': begin_pass() outside begin()/end()", self.name);
        if let Some(pass) = self.passes.get(index) {
            pass.begin(context);
        }
    }

    /// End pass `index` (out-of-range indices are ignored)
    pub fn end_pass(&self, index: usize, context: &dyn GraphicsContext) {
        if let Some(pass) = self.passes.get(index) {
            pass.end(context);
        }
    }

    pub fn end(&self) {
        self.active.set(false);
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Run `draw` once per pass, in order, with that pass active
    ///
    /// Each pass is ended even if `draw` panics. Returns the number of
    /// passes rendered.
    pub fn render<F>(&self, context: &dyn GraphicsContext, mut draw: F) -> usize
    where
        F: FnMut(usize, &Pass),
    {
        let count = self.begin();
        let _bracket = TechniqueBracket(self);
        for (index, pass) in self.passes.iter().enumerate() {
            let active = pass.activate(context);
            draw(index, active.pass());
        }
        count
    }
}

/// Closes a technique when `render()` leaves, normally or by unwinding
struct TechniqueBracket<'a>(&'a Technique);

impl Drop for TechniqueBracket<'_> {
    fn drop(&mut self) {
        self.0.end();
    }
}

#[cfg(test)]
#[path = "technique_tests.rs"]
mod tests;
