//! Binding points and draw scopes
//!
//! Material blocks of every binder are bound at the same binding point. A
//! [`BindingContext`] tracks which binder currently owns each point, and a
//! [`DrawScope`] borrows the context mutably for as long as a draw is being
//! recorded, so a second binder cannot rebind the point in between.

use crate::shader::program::ShaderProgram;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// A numbered slot through which a buffer is made visible to a uniform block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingPoint(pub u32);

impl BindingPoint {
    /// Binding point shared by all material blocks.
    pub const MATERIAL: BindingPoint = BindingPoint(0);
}

/// Identity of one binder instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinderId(u64);

impl BinderId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        BinderId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Ownership record of binding points.
#[derive(Debug, Default)]
pub struct BindingContext {
    owners: HashMap<BindingPoint, BinderId>,
    switches: u64,
}

impl BindingContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binder that last claimed `point`.
    pub fn owner(&self, point: BindingPoint) -> Option<BinderId> {
        self.owners.get(&point).copied()
    }

    /// Number of times a point changed hands.
    pub fn switches(&self) -> u64 {
        self.switches
    }

    pub(crate) fn claim(&mut self, point: BindingPoint, binder: BinderId) {
        let previous = self.owners.insert(point, binder);
        if previous.is_some_and(|p| p != binder) {
            self.switches += 1;
            trace!("Binding point {} moved to {:?}", point.0, binder);
        }
    }
}

/// An active draw of one binder.
///
/// The program stays in use until the scope is dropped.
pub struct DrawScope<'a, P: ShaderProgram> {
    program: &'a mut P,
    context: &'a mut BindingContext,
    point: BindingPoint,
    binder: BinderId,
}

impl<'a, P: ShaderProgram> DrawScope<'a, P> {
    pub(crate) fn new(
        program: &'a mut P,
        context: &'a mut BindingContext,
        point: BindingPoint,
        binder: BinderId,
    ) -> Self {
        context.claim(point, binder);
        Self {
            program,
            context,
            point,
            binder,
        }
    }

    /// The program to issue the draw with.
    pub fn program(&mut self) -> &mut P {
        &mut *self.program
    }

    /// Binding point held by this scope.
    pub fn binding_point(&self) -> BindingPoint {
        self.point
    }

    /// Binder that owns this scope.
    pub fn binder(&self) -> BinderId {
        self.binder
    }

    /// The context this scope holds.
    pub fn context(&self) -> &BindingContext {
        &*self.context
    }
}

impl<P: ShaderProgram> Drop for DrawScope<'_, P> {
    fn drop(&mut self) {
        self.program.end_use();
    }
}
