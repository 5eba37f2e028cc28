//! Per-expression knowledge queries.
//!
//! A [`Probe`] answers, for any expression in the arena, the questions range
//! analysis asks about its arguments: is it a known integer, may it have side
//! effects, may it raise. Range calls nested as arguments are answered by
//! their own [`RangeAnalysis`](crate::RangeAnalysis).

use kiln_ir::{ExceptionKind, ExprArena, ExprId, ExprKind, LanguageVersion, TypeShape};

use crate::RangeAnalysis;

/// Read-only view of the arena under one language version.
#[derive(Copy, Clone, Debug)]
pub struct Probe<'a> {
    arena: &'a ExprArena,
    version: LanguageVersion,
}

impl<'a> Probe<'a> {
    pub fn new(arena: &'a ExprArena, version: LanguageVersion) -> Self {
        Probe { arena, version }
    }

    pub fn version(&self) -> LanguageVersion {
        self.version
    }

    /// Statically known integer value of `id`, or `None` if unproven.
    ///
    /// Number constants coerce the way the range builtins coerce them:
    /// bools as 0/1, and on versions that accept floats, floats truncated.
    pub fn integer_value(&self, id: ExprId) -> Option<i64> {
        let value = self.arena.kind(id).as_constant()?;
        if value.is_float() && !self.version.accepts_float_range_arguments() {
            return None;
        }
        value.as_truncated_int()
    }

    /// Returns `true` if `id` is a constant of floating-point type.
    pub fn is_float_constant(&self, id: ExprId) -> bool {
        self.arena
            .kind(id)
            .as_constant()
            .is_some_and(kiln_ir::ConstValue::is_float)
    }

    /// Statically known shape of the value `id` produces.
    pub fn shape(&self, id: ExprId) -> TypeShape {
        match self.arena.kind(id) {
            ExprKind::Constant(value) => value.shape(),
            ExprKind::Range(range) => range.type_shape(),
            ExprKind::Variable(_) | ExprKind::Call { .. } | ExprKind::Iter { .. } => {
                TypeShape::Unknown
            }
        }
    }

    pub fn may_have_side_effects(&self, id: ExprId) -> bool {
        match self.arena.kind(id) {
            // Reading a variable may raise but has no other effect.
            ExprKind::Constant(_) | ExprKind::Variable(_) => false,
            ExprKind::Call { .. } => true,
            ExprKind::Range(range) => range.may_have_side_effects(self),
            ExprKind::Iter { iterable } => {
                self.may_have_side_effects(*iterable) || !self.shape(*iterable).is_known_iterable()
            }
        }
    }

    pub fn may_raise_exception(&self, id: ExprId, kind: ExceptionKind) -> bool {
        match self.arena.kind(id) {
            ExprKind::Constant(_) => false,
            ExprKind::Variable(_) | ExprKind::Call { .. } => true,
            ExprKind::Range(range) => range.may_raise_exception(self, kind),
            ExprKind::Iter { iterable } => {
                self.may_raise_exception(*iterable, kind)
                    || !self.shape(*iterable).is_known_iterable()
            }
        }
    }
}
