//! Shared analysis for the six range call shapes.
//!
//! Implementors provide only the argument wiring (family, arity and the
//! `low`/`high`/`step` accessors). Shape, truth value, length and element
//! prediction, side effects and exceptions are default methods, so all six
//! shapes answer them the same way.
//!
//! # Length
//!
//! | Arity | Known bounds needed | Length |
//! |-------|---------------------|--------|
//! | 1 | `low` | `max(0, low)` |
//! | 2 | `low`, `high` | `max(0, high - low)` |
//! | 3 | `low`, `high`, `step != 0` | `ceil((high - low) / step)`, or 0 if `step` points away |
//!
//! A zero step has no length: it is a guaranteed runtime failure, reported
//! by [`RangeAnalysis::may_raise_exception`].

use kiln_ir::{
    ConstValue, ExceptionKind, ExprArena, ExprId, LanguageVersion, RangeArity, RangeFamily,
    RangeNode, RangeValue, Truth, TypeShape,
};
use smallvec::SmallVec;

use crate::{IterationHandle, Probe};

/// Compile-time knowledge about a range builtin call.
pub trait RangeAnalysis {
    fn family(&self) -> RangeFamily;

    fn arity(&self) -> RangeArity;

    /// First argument; the exclusive upper bound in the one-argument form.
    fn low(&self) -> ExprId;

    fn high(&self) -> Option<ExprId>;

    fn step(&self) -> Option<ExprId>;

    /// Arguments in positional order.
    fn args(&self) -> SmallVec<[ExprId; 3]> {
        let mut args = SmallVec::new();
        args.push(self.low());
        args.extend(self.high());
        args.extend(self.step());
        args
    }

    fn type_shape(&self) -> TypeShape {
        match self.family() {
            RangeFamily::Eager => TypeShape::List,
            RangeFamily::Lazy => TypeShape::Range,
        }
    }

    fn truth_value(&self, probe: &Probe<'_>) -> Truth {
        Truth::from_option(self.iteration_length(probe).map(|length| length > 0))
    }

    /// Number of elements, or `None` unless every bound is a known integer
    /// (and the step is nonzero).
    fn iteration_length(&self, probe: &Probe<'_>) -> Option<u64> {
        let low = probe.integer_value(self.low())?;

        match self.arity() {
            RangeArity::One => Some(low.max(0).unsigned_abs()),
            RangeArity::Two => {
                let high = probe.integer_value(self.high()?)?;
                Some(RangeValue::between(low, high).len())
            }
            RangeArity::Three => {
                let high = probe.integer_value(self.high()?)?;
                let step = probe.integer_value(self.step()?)?;
                // A zero step raises instead of producing a range.
                RangeValue::new(low, high, step).map(|range| range.len())
            }
        }
    }

    /// Element at the 0-based `index`, or `None` when the range is exhausted
    /// there or a bound is unknown.
    ///
    /// The one-argument form answers `index` itself for every index up to
    /// and including the length.
    fn iteration_value(&self, probe: &Probe<'_>, index: u64) -> Option<i64> {
        match self.arity() {
            RangeArity::One => {
                let length = self.iteration_length(probe)?;
                if index > length {
                    return None;
                }
                i64::try_from(index).ok()
            }
            RangeArity::Two => {
                let low = probe.integer_value(self.low())?;
                let high = probe.integer_value(self.high()?)?;
                let result = i128::from(low).checked_add(i128::from(index))?;
                if result >= i128::from(high) {
                    return None;
                }
                i64::try_from(result).ok()
            }
            RangeArity::Three => {
                let low = probe.integer_value(self.low())?;
                let high = probe.integer_value(self.high()?)?;
                let step = probe.integer_value(self.step()?)?;
                let result = i128::from(step)
                    .checked_mul(i128::from(index))?
                    .checked_add(i128::from(low))?;
                let high = i128::from(high);
                let exhausted = match step.signum() {
                    1 => result >= high,
                    -1 => result <= high,
                    _ => true,
                };
                if exhausted {
                    return None;
                }
                i64::try_from(result).ok()
            }
        }
    }

    /// Allocate a constant node for the element at `index`, spanned like
    /// `provenance` (the range call being expanded).
    fn iteration_value_node(
        &self,
        arena: &mut ExprArena,
        version: LanguageVersion,
        provenance: ExprId,
        index: u64,
    ) -> Option<ExprId> {
        let value = self.iteration_value(&Probe::new(arena, version), index)?;
        tracing::trace!(?provenance, index, value, "materialized range element");
        Some(arena.constant_from(ConstValue::Int(value), provenance))
    }

    fn can_predict_iteration_values(&self, probe: &Probe<'_>) -> bool {
        self.iteration_length(probe).is_some()
    }

    /// Returns `true` if unpacking into `count` targets is known to succeed.
    /// `None` asks only whether the value is iterable at all.
    fn is_known_to_be_iterable(&self, probe: &Probe<'_>, count: Option<u64>) -> bool {
        match count {
            None => true,
            Some(count) => self.iteration_length(probe) == Some(count),
        }
    }

    fn may_have_side_effects(&self, probe: &Probe<'_>) -> bool {
        self.args()
            .iter()
            .any(|&arg| probe.may_have_side_effects(arg) || argument_needs_coercion(probe, arg))
    }

    // TODO: narrow by `kind` for unproven arguments, which can only fail
    // the integer check or raise from a conversion hook.
    fn may_raise_exception(&self, probe: &Probe<'_>, kind: ExceptionKind) -> bool {
        let args_may_raise = self.args().iter().any(|&arg| {
            probe.may_raise_exception(arg, kind) || argument_needs_coercion(probe, arg)
        });
        if args_may_raise {
            return true;
        }

        // Zero step: guaranteed ValueError.
        let zero_step = self
            .step()
            .is_some_and(|step| probe.integer_value(step) == Some(0));
        if zero_step {
            tracing::trace!(?kind, "range call has a zero step");
        }
        zero_step
    }

    /// Handle over the predicted elements, if every bound is known.
    fn iteration_handle(&self, probe: &Probe<'_>) -> Option<IterationHandle> {
        let low = probe.integer_value(self.low())?;

        match self.arity() {
            RangeArity::One => Some(IterationHandle::range1(low)),
            RangeArity::Two => {
                let high = probe.integer_value(self.high()?)?;
                Some(IterationHandle::range2(low, high))
            }
            RangeArity::Three => {
                let high = probe.integer_value(self.high()?)?;
                let step = probe.integer_value(self.step()?)?;
                IterationHandle::range3(low, high, step)
            }
        }
    }
}

/// An argument the runtime has to convert before use: not a proven
/// integer, or, where float coercion warns, a float constant.
fn argument_needs_coercion(probe: &Probe<'_>, arg: ExprId) -> bool {
    if probe.integer_value(arg).is_none() {
        return true;
    }
    probe.version().float_range_arguments_warn() && probe.is_float_constant(arg)
}

impl RangeAnalysis for RangeNode {
    fn family(&self) -> RangeFamily {
        RangeNode::family(self)
    }

    fn arity(&self) -> RangeArity {
        RangeNode::arity(self)
    }

    fn low(&self) -> ExprId {
        RangeNode::low(self)
    }

    fn high(&self) -> Option<ExprId> {
        RangeNode::high(self)
    }

    fn step(&self) -> Option<ExprId> {
        RangeNode::step(self)
    }
}
