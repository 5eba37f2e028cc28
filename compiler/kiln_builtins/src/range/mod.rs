//! Specs for the eager and lazy range builtins.
//!
//! # Computability
//!
//! Every argument must be a constant. The lazy builtin is then always
//! computable: its result is a fixed-size range object. The eager builtin
//! materializes a list, so it is computable only while the list stays small
//! (fewer than [`EAGER_FOLD_LIMIT`] elements), unless the call is known to
//! fail, in which case simulating it yields the failure.

use kiln_ir::{ConstValue, ExprArena, ExprId, LanguageVersion, RangeFamily, RangeValue};

use crate::{constant_args, BuiltinSpec, SimulationError};

/// Largest eager range (exclusive) that is folded into a list constant.
pub const EAGER_FOLD_LIMIT: u64 = 256;

/// Spec for one range builtin under one language version.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RangeSpec {
    family: RangeFamily,
    version: LanguageVersion,
}

impl RangeSpec {
    pub const fn new(family: RangeFamily, version: LanguageVersion) -> Self {
        RangeSpec { family, version }
    }

    pub const fn eager(version: LanguageVersion) -> Self {
        Self::new(RangeFamily::Eager, version)
    }

    pub const fn lazy(version: LanguageVersion) -> Self {
        Self::new(RangeFamily::Lazy, version)
    }

    /// Integer the runtime would take from a constant argument.
    fn argument_int(&self, value: &ConstValue, position: usize) -> Result<i64, SimulationError> {
        let coerced = if value.is_float() && !self.version.accepts_float_range_arguments() {
            None
        } else {
            value.as_truncated_int()
        };
        coerced.ok_or(SimulationError::NotAnInteger {
            builtin: self.name(),
            position,
            type_name: value.type_name(),
        })
    }

    /// Bounds of the call, in runtime order of checks: integer coercion of
    /// each argument first, then the zero-step check.
    fn bounds(&self, values: &[&ConstValue]) -> Result<RangeValue, SimulationError> {
        let ints = values
            .iter()
            .enumerate()
            .map(|(position, value)| self.argument_int(value, position))
            .collect::<Result<Vec<_>, _>>()?;

        match *ints.as_slice() {
            [high] => Ok(RangeValue::up_to(high)),
            [low, high] => Ok(RangeValue::between(low, high)),
            [low, high, step] => RangeValue::new(low, high, step).ok_or(SimulationError::ZeroStep {
                builtin: self.name(),
            }),
            _ => Err(SimulationError::ArgumentCount {
                builtin: self.name(),
                given: ints.len(),
            }),
        }
    }
}

impl BuiltinSpec for RangeSpec {
    fn name(&self) -> &'static str {
        match self.family {
            RangeFamily::Eager => self.version.eager_range_name(),
            RangeFamily::Lazy => self.version.lazy_range_name(),
        }
    }

    fn is_compile_time_computable(&self, arena: &ExprArena, args: &[ExprId]) -> bool {
        if !(1..=3).contains(&args.len()) {
            return false;
        }
        let Some(values) = constant_args(arena, args) else {
            return false;
        };

        match self.family {
            RangeFamily::Lazy => true,
            // A failing call is computable: simulation reports the failure.
            RangeFamily::Eager => match self.bounds(&values) {
                Ok(range) => range.len() < EAGER_FOLD_LIMIT,
                Err(_) => true,
            },
        }
    }

    fn simulate_call(
        &self,
        arena: &ExprArena,
        args: &[ExprId],
    ) -> Result<ConstValue, SimulationError> {
        let mut values = Vec::with_capacity(args.len());
        for (position, &arg) in args.iter().enumerate() {
            let value = arena.kind(arg).as_constant().ok_or(SimulationError::NotConstant {
                builtin: self.name(),
                position,
            })?;
            values.push(value);
        }

        let range = self.bounds(&values)?;
        tracing::trace!(builtin = self.name(), %range, "simulated range call");

        match self.family {
            RangeFamily::Lazy => Ok(ConstValue::Range(range)),
            RangeFamily::Eager => {
                let length = range.len();
                if length >= EAGER_FOLD_LIMIT {
                    return Err(SimulationError::TooLarge {
                        builtin: self.name(),
                        length,
                        limit: EAGER_FOLD_LIMIT,
                    });
                }
                Ok(range.to_list())
            }
        }
    }
}
