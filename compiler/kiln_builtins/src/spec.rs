//! The oracle interface.

use kiln_ir::{ConstValue, ExprArena, ExprId};

use crate::SimulationError;

/// Compile-time knowledge about one builtin.
pub trait BuiltinSpec {
    /// Builtin name, for diagnostics.
    fn name(&self) -> &'static str;

    /// Returns `true` if a call with these arguments may be executed at
    /// compile time. A `true` answer does not promise success: calls whose
    /// failure is fully determined are computable too.
    fn is_compile_time_computable(&self, arena: &ExprArena, args: &[ExprId]) -> bool;

    /// Execute the call on constant arguments.
    fn simulate_call(&self, arena: &ExprArena, args: &[ExprId])
        -> Result<ConstValue, SimulationError>;
}

/// Constant values of every argument, or `None` if any is not a constant.
pub fn constant_args<'a>(arena: &'a ExprArena, args: &[ExprId]) -> Option<Vec<&'a ConstValue>> {
    args.iter().map(|&arg| arena.kind(arg).as_constant()).collect()
}
