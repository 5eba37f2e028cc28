//! Constant folding of builtin calls.
//!
//! The oracle decides; the trace collection replaces. Folding itself only
//! wires the two together, so no rewrite ever happens without the oracle's
//! explicit go-ahead.

use kiln_builtins::{BuiltinSpec, RangeSpec};
use kiln_ir::{ExceptionKind, ExprArena, ExprId};

use crate::{ComputeResult, OptimizerConfig, TraceCollection};

/// Fold the call at `node` if `spec` says it is compile-time computable.
///
/// When it is not, the call might raise at runtime: an unqualified
/// exception exit is recorded and the node is returned unchanged.
#[tracing::instrument(
    level = "debug",
    skip(arena, trace, spec, given_values),
    fields(builtin = spec.name())
)]
pub fn compute_builtin_spec(
    arena: &mut ExprArena,
    trace: &mut TraceCollection,
    node: ExprId,
    spec: &dyn BuiltinSpec,
    given_values: &[ExprId],
) -> ComputeResult {
    if !spec.is_compile_time_computable(arena, given_values) {
        trace.on_exception_raise_exit(ExceptionKind::BaseException);

        // TODO: when only the step is known and it is zero, record a
        // ValueError exit and report the call at compile time.

        return ComputeResult::unchanged(node);
    }

    let name = spec.name();
    trace.get_compile_time_computation_result(
        arena,
        node,
        |arena| spec.simulate_call(arena, given_values),
        || format!("Built-in call to '{name}' computed."),
    )
}

/// Constant-fold the range call at `node`.
///
/// Nodes that are not range calls (including ones an earlier fold already
/// replaced with a constant) are returned unchanged.
pub fn compute_expression(
    arena: &mut ExprArena,
    trace: &mut TraceCollection,
    node: ExprId,
    config: &OptimizerConfig,
) -> ComputeResult {
    let Some(&range) = arena.kind(node).as_range() else {
        return ComputeResult::unchanged(node);
    };

    let spec = RangeSpec::new(range.family(), config.version);
    let given_values = range.args();
    compute_builtin_spec(arena, trace, node, &spec, &given_values)
}
