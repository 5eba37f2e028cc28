//! Iteration lowering: eager range → lazy range.
//!
//! Materializing a long list only to iterate it is wasted work. When an
//! eager range call is consumed solely as an iteration source and its length
//! is statically known to exceed the threshold, the call is rewritten in
//! place to the lazy builtin with the same argument nodes. Iterating the
//! lazy form never raises.
//!
//! Only versions with a distinct eager builtin have anything to lower.

use kiln_ir::{ExprArena, ExprId, ExprKind, RangeFamily};

use crate::{
    Change, ChangeTag, ComputeResult, OptimizerConfig, Probe, RangeAnalysis, TraceCollection,
};

/// Called when `node` is being iterated by `iter_node`.
///
/// Returns `iter_node`, tagged [`ChangeTag::NewExpression`] if `node` was
/// lowered so the optimizer revisits it.
#[tracing::instrument(level = "debug", skip(arena, trace, config))]
pub fn compute_expression_iter1(
    arena: &mut ExprArena,
    trace: &mut TraceCollection,
    iter_node: ExprId,
    node: ExprId,
    config: &OptimizerConfig,
) -> ComputeResult {
    let Some(&range) = arena.kind(node).as_range() else {
        return ComputeResult::unchanged(iter_node);
    };
    if range.family() != RangeFamily::Eager || !config.version.has_eager_range() {
        return ComputeResult::unchanged(iter_node);
    }

    let length = range.iteration_length(&Probe::new(arena, config.version));
    let Some(length) = length.filter(|&length| length > config.iteration_lowering_threshold)
    else {
        return ComputeResult::unchanged(iter_node);
    };

    let lazy = range.with_family(RangeFamily::Lazy);
    // The argument nodes now belong to the lazy call.
    arena.replace_kind(node, ExprKind::Range(lazy));

    let message = format!(
        "Replaced '{}' with '{}' built-in call for iteration.",
        range.builtin_name(config.version),
        lazy.builtin_name(config.version),
    );
    tracing::debug!(?node, length, "lowered eager range for iteration");
    trace.record_change(
        node,
        Change {
            tag: ChangeTag::NewExpression,
            message: message.clone(),
        },
    );
    ComputeResult::changed(iter_node, ChangeTag::NewExpression, message)
}

#[cfg(test)]
mod tests;
