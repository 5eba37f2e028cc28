use super::*;
use kiln_ir::{LanguageVersion, RangeNode, Span};
use pretty_assertions::assert_eq;

struct Loop {
    arena: ExprArena,
    iter_node: ExprId,
    range: ExprId,
    args: Vec<ExprId>,
}

fn iterated_range(family: RangeFamily, bounds: &[i64]) -> Loop {
    let mut arena = ExprArena::new();
    let args: Vec<_> = bounds.iter().map(|&v| arena.int(v, Span::DUMMY)).collect();
    let Some(range) = arena.range(family, &args, Span::new(9, 30)) else {
        panic!("bad bounds {bounds:?}");
    };
    let iter_node = arena.iter(range, Span::new(0, 30));
    Loop {
        arena,
        iter_node,
        range,
        args,
    }
}

#[test]
fn long_eager_range_is_lowered() {
    let mut l = iterated_range(RangeFamily::Eager, &[0, 3000, 3]);
    let mut trace = TraceCollection::new();

    let result = compute_expression_iter1(
        &mut l.arena,
        &mut trace,
        l.iter_node,
        l.range,
        &OptimizerConfig::default(),
    );

    assert_eq!(result.node, l.iter_node);
    assert_eq!(result.tag(), Some(ChangeTag::NewExpression));
    assert_eq!(
        result.change.map(|change| change.message),
        Some("Replaced 'range' with 'xrange' built-in call for iteration.".to_owned())
    );
    assert_eq!(
        l.arena.kind(l.range),
        &ExprKind::Range(RangeNode::Lazy3 {
            low: l.args[0],
            high: l.args[1],
            step: l.args[2],
        })
    );
    assert_eq!(l.arena.span(l.range), Span::new(9, 30));
    assert_eq!(trace.changes().len(), 1);
}

#[test]
fn short_eager_range_is_kept() {
    let mut l = iterated_range(RangeFamily::Eager, &[0, 10, 1]);
    let before = l.arena.get(l.range).clone();
    let mut trace = TraceCollection::new();

    let result = compute_expression_iter1(
        &mut l.arena,
        &mut trace,
        l.iter_node,
        l.range,
        &OptimizerConfig::default(),
    );

    assert_eq!(result, ComputeResult::unchanged(l.iter_node));
    assert_eq!(l.arena.get(l.range), &before);
}

#[test]
fn threshold_is_exclusive() {
    let config = OptimizerConfig::default();
    let mut at = iterated_range(RangeFamily::Eager, &[256]);
    let mut above = iterated_range(RangeFamily::Eager, &[257]);
    let mut trace = TraceCollection::new();

    let kept = compute_expression_iter1(&mut at.arena, &mut trace, at.iter_node, at.range, &config);
    let lowered = compute_expression_iter1(
        &mut above.arena,
        &mut trace,
        above.iter_node,
        above.range,
        &config,
    );

    assert_eq!(kept.change, None);
    assert_eq!(lowered.tag(), Some(ChangeTag::NewExpression));
}

#[test]
fn unknown_length_is_kept() {
    let mut arena = ExprArena::new();
    let n = arena.variable("n", Span::DUMMY);
    let Some(range) = arena.range(RangeFamily::Eager, &[n], Span::DUMMY) else {
        panic!("one argument builds a range");
    };
    let iter_node = arena.iter(range, Span::DUMMY);
    let mut trace = TraceCollection::new();

    let result = compute_expression_iter1(
        &mut arena,
        &mut trace,
        iter_node,
        range,
        &OptimizerConfig::default(),
    );

    assert_eq!(result.change, None);
}

#[test]
fn lazy_range_has_nothing_to_lower() {
    let mut l = iterated_range(RangeFamily::Lazy, &[100_000]);
    let mut trace = TraceCollection::new();

    let result = compute_expression_iter1(
        &mut l.arena,
        &mut trace,
        l.iter_node,
        l.range,
        &OptimizerConfig::default(),
    );

    assert_eq!(result.change, None);
    assert_eq!(l.arena.revision(l.range), 0);
}

#[test]
fn modern_version_never_lowers() {
    let mut l = iterated_range(RangeFamily::Eager, &[100_000]);
    let mut trace = TraceCollection::new();

    let result = compute_expression_iter1(
        &mut l.arena,
        &mut trace,
        l.iter_node,
        l.range,
        &OptimizerConfig::new(LanguageVersion::PY3),
    );

    assert_eq!(result.change, None);
    assert_eq!(l.arena.revision(l.range), 0);
}

#[test]
fn custom_threshold_applies() {
    let mut l = iterated_range(RangeFamily::Eager, &[20]);
    let mut trace = TraceCollection::new();
    let config = OptimizerConfig::default().with_iteration_lowering_threshold(10);

    let result = compute_expression_iter1(&mut l.arena, &mut trace, l.iter_node, l.range, &config);

    assert_eq!(result.tag(), Some(ChangeTag::NewExpression));
}
