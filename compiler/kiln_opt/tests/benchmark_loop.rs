//! End-to-end: `for x in range(50000)` on a version with an eager range.
//!
//! The eager call is too long to fold into a list, so folding is refused and
//! an exception exit is recorded. Under iteration the call is lowered to the
//! lazy builtin, which then folds to a range constant.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use kiln_ir::{
    ConstValue, ExceptionKind, ExprArena, ExprId, LanguageVersion, RangeFamily, RangeValue, Span,
};
use kiln_opt::{
    compute_expression, compute_expression_iter1, ChangeTag, Optimizer, OptimizerConfig,
    TraceCollection,
};
use pretty_assertions::assert_eq;

/// Builds `iter(range(50000))` and returns `(iter, range)`.
fn benchmark_loop(arena: &mut ExprArena, family: RangeFamily) -> (ExprId, ExprId) {
    let count = arena.int(50000, Span::new(15, 20));
    let range = arena
        .range(family, &[count], Span::new(9, 21))
        .expect("one argument");
    let iter = arena.iter(range, Span::new(0, 21));
    (iter, range)
}

#[test]
fn eager_fold_is_refused() {
    let mut arena = ExprArena::new();
    let (_, range) = benchmark_loop(&mut arena, RangeFamily::Eager);
    let config = OptimizerConfig::new(LanguageVersion::PY2_7);
    let mut trace = TraceCollection::new();

    let result = compute_expression(&mut arena, &mut trace, range, &config);

    assert_eq!(result.tag(), None);
    assert_eq!(trace.exception_exits(), &[ExceptionKind::BaseException]);
    assert!(arena.kind(range).as_range().is_some());
}

#[test]
fn lowering_then_folding_by_hand() {
    let mut arena = ExprArena::new();
    let (iter, range) = benchmark_loop(&mut arena, RangeFamily::Eager);
    let config = OptimizerConfig::new(LanguageVersion::PY2_7);
    let mut trace = TraceCollection::new();

    let lowered = compute_expression_iter1(&mut arena, &mut trace, iter, range, &config);
    assert_eq!(lowered.node, iter);
    assert_eq!(lowered.tag(), Some(ChangeTag::NewExpression));
    assert_eq!(
        lowered.change.map(|change| change.message),
        Some("Replaced 'range' with 'xrange' built-in call for iteration.".to_owned())
    );
    let lazy = arena.kind(range).as_range().expect("still a range call");
    assert_eq!(lazy.family(), RangeFamily::Lazy);

    let folded = compute_expression(&mut arena, &mut trace, range, &config);
    assert_eq!(folded.tag(), Some(ChangeTag::NewConstant));
    assert_eq!(
        arena.kind(range).as_constant(),
        Some(&ConstValue::Range(RangeValue::up_to(50000)))
    );
    assert!(!trace.may_exit_via_exception());
}

#[test]
fn optimizer_rewrites_the_loop() {
    let mut arena = ExprArena::new();
    let (iter, range) = benchmark_loop(&mut arena, RangeFamily::Eager);

    let outcome =
        Optimizer::new(OptimizerConfig::new(LanguageVersion::PY2_7)).run(&mut arena, iter);

    assert_eq!(outcome.count(ChangeTag::NewExpression), 1);
    assert_eq!(outcome.count(ChangeTag::NewConstant), 1);
    assert_eq!(
        arena.kind(range).as_constant(),
        Some(&ConstValue::Range(RangeValue::up_to(50000)))
    );
    assert_eq!(arena.span(range), Span::new(9, 21));
}

#[test]
fn modern_version_folds_directly() {
    // `range` is the lazy builtin here.
    let mut arena = ExprArena::new();
    let (iter, range) = benchmark_loop(&mut arena, RangeFamily::Lazy);

    let outcome = Optimizer::new(OptimizerConfig::new(LanguageVersion::PY3)).run(&mut arena, iter);

    assert_eq!(outcome.count(ChangeTag::NewExpression), 0);
    assert_eq!(outcome.count(ChangeTag::NewConstant), 1);
    assert_eq!(
        arena.kind(range).as_constant(),
        Some(&ConstValue::Range(RangeValue::up_to(50000)))
    );
}
