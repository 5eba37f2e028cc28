//! Property-based tests for range analysis.
//!
//! Predicted lengths and elements are compared against a brute-force
//! enumeration of the runtime's range semantics:
//! 1. Length: `iteration_length` equals the number of enumerated elements
//! 2. Elements: `iteration_value(i)` is the i-th element, `None` past the end
//! 3. Folding: an eager call folds to exactly the enumerated list

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Proptest macros generate code with these patterns"
)]

use kiln_ir::{ConstValue, ExprArena, ExprKind, LanguageVersion, RangeFamily, RangeNode, Span};
use kiln_opt::{Optimizer, OptimizerConfig, Probe, RangeAnalysis};
use proptest::prelude::*;

const VERSION: LanguageVersion = LanguageVersion::PY2_7;

// -- Reference Semantics --

fn enumerate(low: i64, high: i64, step: i64) -> Vec<i64> {
    let mut out = Vec::new();
    let mut x = low;
    while (step > 0 && x < high) || (step < 0 && x > high) {
        out.push(x);
        x += step;
    }
    out
}

fn range_call(
    arena: &mut ExprArena,
    family: RangeFamily,
    bounds: &[i64],
) -> (kiln_ir::ExprId, RangeNode) {
    let args: Vec<_> = bounds.iter().map(|&v| arena.int(v, Span::DUMMY)).collect();
    let id = arena.range(family, &args, Span::DUMMY).expect("1-3 arguments");
    let ExprKind::Range(node) = *arena.kind(id) else {
        panic!("range node expected");
    };
    (id, node)
}

// -- Strategies --

fn bound() -> impl Strategy<Value = i64> {
    -60i64..60
}

fn step() -> impl Strategy<Value = i64> {
    prop_oneof![-7i64..=-1, 1i64..=7]
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn three_argument_length_matches_enumeration(low in bound(), high in bound(), step in step()) {
        let mut arena = ExprArena::new();
        let (_, node) = range_call(&mut arena, RangeFamily::Eager, &[low, high, step]);
        let probe = Probe::new(&arena, VERSION);

        let expected = enumerate(low, high, step);
        prop_assert_eq!(node.iteration_length(&probe), Some(expected.len() as u64));
    }

    #[test]
    fn three_argument_elements_match_enumeration(low in bound(), high in bound(), step in step()) {
        let mut arena = ExprArena::new();
        let (_, node) = range_call(&mut arena, RangeFamily::Lazy, &[low, high, step]);
        let probe = Probe::new(&arena, VERSION);

        let expected = enumerate(low, high, step);
        for (index, value) in expected.iter().enumerate() {
            prop_assert_eq!(node.iteration_value(&probe, index as u64), Some(*value));
        }
        prop_assert_eq!(node.iteration_value(&probe, expected.len() as u64), None);
    }

    #[test]
    fn two_argument_matches_unit_step(low in bound(), high in bound()) {
        let mut arena = ExprArena::new();
        let (_, node) = range_call(&mut arena, RangeFamily::Eager, &[low, high]);
        let probe = Probe::new(&arena, VERSION);

        let expected = enumerate(low, high, 1);
        prop_assert_eq!(node.iteration_length(&probe), Some(expected.len() as u64));
        let predicted: Vec<_> = (0..).map_while(|i| node.iteration_value(&probe, i)).collect();
        prop_assert_eq!(predicted, expected);
    }

    #[test]
    fn one_argument_values_run_through_length(high in bound()) {
        let mut arena = ExprArena::new();
        let (_, node) = range_call(&mut arena, RangeFamily::Eager, &[high]);
        let probe = Probe::new(&arena, VERSION);

        let length = high.max(0) as u64;
        prop_assert_eq!(node.iteration_length(&probe), Some(length));
        for index in 0..=length {
            prop_assert_eq!(node.iteration_value(&probe, index), Some(index as i64));
        }
        prop_assert_eq!(node.iteration_value(&probe, length + 1), None);
    }

    #[test]
    fn handle_enumerates_runtime_elements(low in bound(), high in bound(), step in step()) {
        let mut arena = ExprArena::new();
        let (_, node) = range_call(&mut arena, RangeFamily::Lazy, &[low, high, step]);
        let probe = Probe::new(&arena, VERSION);

        let handle = node.iteration_handle(&probe).expect("bounds are known");
        prop_assert_eq!(handle.iter().collect::<Vec<_>>(), enumerate(low, high, step));
    }

    #[test]
    fn truth_follows_emptiness(low in bound(), high in bound(), step in step()) {
        let mut arena = ExprArena::new();
        let (_, node) = range_call(&mut arena, RangeFamily::Eager, &[low, high, step]);
        let probe = Probe::new(&arena, VERSION);

        let nonempty = !enumerate(low, high, step).is_empty();
        prop_assert_eq!(node.truth_value(&probe).to_option(), Some(nonempty));
    }

    #[test]
    fn eager_fold_produces_enumerated_list(low in bound(), high in bound(), step in step()) {
        let mut arena = ExprArena::new();
        let (id, _) = range_call(&mut arena, RangeFamily::Eager, &[low, high, step]);

        Optimizer::new(OptimizerConfig::new(VERSION)).run(&mut arena, id);

        let expected = ConstValue::int_list(enumerate(low, high, step));
        prop_assert_eq!(arena.kind(id).as_constant(), Some(&expected));
    }
}
