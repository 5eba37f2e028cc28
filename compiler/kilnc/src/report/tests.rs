use super::*;
use crate::parse_args;
use kiln_opt::ChangeTag;
use pretty_assertions::assert_eq;

fn report(list: &[&str]) -> Report {
    let args: Vec<String> = list.iter().map(|&s| s.to_owned()).collect();
    run(&parse_args(&args).unwrap()).unwrap()
}

fn tags(report: &Report) -> Vec<ChangeTag> {
    report.changes.iter().map(|change| change.tag).collect()
}

#[test]
fn short_eager_range_folds_to_a_list() {
    let report = report(&["0", "10", "3"]);

    assert_eq!(report.call, "range(0, 10, 3)");
    assert_eq!(report.shape, TypeShape::List);
    assert_eq!(report.truth, Truth::True);
    assert_eq!(report.length, Some(4));
    assert!(!report.side_effects);
    assert!(!report.may_raise);
    assert_eq!(report.elements, Some(vec![0, 3, 6, 9]));
    assert_eq!(tags(&report), vec![ChangeTag::NewConstant]);
    assert_eq!(
        report.changes[0].message,
        "Built-in call to 'range' computed."
    );
    assert_eq!(report.result.as_deref(), Some("[0, 3, 6, 9]"));
}

#[test]
fn benchmark_loop_is_lowered_then_folded() {
    let report = report(&["--iterate", "50000"]);

    assert_eq!(report.call, "for x in range(50000):");
    assert_eq!(report.length, Some(50000));
    assert_eq!(
        tags(&report),
        vec![ChangeTag::NewExpression, ChangeTag::NewConstant]
    );
    assert_eq!(
        report.changes[1].message,
        "Built-in call to 'xrange' computed."
    );
    assert_eq!(report.result.as_deref(), Some("range(0, 50000, 1)"));
    assert!(report.exception_exits.is_empty());
}

#[test]
fn long_eager_range_outside_a_loop_stays() {
    let report = report(&["50000"]);

    assert!(report.changes.is_empty());
    assert_eq!(report.passes, 1);
    assert_eq!(report.exception_exits, vec![ExceptionKind::BaseException]);
    assert_eq!(report.result, None);
}

#[test]
fn unknown_argument() {
    let report = report(&["--lazy", "?", "7"]);

    assert_eq!(report.call, "xrange(?, 7)");
    assert_eq!(report.shape, TypeShape::Range);
    assert_eq!(report.truth, Truth::Unknown);
    assert_eq!(report.length, None);
    assert!(report.side_effects);
    assert!(report.may_raise);
    assert_eq!(report.elements, None);
    assert_eq!(report.result, None);
}

#[test]
fn zero_step_folding_fails_with_value_error() {
    let report = report(&["0", "10", "0"]);

    assert!(report.may_raise);
    assert_eq!(report.length, None);
    assert_eq!(report.exception_exits, vec![ExceptionKind::ValueError]);
    assert_eq!(report.result, None);
}

#[test]
fn rendered_report() {
    let text = report(&["--lazy", "40"]).to_string();

    assert!(text.starts_with("call:            xrange(40)\n"));
    assert!(text.contains("shape:           range\n"));
    assert!(text.contains(
        "elements:        [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15] ... (40 total)\n"
    ));
    assert!(text.contains("  new_constant: Built-in call to 'xrange' computed.\n"));
    assert!(text.ends_with("result:          range(0, 40, 1)\n"));
}
