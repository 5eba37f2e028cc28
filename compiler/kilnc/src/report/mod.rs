//! Analysis report for one range call.

use std::fmt;

use kiln_ir::{
    ExceptionKind, Expr, ExprArena, ExprId, ExprKind, RangeFamily, RangeNode, Span, Truth,
    TypeShape,
};
use kiln_opt::{Change, Optimizer, Probe, RangeAnalysis};

use crate::{Argument, CliError, Invocation};

/// Elements printed before the list is cut short.
const ELEMENT_PREVIEW: usize = 16;

/// What the analysis predicted and what the optimizer did.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub call: String,
    pub version: String,
    pub shape: TypeShape,
    pub truth: Truth,
    pub length: Option<u64>,
    pub side_effects: bool,
    pub may_raise: bool,
    /// First predicted elements, if the bounds are known.
    pub elements: Option<Vec<i64>>,
    pub changes: Vec<Change>,
    pub passes: usize,
    pub exception_exits: Vec<ExceptionKind>,
    /// The folded constant, if the call was folded.
    pub result: Option<String>,
}

/// Build the call, analyze it, then optimize it.
#[tracing::instrument(level = "debug", skip_all)]
pub fn run(invocation: &Invocation) -> Result<Report, CliError> {
    let version = invocation.config.version;
    let mut arena = ExprArena::new();
    let (root, call, node, text) = build(&mut arena, invocation)?;

    let probe = Probe::new(&arena, version);
    let length = node.iteration_length(&probe);
    let elements = node
        .iteration_handle(&probe)
        .map(|handle| handle.iter().take(ELEMENT_PREVIEW).collect());
    let shape = node.type_shape();
    let truth = node.truth_value(&probe);
    let side_effects = node.may_have_side_effects(&probe);
    let may_raise = node.may_raise_exception(&probe, ExceptionKind::BaseException);

    let outcome = Optimizer::new(invocation.config).run(&mut arena, root);
    let result = arena.kind(call).as_constant().map(ToString::to_string);

    Ok(Report {
        call: text,
        version: version.to_string(),
        shape,
        truth,
        length,
        side_effects,
        may_raise,
        elements,
        changes: outcome.changes.into_iter().map(|(_, change)| change).collect(),
        passes: outcome.passes,
        exception_exits: outcome.trace.exception_exits().to_vec(),
        result,
    })
}

/// Allocate the call (and its iteration, if requested). Spans index into
/// the returned source text.
fn build(
    arena: &mut ExprArena,
    invocation: &Invocation,
) -> Result<(ExprId, ExprId, RangeNode, String), CliError> {
    let version = invocation.config.version;
    let callee = match invocation.family {
        RangeFamily::Eager => version.eager_range_name(),
        RangeFamily::Lazy => version.lazy_range_name(),
    };

    let prefix = if invocation.iterate { "for x in " } else { "" };
    let mut text = format!("{prefix}{callee}(");
    let call_start = prefix.len();
    let mut args = Vec::with_capacity(invocation.args.len());

    for (position, arg) in invocation.args.iter().enumerate() {
        if position > 0 {
            text.push_str(", ");
        }
        let start = text.len();
        text.push_str(&arg.to_string());
        let span = Span::new(offset(start), offset(text.len()));
        args.push(match *arg {
            Argument::Int(value) => arena.int(value, span),
            Argument::Float(value) => arena.float(value, span),
            Argument::Unknown => arena.variable(format!("arg{position}"), span),
        });
    }
    text.push(')');

    let call_span = Span::new(offset(call_start), offset(text.len()));
    let Some(node) = RangeNode::from_args(invocation.family, &args) else {
        return Err(CliError::ArgumentCount(args.len()));
    };
    let call = arena.alloc(Expr::new(ExprKind::Range(node), call_span));

    let root = if invocation.iterate {
        text.push(':');
        arena.iter(call, Span::new(0, offset(text.len())))
    } else {
        call
    };
    Ok((root, call, node, text))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "command lines are far shorter than u32::MAX"
)]
fn offset(len: usize) -> u32 {
    len as u32
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "call:            {}", self.call)?;
        writeln!(f, "version:         {}", self.version)?;
        writeln!(f, "shape:           {}", self.shape)?;
        let truth = match self.truth.to_option() {
            Some(true) => "true",
            Some(false) => "false",
            None => "unknown",
        };
        writeln!(f, "truth:           {truth}")?;
        match self.length {
            Some(length) => writeln!(f, "length:          {length}")?,
            None => writeln!(f, "length:          unknown")?,
        }
        writeln!(f, "side effects:    {}", yes_no(self.side_effects))?;
        writeln!(f, "may raise:       {}", yes_no(self.may_raise))?;
        match (&self.elements, self.length) {
            (Some(elements), Some(length)) if length > elements.len() as u64 => {
                writeln!(f, "elements:        {elements:?} ... ({length} total)")?;
            }
            (Some(elements), _) => writeln!(f, "elements:        {elements:?}")?,
            (None, _) => writeln!(f, "elements:        unknown")?,
        }

        writeln!(f, "passes:          {}", self.passes)?;
        if self.changes.is_empty() {
            writeln!(f, "rewrites:        none")?;
        } else {
            writeln!(f, "rewrites:")?;
            for change in &self.changes {
                writeln!(f, "  {}: {}", change.tag, change.message)?;
            }
        }
        if !self.exception_exits.is_empty() {
            let exits: Vec<_> = self.exception_exits.iter().map(ToString::to_string).collect();
            writeln!(f, "exception exits: {}", exits.join(", "))?;
        }
        match &self.result {
            Some(result) => writeln!(f, "result:          {result}"),
            None => writeln!(f, "result:          not folded"),
        }
    }
}

#[cfg(test)]
mod tests;
