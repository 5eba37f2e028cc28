//! Bottom-up optimizer pass over one expression tree.
//!
//! Children are visited before their parent, so a range call sees its
//! arguments already folded. Range calls are folded; a range call that an
//! `Iter` node consumes gets the iteration-lowering check, and a lowered
//! call is folded again right away under its new shape.
//!
//! Passes repeat until one makes no change or `max_passes` is reached. Each
//! pass gets a fresh [`TraceCollection`].

use kiln_ir::{ExprArena, ExprId, ExprKind};

use crate::{
    compute_expression, compute_expression_iter1, Change, ChangeTag, ComputeResult,
    OptimizerConfig, TraceCollection,
};

/// Everything the optimizer did to one tree.
#[derive(Debug, Default)]
pub struct PassOutcome {
    /// Passes run, including the final one that found nothing to do.
    pub passes: usize,
    /// Changes across all passes, in order.
    pub changes: Vec<(ExprId, Change)>,
    /// Trace of the last pass.
    pub trace: TraceCollection,
}

impl PassOutcome {
    pub fn count(&self, tag: ChangeTag) -> usize {
        self.changes
            .iter()
            .filter(|(_, change)| change.tag == tag)
            .count()
    }
}

/// Applies range folding and iteration lowering to a tree.
#[derive(Copy, Clone, Debug, Default)]
pub struct Optimizer {
    config: OptimizerConfig,
}

impl Optimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Optimizer { config }
    }

    #[tracing::instrument(level = "debug", skip(self, arena))]
    pub fn run(&self, arena: &mut ExprArena, root: ExprId) -> PassOutcome {
        let mut outcome = PassOutcome::default();

        while outcome.passes < self.config.max_passes {
            let mut trace = TraceCollection::new();
            self.visit_tree(arena, &mut trace, root);
            outcome.passes += 1;

            let changed = !trace.changes().is_empty();
            outcome.changes.extend(trace.changes().iter().cloned());
            outcome.trace = trace;
            if !changed {
                break;
            }
        }

        tracing::debug!(
            passes = outcome.passes,
            changes = outcome.changes.len(),
            "optimizer finished"
        );
        outcome
    }

    /// Post-order walk with an explicit stack; a node's children are read
    /// when it is first popped, and the node itself is processed after them.
    fn visit_tree(&self, arena: &mut ExprArena, trace: &mut TraceCollection, root: ExprId) {
        let mut stack = vec![(root, false)];

        while let Some((id, children_done)) = stack.pop() {
            if children_done {
                self.visit(arena, trace, id);
                continue;
            }
            stack.push((id, true));
            for child in arena.kind(id).children().into_iter().rev() {
                stack.push((child, false));
            }
        }
    }

    fn visit(&self, arena: &mut ExprArena, trace: &mut TraceCollection, id: ExprId) {
        let iterated = match arena.kind(id) {
            ExprKind::Range(_) => None,
            ExprKind::Iter { iterable } => Some(*iterable),
            ExprKind::Constant(_) | ExprKind::Variable(_) | ExprKind::Call { .. } => return,
        };

        match iterated {
            None => {
                compute_expression(arena, trace, id, &self.config);
            }
            Some(iterable) => {
                let result = compute_expression_iter1(arena, trace, id, iterable, &self.config);
                if is_new_expression(&result) {
                    compute_expression(arena, trace, iterable, &self.config);
                }
            }
        }
    }
}

fn is_new_expression(result: &ComputeResult) -> bool {
    result.tag() == Some(ChangeTag::NewExpression)
}
