//! Trace collection: per-pass knowledge and the one-time constant replacement.
//!
//! A `TraceCollection` belongs to exactly one optimizer pass. It records the
//! points where execution may leave via an exception, performs constant
//! replacements on behalf of folding rules, and remembers which computations
//! already failed so a revisit of an unchanged node does not simulate again.

use std::fmt;

use kiln_builtins::SimulationError;
use kiln_ir::{ConstValue, ExceptionKind, ExprArena, ExprId, ExprKind};
use rustc_hash::FxHashMap;

/// Kind of tree change a rewrite made.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChangeTag {
    /// The node was replaced by a constant.
    NewConstant,
    /// The node was replaced by a different expression; revisit it.
    NewExpression,
}

impl ChangeTag {
    pub const fn as_str(self) -> &'static str {
        match self {
            ChangeTag::NewConstant => "new_constant",
            ChangeTag::NewExpression => "new_expression",
        }
    }
}

impl fmt::Display for ChangeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tree change plus its human-readable justification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Change {
    pub tag: ChangeTag,
    pub message: String,
}

/// Result of a compute step: the node now standing where the visited one
/// stood, and the change made, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComputeResult {
    pub node: ExprId,
    pub change: Option<Change>,
}

impl ComputeResult {
    pub fn unchanged(node: ExprId) -> Self {
        ComputeResult { node, change: None }
    }

    pub fn changed(node: ExprId, tag: ChangeTag, message: String) -> Self {
        ComputeResult {
            node,
            change: Some(Change { tag, message }),
        }
    }

    pub fn tag(&self) -> Option<ChangeTag> {
        self.change.as_ref().map(|change| change.tag)
    }
}

/// Knowledge threaded through one optimizer pass.
#[derive(Debug, Default)]
pub struct TraceCollection {
    exception_exits: Vec<ExceptionKind>,
    /// Failed computations, keyed by slot and slot revision. A replacement
    /// bumps the revision, so successes need no entry.
    failed: FxHashMap<(ExprId, u32), ExceptionKind>,
    changes: Vec<(ExprId, Change)>,
}

impl TraceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execution may leave the current point via an exception of `kind`.
    pub fn on_exception_raise_exit(&mut self, kind: ExceptionKind) {
        self.exception_exits.push(kind);
    }

    pub fn exception_exits(&self) -> &[ExceptionKind] {
        &self.exception_exits
    }

    pub fn may_exit_via_exception(&self) -> bool {
        !self.exception_exits.is_empty()
    }

    /// Changes made during this pass, in order.
    pub fn changes(&self) -> &[(ExprId, Change)] {
        &self.changes
    }

    /// Log a change a rewrite rule made to `node`.
    pub fn record_change(&mut self, node: ExprId, change: Change) {
        self.changes.push((node, change));
    }

    /// Run `computation` once for the current contents of `node` and, on
    /// success, replace the node with the resulting constant.
    ///
    /// A failed computation leaves the node in place and records an
    /// exception exit of the kind the call would raise. `description` is
    /// only evaluated when a replacement happens.
    pub fn get_compile_time_computation_result<C, D>(
        &mut self,
        arena: &mut ExprArena,
        node: ExprId,
        computation: C,
        description: D,
    ) -> ComputeResult
    where
        C: FnOnce(&ExprArena) -> Result<ConstValue, SimulationError>,
        D: FnOnce() -> String,
    {
        let key = (node, arena.revision(node));
        if let Some(&kind) = self.failed.get(&key) {
            tracing::trace!(?node, ?kind, "computation already failed");
            self.on_exception_raise_exit(kind);
            return ComputeResult::unchanged(node);
        }

        match computation(arena) {
            Ok(value) => {
                let message = description();
                tracing::debug!(?node, %value, "replaced with constant");
                arena.replace_kind(node, ExprKind::Constant(value));
                let change = Change {
                    tag: ChangeTag::NewConstant,
                    message,
                };
                self.record_change(node, change.clone());
                ComputeResult {
                    node,
                    change: Some(change),
                }
            }
            Err(err) => {
                let kind = err.exception_kind();
                tracing::debug!(?node, %err, "compile-time computation abandoned");
                self.on_exception_raise_exit(kind);
                self.failed.insert(key, kind);
                ComputeResult::unchanged(node)
            }
        }
    }
}
