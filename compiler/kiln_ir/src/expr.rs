//! Expression nodes.

use smallvec::SmallVec;

use crate::{ConstValue, ExprId, RangeNode, Span};

/// Expression node: a kind plus the source span it came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Expression kinds.
///
/// Only the kinds range analysis needs to tell apart are distinguished;
/// everything else the optimizer cannot see through is an opaque `Call`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExprKind {
    /// A compile-time constant, either from source or from folding.
    Constant(ConstValue),
    /// Reference to a variable whose value is not known.
    Variable(String),
    /// Call to anything other than the range builtins.
    Call { callee: String, args: Vec<ExprId> },
    /// Call to the eager or lazy range builtin.
    Range(RangeNode),
    /// Iteration over `iterable` (the `iter()` taken by a `for` loop).
    Iter { iterable: ExprId },
}

impl ExprKind {
    /// Child expressions in evaluation order.
    pub fn children(&self) -> SmallVec<[ExprId; 3]> {
        match self {
            ExprKind::Constant(_) | ExprKind::Variable(_) => SmallVec::new(),
            ExprKind::Call { args, .. } => args.iter().copied().collect(),
            ExprKind::Range(range) => range.args(),
            ExprKind::Iter { iterable } => {
                let mut children = SmallVec::new();
                children.push(*iterable);
                children
            }
        }
    }

    pub fn as_constant(&self) -> Option<&ConstValue> {
        match self {
            ExprKind::Constant(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<&RangeNode> {
        match self {
            ExprKind::Range(range) => Some(range),
            _ => None,
        }
    }
}
