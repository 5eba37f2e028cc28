//! Expression arena.
//!
//! The arena owns every node; parents refer to children by [`ExprId`].
//! Rewriting is slot replacement: [`ExprArena::replace`] swaps the node
//! stored at an id and hands the detached node back to the caller, so the
//! parent's reference stays valid and now names the replacement.
//!
//! Each slot carries a revision counter, bumped on every replacement.
//! Memoization keyed by `(ExprId, revision)` therefore never confuses a
//! rewritten node with the one it replaced.

use crate::{ConstValue, Expr, ExprId, ExprKind, RangeFamily, RangeNode, Span};

/// Flat storage for expressions.
#[derive(Clone, Debug, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    revisions: Vec<u32>,
}

impl ExprArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node, returning its ID.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `u32::MAX` nodes.
    pub fn alloc(&mut self, expr: Expr) -> ExprId {
        let Ok(index) = u32::try_from(self.exprs.len()) else {
            panic!("expression arena exceeded u32::MAX nodes");
        };
        self.exprs.push(expr);
        self.revisions.push(0);
        ExprId::new(index)
    }

    #[inline]
    pub fn get(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: ExprId) -> &ExprKind {
        &self.exprs[id.index()].kind
    }

    #[inline]
    pub fn span(&self, id: ExprId) -> Span {
        self.exprs[id.index()].span
    }

    /// How many times the slot has been replaced.
    #[inline]
    pub fn revision(&self, id: ExprId) -> u32 {
        self.revisions[id.index()]
    }

    /// Number of allocated nodes.
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    /// Returns `true` if no nodes have been allocated.
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    /// Put `expr` into the slot `id`, returning the detached node.
    pub fn replace(&mut self, id: ExprId, expr: Expr) -> Expr {
        let slot = id.index();
        self.revisions[slot] = self.revisions[slot].wrapping_add(1);
        std::mem::replace(&mut self.exprs[slot], expr)
    }

    /// Replace the kind stored at `id`, keeping its span.
    pub fn replace_kind(&mut self, id: ExprId, kind: ExprKind) -> Expr {
        let span = self.span(id);
        self.replace(id, Expr::new(kind, span))
    }

    // Node construction helpers

    pub fn constant(&mut self, value: ConstValue, span: Span) -> ExprId {
        self.alloc(Expr::new(ExprKind::Constant(value), span))
    }

    /// Allocate a constant that stands for a value derived from
    /// `provenance`; the new node inherits its span.
    pub fn constant_from(&mut self, value: ConstValue, provenance: ExprId) -> ExprId {
        let span = self.span(provenance);
        self.constant(value, span)
    }

    pub fn int(&mut self, value: i64, span: Span) -> ExprId {
        self.constant(ConstValue::Int(value), span)
    }

    pub fn float(&mut self, value: f64, span: Span) -> ExprId {
        self.constant(ConstValue::float(value), span)
    }

    pub fn variable(&mut self, name: impl Into<String>, span: Span) -> ExprId {
        self.alloc(Expr::new(ExprKind::Variable(name.into()), span))
    }

    pub fn call(&mut self, callee: impl Into<String>, args: Vec<ExprId>, span: Span) -> ExprId {
        self.alloc(Expr::new(
            ExprKind::Call {
                callee: callee.into(),
                args,
            },
            span,
        ))
    }

    /// Allocate a range call. Returns `None` unless 1-3 arguments are given.
    pub fn range(&mut self, family: RangeFamily, args: &[ExprId], span: Span) -> Option<ExprId> {
        let node = RangeNode::from_args(family, args)?;
        Some(self.alloc(Expr::new(ExprKind::Range(node), span)))
    }

    pub fn iter(&mut self, iterable: ExprId, span: Span) -> ExprId {
        self.alloc(Expr::new(ExprKind::Iter { iterable }, span))
    }
}
