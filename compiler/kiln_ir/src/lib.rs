//! Kiln IR - expression tree types for the optimizer.
//!
//! This crate contains the data structures the optimizer reasons about:
//! - Spans for source locations
//! - `ExprId` indices and the `ExprArena` that owns every node
//! - Expression kinds, including the six range-call shapes
//! - Compile-time constant values (`ConstValue`, `RangeValue`)
//! - Shapes, tri-state truth values and exception kinds
//! - The `LanguageVersion` that version-conditional rules take as a parameter
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: No `Box<Expr>`, children are `ExprId(u32)` indices
//! - **Replace in Place**: rewriting a node swaps its arena slot, so the parent
//!   keeps pointing at the same `ExprId`
//!
//! Types that contain floats store them as u64 bits for Hash compatibility.

mod arena;
mod exception;
mod expr;
mod expr_id;
mod range_node;
mod shape;
mod span;
mod value;
mod version;

pub use arena::ExprArena;
pub use exception::ExceptionKind;
pub use expr::{Expr, ExprKind};
pub use expr_id::ExprId;
pub use range_node::{RangeArity, RangeFamily, RangeNode};
pub use shape::{Truth, TypeShape};
pub use span::Span;
pub use value::{ConstValue, RangeIter, RangeValue};
pub use version::LanguageVersion;
