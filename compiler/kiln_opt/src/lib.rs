//! Compile-time analysis and rewriting of range builtin calls.
//!
//! Each argument of a range call may or may not be a statically known
//! integer. From that partial knowledge this crate derives side effects,
//! possible exceptions, the resulting length, individual elements and
//! whether the call may be folded, matching the runtime's numeric semantics.
//!
//! # Pipeline Position
//!
//! ```text
//! ExprArena ──► Optimizer pass ──┬─► compute_expression        (folding)
//!                                └─► compute_expression_iter1  (eager → lazy)
//! ```
//!
//! # What Lives Here
//!
//! 1. **Analysis** (`analysis`): the [`RangeAnalysis`] trait, shared by all
//!    six range shapes
//! 2. **Probing** (`probe`): integer values, side effects and exceptions of
//!    arbitrary argument expressions
//! 3. **Iteration handles** (`handle`): restartable enumerators over
//!    predicted elements
//! 4. **Trace collection** (`trace`): exception-exit facts and the one-time
//!    constant replacement
//! 5. **Folding** (`fold`) and **iteration lowering** (`lower`)
//! 6. **Pass** (`pass`): bottom-up driver applying both rewrites to fixpoint
//!
//! Unknown always biases toward "may raise", "may have side effects" and
//! "cannot fold".

mod analysis;
mod config;
mod fold;
mod handle;
mod lower;
mod pass;
mod probe;
mod trace;

pub use analysis::RangeAnalysis;
pub use config::OptimizerConfig;
pub use fold::{compute_builtin_spec, compute_expression};
pub use handle::IterationHandle;
pub use lower::compute_expression_iter1;
pub use pass::{Optimizer, PassOutcome};
pub use probe::Probe;
pub use trace::{Change, ChangeTag, ComputeResult, TraceCollection};
