//! Builtin call specifications.
//!
//! A [`BuiltinSpec`] is the optimizer's oracle for one builtin: it decides
//! whether a call with the given argument nodes may run at compile time and,
//! if so, simulates it. The optimizer never looks inside a spec.
//!
//! # Pipeline Position
//!
//! ```text
//! kiln_ir (arena) → kiln_builtins (oracle) → kiln_opt (analysis + rewrites)
//! ```

mod error;
mod range;
mod spec;

pub use error::SimulationError;
pub use range::{RangeSpec, EAGER_FOLD_LIMIT};
pub use spec::{constant_args, BuiltinSpec};
