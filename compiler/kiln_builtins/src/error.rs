//! Simulation failures.

use kiln_ir::ExceptionKind;

/// Why simulating a builtin call at compile time failed.
///
/// Most variants mirror the exception the call would raise at runtime.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("{builtin}() step argument must not be zero")]
    ZeroStep { builtin: &'static str },

    #[error("{builtin}() integer argument expected, got {type_name} (argument {position})")]
    NotAnInteger {
        builtin: &'static str,
        position: usize,
        type_name: &'static str,
    },

    #[error("argument {position} of {builtin}() is not a compile-time constant")]
    NotConstant {
        builtin: &'static str,
        position: usize,
    },

    #[error("{builtin}() expected 1 to 3 arguments, got {given}")]
    ArgumentCount { builtin: &'static str, given: usize },

    #[error("{builtin}() result has {length} elements, more than the limit of {limit}")]
    TooLarge {
        builtin: &'static str,
        length: u64,
        limit: u64,
    },
}

impl SimulationError {
    /// Exception the runtime call would raise.
    pub fn exception_kind(&self) -> ExceptionKind {
        match self {
            SimulationError::ZeroStep { .. } => ExceptionKind::ValueError,
            SimulationError::NotAnInteger { .. } | SimulationError::ArgumentCount { .. } => {
                ExceptionKind::TypeError
            }
            SimulationError::TooLarge { .. } => ExceptionKind::MemoryError,
            SimulationError::NotConstant { .. } => ExceptionKind::BaseException,
        }
    }
}
