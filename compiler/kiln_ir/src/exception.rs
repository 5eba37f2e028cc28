//! Exception kinds the optimizer reasons about.

use std::fmt;

/// Runtime exception class an expression may raise.
///
/// `BaseException` is the catch-all: recording an exit with it means
/// "any exception may leave here".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExceptionKind {
    BaseException,
    TypeError,
    ValueError,
    NameError,
    MemoryError,
}

impl ExceptionKind {
    pub const fn name(self) -> &'static str {
        match self {
            ExceptionKind::BaseException => "BaseException",
            ExceptionKind::TypeError => "TypeError",
            ExceptionKind::ValueError => "ValueError",
            ExceptionKind::NameError => "NameError",
            ExceptionKind::MemoryError => "MemoryError",
        }
    }
}

impl fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
