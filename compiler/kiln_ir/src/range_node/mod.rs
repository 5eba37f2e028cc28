//! Range builtin call nodes.
//!
//! The range builtin comes in two families (eager, materializing a list;
//! lazy, producing a range object) and three arities. The six shapes are a
//! closed enum so every consumer matches all of them.
//!
//! In the one-argument shapes the sole argument is called `low` although it
//! is the exclusive upper bound of a range starting at zero.

use smallvec::SmallVec;

use crate::{ExprId, LanguageVersion};

/// Which builtin the call refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RangeFamily {
    /// Materializes the whole sequence as a list.
    Eager,
    /// Produces a non-materialized range descriptor.
    Lazy,
}

/// Number of explicit arguments.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RangeArity {
    One,
    Two,
    Three,
}

impl RangeArity {
    pub const fn count(self) -> usize {
        match self {
            RangeArity::One => 1,
            RangeArity::Two => 2,
            RangeArity::Three => 3,
        }
    }
}

/// A call to the eager or lazy range builtin with 1-3 arguments.
///
/// Argument accessors return `None` for arguments the shape does not have;
/// implicit defaults (low 0, step 1) are never materialized as nodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RangeNode {
    Eager1 { low: ExprId },
    Eager2 { low: ExprId, high: ExprId },
    Eager3 { low: ExprId, high: ExprId, step: ExprId },
    Lazy1 { low: ExprId },
    Lazy2 { low: ExprId, high: ExprId },
    Lazy3 { low: ExprId, high: ExprId, step: ExprId },
}

impl RangeNode {
    /// Build the shape matching the given arguments.
    ///
    /// Returns `None` for a step without a high bound.
    pub fn new(
        family: RangeFamily,
        low: ExprId,
        high: Option<ExprId>,
        step: Option<ExprId>,
    ) -> Option<Self> {
        let node = match (family, high, step) {
            (RangeFamily::Eager, None, None) => RangeNode::Eager1 { low },
            (RangeFamily::Eager, Some(high), None) => RangeNode::Eager2 { low, high },
            (RangeFamily::Eager, Some(high), Some(step)) => RangeNode::Eager3 { low, high, step },
            (RangeFamily::Lazy, None, None) => RangeNode::Lazy1 { low },
            (RangeFamily::Lazy, Some(high), None) => RangeNode::Lazy2 { low, high },
            (RangeFamily::Lazy, Some(high), Some(step)) => RangeNode::Lazy3 { low, high, step },
            (_, None, Some(_)) => return None,
        };
        Some(node)
    }

    /// Build from a positional argument list of length 1-3.
    pub fn from_args(family: RangeFamily, args: &[ExprId]) -> Option<Self> {
        match *args {
            [low] => Self::new(family, low, None, None),
            [low, high] => Self::new(family, low, Some(high), None),
            [low, high, step] => Self::new(family, low, Some(high), Some(step)),
            _ => None,
        }
    }

    pub const fn family(&self) -> RangeFamily {
        match self {
            RangeNode::Eager1 { .. } | RangeNode::Eager2 { .. } | RangeNode::Eager3 { .. } => {
                RangeFamily::Eager
            }
            RangeNode::Lazy1 { .. } | RangeNode::Lazy2 { .. } | RangeNode::Lazy3 { .. } => {
                RangeFamily::Lazy
            }
        }
    }

    pub const fn arity(&self) -> RangeArity {
        match self {
            RangeNode::Eager1 { .. } | RangeNode::Lazy1 { .. } => RangeArity::One,
            RangeNode::Eager2 { .. } | RangeNode::Lazy2 { .. } => RangeArity::Two,
            RangeNode::Eager3 { .. } | RangeNode::Lazy3 { .. } => RangeArity::Three,
        }
    }

    /// First argument. Present in every shape.
    pub const fn low(&self) -> ExprId {
        match *self {
            RangeNode::Eager1 { low }
            | RangeNode::Eager2 { low, .. }
            | RangeNode::Eager3 { low, .. }
            | RangeNode::Lazy1 { low }
            | RangeNode::Lazy2 { low, .. }
            | RangeNode::Lazy3 { low, .. } => low,
        }
    }

    pub const fn high(&self) -> Option<ExprId> {
        match *self {
            RangeNode::Eager1 { .. } | RangeNode::Lazy1 { .. } => None,
            RangeNode::Eager2 { high, .. }
            | RangeNode::Eager3 { high, .. }
            | RangeNode::Lazy2 { high, .. }
            | RangeNode::Lazy3 { high, .. } => Some(high),
        }
    }

    pub const fn step(&self) -> Option<ExprId> {
        match *self {
            RangeNode::Eager3 { step, .. } | RangeNode::Lazy3 { step, .. } => Some(step),
            _ => None,
        }
    }

    /// Arguments in positional order.
    pub fn args(&self) -> SmallVec<[ExprId; 3]> {
        let mut args = SmallVec::new();
        args.push(self.low());
        args.extend(self.high());
        args.extend(self.step());
        args
    }

    /// The same call with the same argument nodes, in another family.
    #[must_use]
    pub fn with_family(self, family: RangeFamily) -> Self {
        match (family, self) {
            (RangeFamily::Eager, RangeNode::Lazy1 { low }) => RangeNode::Eager1 { low },
            (RangeFamily::Eager, RangeNode::Lazy2 { low, high }) => {
                RangeNode::Eager2 { low, high }
            }
            (RangeFamily::Eager, RangeNode::Lazy3 { low, high, step }) => {
                RangeNode::Eager3 { low, high, step }
            }
            (RangeFamily::Lazy, RangeNode::Eager1 { low }) => RangeNode::Lazy1 { low },
            (RangeFamily::Lazy, RangeNode::Eager2 { low, high }) => RangeNode::Lazy2 { low, high },
            (RangeFamily::Lazy, RangeNode::Eager3 { low, high, step }) => {
                RangeNode::Lazy3 { low, high, step }
            }
            (_, unchanged) => unchanged,
        }
    }

    /// Source-level name of the builtin this node calls.
    pub const fn builtin_name(&self, version: LanguageVersion) -> &'static str {
        match self.family() {
            RangeFamily::Eager => version.eager_range_name(),
            RangeFamily::Lazy => version.lazy_range_name(),
        }
    }
}
