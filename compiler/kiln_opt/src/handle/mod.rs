//! Iteration handles over predicted range elements.

use kiln_ir::{RangeArity, RangeIter, RangeValue};

/// Immutable snapshot of statically known range bounds.
///
/// [`iter`](Self::iter) re-derives the sequence from the stored bounds on
/// every call, so a handle can be walked any number of times.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IterationHandle {
    arity: RangeArity,
    range: RangeValue,
}

impl IterationHandle {
    /// `range(high)`.
    pub fn range1(high: i64) -> Self {
        IterationHandle {
            arity: RangeArity::One,
            range: RangeValue::up_to(high),
        }
    }

    /// `range(low, high)`.
    pub fn range2(low: i64, high: i64) -> Self {
        IterationHandle {
            arity: RangeArity::Two,
            range: RangeValue::between(low, high),
        }
    }

    /// `range(low, high, step)`; `None` for a zero step.
    pub fn range3(low: i64, high: i64, step: i64) -> Option<Self> {
        Some(IterationHandle {
            arity: RangeArity::Three,
            range: RangeValue::new(low, high, step)?,
        })
    }

    pub fn arity(&self) -> RangeArity {
        self.arity
    }

    pub fn iter(&self) -> RangeIter {
        self.range.iter()
    }

    pub fn len(&self) -> u64 {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn value_at(&self, index: u64) -> Option<i64> {
        self.range.get(index)
    }

    /// Returns `true` if every element is truthy, i.e. 0 is not an element.
    pub fn all_elements_truthy(&self) -> bool {
        !self.range.contains(0)
    }
}

impl IntoIterator for &IterationHandle {
    type Item = i64;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}
