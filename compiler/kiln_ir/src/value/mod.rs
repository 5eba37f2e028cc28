//! Compile-time constant values.
//!
//! `ConstValue` is what a folded node holds. `RangeValue` is the constant
//! form of a lazy range object and also carries the runtime's exact length
//! and element arithmetic, which analysis and simulation both rely on.

use std::fmt;
use std::iter::FusedIterator;

use crate::shape::{Truth, TypeShape};

/// A value known at compile time.
///
/// Floats are stored as their bit pattern so the type can derive `Eq` and
/// `Hash`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstValue {
    Int(i64),
    Float(u64),
    Bool(bool),
    Str(String),
    None,
    List(Vec<ConstValue>),
    Range(RangeValue),
}

impl ConstValue {
    /// Build a float constant from its value.
    pub fn float(value: f64) -> Self {
        ConstValue::Float(value.to_bits())
    }

    /// Build a list constant of integers.
    pub fn int_list(values: impl IntoIterator<Item = i64>) -> Self {
        ConstValue::List(values.into_iter().map(ConstValue::Int).collect())
    }

    pub fn shape(&self) -> TypeShape {
        match self {
            ConstValue::Int(_) => TypeShape::Int,
            ConstValue::Float(_) => TypeShape::Float,
            ConstValue::Bool(_) => TypeShape::Bool,
            ConstValue::Str(_) => TypeShape::Str,
            ConstValue::None => TypeShape::NoneType,
            ConstValue::List(_) => TypeShape::List,
            ConstValue::Range(_) => TypeShape::Range,
        }
    }

    /// Runtime type name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.shape().name()
    }

    pub fn is_float(&self) -> bool {
        matches!(self, ConstValue::Float(_))
    }

    /// Exact integer value: ints, and bools as 0/1.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConstValue::Int(v) => Some(*v),
            ConstValue::Bool(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    /// Integer value under number-constant coercion: exact integers as
    /// [`as_int`](Self::as_int), floats truncated toward zero when the result
    /// is representable.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        reason = "float truncation is the coercion being modelled, range checked first"
    )]
    pub fn as_truncated_int(&self) -> Option<i64> {
        match self {
            ConstValue::Float(bits) => {
                let v = f64::from_bits(*bits).trunc();
                if v.is_finite() && v >= i64::MIN as f64 && v < i64::MAX as f64 {
                    Some(v as i64)
                } else {
                    None
                }
            }
            other => other.as_int(),
        }
    }

    /// Truth value the runtime would compute for this constant.
    pub fn truth(&self) -> Truth {
        let truthy = match self {
            ConstValue::Int(v) => *v != 0,
            ConstValue::Float(bits) => f64::from_bits(*bits) != 0.0,
            ConstValue::Bool(v) => *v,
            ConstValue::Str(s) => !s.is_empty(),
            ConstValue::None => false,
            ConstValue::List(items) => !items.is_empty(),
            ConstValue::Range(range) => !range.is_empty(),
        };
        Truth::from_option(Some(truthy))
    }
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Int(v) => write!(f, "{v}"),
            ConstValue::Float(bits) => write!(f, "{:?}", f64::from_bits(*bits)),
            ConstValue::Bool(true) => f.write_str("True"),
            ConstValue::Bool(false) => f.write_str("False"),
            ConstValue::Str(s) => write!(f, "{s:?}"),
            ConstValue::None => f.write_str("None"),
            ConstValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            ConstValue::Range(range) => write!(f, "{range}"),
        }
    }
}

// RangeValue

/// A lazy range with statically known bounds.
///
/// Invariant: `step != 0`. A zero step is a guaranteed runtime failure, so
/// such a range is never constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeValue {
    start: i64,
    stop: i64,
    step: i64,
}

impl RangeValue {
    /// Returns `None` for a zero step.
    pub const fn new(start: i64, stop: i64, step: i64) -> Option<Self> {
        if step == 0 {
            None
        } else {
            Some(RangeValue { start, stop, step })
        }
    }

    /// `range(stop)`.
    pub const fn up_to(stop: i64) -> Self {
        RangeValue {
            start: 0,
            stop,
            step: 1,
        }
    }

    /// `range(start, stop)`.
    pub const fn between(start: i64, stop: i64) -> Self {
        RangeValue {
            start,
            stop,
            step: 1,
        }
    }

    pub const fn start(&self) -> i64 {
        self.start
    }

    pub const fn stop(&self) -> i64 {
        self.stop
    }

    pub const fn step(&self) -> i64 {
        self.step
    }

    /// Number of elements, as the runtime computes it.
    ///
    /// The two direction branches stay separate: a step pointing away from
    /// `stop` yields an empty range, never a negative estimate.
    pub fn len(&self) -> u64 {
        let low = i128::from(self.start);
        let high = i128::from(self.stop);
        let step = i128::from(self.step);

        let estimate = if low < high {
            if step < 0 {
                0
            } else {
                ceil_div(high - low, step)
            }
        } else if step > 0 {
            0
        } else {
            ceil_div(high - low, step)
        };

        debug_assert!(estimate >= 0, "negative range length {estimate}");
        u64::try_from(estimate).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`, or `None` once the range is exhausted.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "elements lie between start and stop, both i64"
    )]
    pub fn get(&self, index: u64) -> Option<i64> {
        if index >= self.len() {
            return None;
        }
        let value = i128::from(self.start) + i128::from(index) * i128::from(self.step);
        Some(value as i64)
    }

    /// Returns `true` if `value` is one of the elements.
    pub fn contains(&self, value: i64) -> bool {
        let offset = i128::from(value) - i128::from(self.start);
        let step = i128::from(self.step);
        if offset % step != 0 {
            return false;
        }
        let position = offset / step;
        position >= 0 && position < i128::from(self.len())
    }

    /// Iterate the elements. Each call starts from the first element.
    pub fn iter(&self) -> RangeIter {
        RangeIter {
            range: *self,
            next: 0,
            len: self.len(),
        }
    }

    /// Materialize the elements as an integer list constant.
    pub fn to_list(&self) -> ConstValue {
        ConstValue::int_list(self.iter())
    }
}

impl fmt::Display for RangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "range({}, {}, {})", self.start, self.stop, self.step)
    }
}

impl IntoIterator for RangeValue {
    type Item = i64;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

/// Ceiling of `a / b`, exact. `b` must be nonzero.
fn ceil_div(a: i128, b: i128) -> i128 {
    let quotient = a / b;
    let remainder = a % b;
    if remainder != 0 && (remainder > 0) == (b > 0) {
        quotient + 1
    } else {
        quotient
    }
}

/// Iterator over the elements of a [`RangeValue`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: RangeValue,
    next: u64,
    len: u64,
}

impl Iterator for RangeIter {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.next >= self.len {
            return None;
        }
        let value = self.range.get(self.next);
        self.next += 1;
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for RangeIter {}
