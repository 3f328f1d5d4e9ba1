use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::ops::{Add, Sub};

/// Dense node identifier in `[0, node_count)`
pub type NodeId = usize;

/// A numeric edge cost.
///
/// Every algorithm in this crate reads exactly one cost per edge. Integer sums
/// are checked: a path cost that leaves the type's range is reported, never
/// wrapped or clamped. Floats must not be NaN, which `WeightedGraph::link`
/// enforces through [`Weight::is_valid`].
pub trait Weight:
    Copy
    + PartialOrd
    + Debug
    + Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Serialize
    + Send
    + Sync
    + 'static
{
    const ZERO: Self;

    /// Whether the value can take part in comparisons
    fn is_valid(&self) -> bool {
        true
    }

    /// Path-cost addition; `None` when the sum leaves the type's range
    fn checked_accumulate(self, other: Self) -> Option<Self> {
        Some(self + other)
    }

    /// `self - other`; `None` when the difference leaves the type's range
    fn checked_difference(self, other: Self) -> Option<Self> {
        Some(self - other)
    }

    /// Total order used by the frontier; invalid values never reach it
    fn order(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

macro_rules! impl_int_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                const ZERO: Self = 0;

                fn checked_accumulate(self, other: Self) -> Option<Self> {
                    self.checked_add(other)
                }

                fn checked_difference(self, other: Self) -> Option<Self> {
                    self.checked_sub(other)
                }
            }
        )*
    };
}

macro_rules! impl_float_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                const ZERO: Self = 0.0;

                fn is_valid(&self) -> bool {
                    !self.is_nan()
                }
            }
        )*
    };
}

impl_int_weight!(i32, i64);
impl_float_weight!(f32, f64);

/// Result of extending a distance by one edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step<W> {
    /// The tail has no distance yet
    Unreached,
    Reached(W),
    /// The sum fell below the type's minimum
    Underflow,
    /// The sum rose above the type's maximum
    Overflow,
}

/// Extend `base` (`None` meaning unreachable) by `cost`
pub fn step<W: Weight>(base: Option<W>, cost: W) -> Step<W> {
    let Some(d) = base else {
        return Step::Unreached;
    };
    match d.checked_accumulate(cost) {
        Some(sum) => Step::Reached(sum),
        None if cost < W::ZERO => Step::Underflow,
        None => Step::Overflow,
    }
}

/// Sum of an optional distance and a cost; `None` when unreachable or out
/// of range
pub fn add_distance<W: Weight>(base: Option<W>, cost: W) -> Option<W> {
    base?.checked_accumulate(cost)
}

/// Strict improvement test against an optional (possibly infinite) distance
pub fn improves<W: Weight>(candidate: W, current: Option<W>) -> bool {
    current.is_none_or(|d| candidate < d)
}
