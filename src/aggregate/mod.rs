//! Aggregate - Combining Policies for Range Queries
//!
//! Every node of a [`RangeIndex`](crate::index::RangeIndex) caches the
//! combined value of its two children, so the index is parametrised by
//! how two partial results merge and by the value that an empty range
//! contributes. The [`Aggregate`] trait captures that pair. Policies
//! are zero-sized marker types resolved at compile time - the tree walk
//! is monomorphised per policy and no function pointers are stored.

/// An associative combining operator together with its identity element.
///
/// Implementations must satisfy the monoid laws over the value type:
///
/// * `combine(x, identity()) == x` and `combine(identity(), x) == x`
/// * `combine(a, combine(b, c)) == combine(combine(a, b), c)`
///
/// Associativity is what allows a range aggregate to be assembled from
/// cached sub-range aggregates in any grouping; the identity is what a
/// pruned, non-overlapping subtree contributes to a query.
pub trait Aggregate {
    /// The element type stored at every tree node.
    type Value: Copy + PartialEq + std::fmt::Debug;

    /// The value `e` such that `combine(x, e) == x` for all `x`.
    fn identity() -> Self::Value;

    /// Merge two child aggregates into their parent's value.
    fn combine(lhs: Self::Value, rhs: Self::Value) -> Self::Value;
}

/// Range-sum policy: `combine` is wrapping addition, identity is `0`.
///
/// Sums that leave the `i64` range wrap two's-complement style, so any
/// `i64` is a legal element and no input can panic the tree walk.
/// Wrapping addition remains associative and commutative, which keeps
/// the cached sub-range sums exact modulo 2^64 regardless of the order
/// the tree combines them in.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sum;

impl Aggregate for Sum {
    type Value = i64;

    fn identity() -> i64 {
        0
    }

    fn combine(lhs: i64, rhs: i64) -> i64 {
        lhs.wrapping_add(rhs)
    }
}

/// Range-maximum policy: `combine` is `max`, identity is `i64::MIN`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Max;

impl Aggregate for Max {
    type Value = i64;

    fn identity() -> i64 {
        i64::MIN
    }

    fn combine(lhs: i64, rhs: i64) -> i64 {
        lhs.max(rhs)
    }
}
