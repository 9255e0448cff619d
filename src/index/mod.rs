//! RangeIndex - An Array-Backed Segment Tree
//!
//! The index is a complete binary tree flattened into a single `Vec`
//! with implicit child addressing - node `n` has children `2n + 1` and
//! `2n + 2` - rather than a pointer-linked tree of per-node
//! allocations. The shape is fixed at construction, so the arena form
//! keeps the whole structure in one contiguous buffer with no lifetime
//! plumbing and good cache behaviour on the root-to-leaf walks.
//!
//! The node covering positions `[l, r]` splits at `l + (r - l) / 2`,
//! left child taking the lower half. A buffer of `4 * capacity`
//! elements is sufficient for that recursion over any length, including
//! non-powers of two.
//!
//! Queries use the partial-overlap protocol: a node fully inside the
//! requested range answers from its cached value, a node with no
//! overlap contributes the policy identity, and anything in between
//! recurses into both children with the request bounds unchanged.
//!
//! # Examples
//! ```
//! use rangeindex::MaxIndex;
//!
//! let mut index = MaxIndex::from_slice(&[2, 3, -1, 5, -2, 4, 8, 10])?;
//! assert_eq!(index.query(2, 6)?, 8);
//!
//! index.update(7, -10)?;
//! assert_eq!(index.query(6, 7)?, 8);
//! # Ok::<(), rangeindex::RangeIndexError>(())
//! ```

use std::marker::PhantomData;

use thiserror::Error;
use tracing::trace;

use crate::aggregate::{Aggregate, Max, Sum};

/// Contract violations reported by [`RangeIndex`] operations.
///
/// The index rejects misuse explicitly rather than absorbing it:
/// out-of-range positions, inverted ranges, and use of an index that
/// was never built are all errors, never silent no-ops or identity
/// values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RangeIndexError {
    /// The index covers zero positions and cannot be built.
    #[error("index covers no positions")]
    EmptyIndex,
    /// The source slice does not match the index capacity.
    #[error("source has {found} elements but the index covers {expected}")]
    LengthMismatch {
        /// The capacity the index was constructed with.
        expected: usize,
        /// The length of the slice supplied to `build`.
        found: usize,
    },
    /// `update` or `query` was called before `build`.
    #[error("index has not been built")]
    NotBuilt,
    /// A position lies outside the indexed range.
    #[error("position {position} is outside the indexed range 0..{capacity}")]
    OutOfRange {
        /// The offending position.
        position: usize,
        /// The number of indexed positions.
        capacity: usize,
    },
    /// A query range with `start > end`.
    #[error("range start {start} is greater than range end {end}")]
    InvalidRange {
        /// The requested inclusive start.
        start: usize,
        /// The requested inclusive end.
        end: usize,
    },
}

/// A static-size range query index over a fixed array of integers.
///
/// Built once from a source slice, then serves point updates and
/// inclusive range aggregate queries in O(log capacity). The aggregate
/// is supplied by the [`Aggregate`] policy parameter; see [`SumIndex`]
/// and [`MaxIndex`] for the provided instantiations.
///
/// The backing storage is owned exclusively by the index and is
/// allocated exactly once. `update` touches one root-to-leaf path;
/// every other node keeps its cached aggregate.
#[derive(Clone, Debug)]
pub struct RangeIndex<A: Aggregate> {
    capacity: usize,
    storage: Vec<A::Value>,
    built: bool,
    aggregate: PhantomData<A>,
}

/// A [`RangeIndex`] answering range-sum queries.
pub type SumIndex = RangeIndex<Sum>;

/// A [`RangeIndex`] answering range-maximum queries.
pub type MaxIndex = RangeIndex<Max>;

impl<A: Aggregate> RangeIndex<A> {
    /// Allocate an index covering `capacity` positions.
    ///
    /// The backing storage is sized `4 * capacity` and filled with the
    /// policy identity. The index answers nothing until [`build`] has
    /// populated it.
    ///
    /// [`build`]: RangeIndex::build
    pub fn new(capacity: usize) -> Self {
        RangeIndex {
            capacity,
            storage: vec![A::identity(); 4 * capacity],
            built: false,
            aggregate: PhantomData,
        }
    }

    /// Allocate and build an index from `source` in one step.
    ///
    /// # Errors
    /// [`RangeIndexError::EmptyIndex`] if `source` is empty.
    pub fn from_slice(source: &[A::Value]) -> Result<Self, RangeIndexError> {
        let mut index = Self::new(source.len());
        index.build(source)?;
        Ok(index)
    }

    /// The number of positions the index covers.
    pub fn len(&self) -> usize {
        self.capacity
    }

    /// True if the index covers no positions.
    pub fn is_empty(&self) -> bool {
        self.capacity == 0
    }

    /// Populate the tree from `source`.
    ///
    /// Recursively partitions the position range, assigns leaves from
    /// `source`, and derives every internal node by combining its
    /// children. Building again from a (possibly changed) slice
    /// re-derives a consistent tree - wasteful as a substitute for
    /// `update`, but well defined.
    ///
    /// # Errors
    /// [`RangeIndexError::EmptyIndex`] if the index covers no
    /// positions, [`RangeIndexError::LengthMismatch`] if
    /// `source.len() != self.len()`.
    pub fn build(&mut self, source: &[A::Value]) -> Result<(), RangeIndexError> {
        if self.capacity == 0 {
            return Err(RangeIndexError::EmptyIndex);
        }
        if source.len() != self.capacity {
            return Err(RangeIndexError::LengthMismatch {
                expected: self.capacity,
                found: source.len(),
            });
        }
        trace!(capacity = self.capacity, "building range index");
        self.build_node(source, 0, 0, self.capacity - 1);
        self.built = true;
        Ok(())
    }

    fn build_node(&mut self, source: &[A::Value], node: usize, left: usize, right: usize) {
        if left == right {
            self.storage[node] = source[left];
            return;
        }
        let mid = left + (right - left) / 2;
        self.build_node(source, 2 * node + 1, left, mid);
        self.build_node(source, 2 * node + 2, mid + 1, right);
        self.storage[node] = A::combine(self.storage[2 * node + 1], self.storage[2 * node + 2]);
    }

    /// Set the element at `position` to `value`.
    ///
    /// Overwrites one leaf and recombines every ancestor on the path
    /// back to the root; O(log capacity).
    ///
    /// # Errors
    /// [`RangeIndexError::NotBuilt`] before [`build`] has run,
    /// [`RangeIndexError::OutOfRange`] if `position >= self.len()`.
    ///
    /// [`build`]: RangeIndex::build
    pub fn update(&mut self, position: usize, value: A::Value) -> Result<(), RangeIndexError> {
        if !self.built {
            return Err(RangeIndexError::NotBuilt);
        }
        if position >= self.capacity {
            return Err(RangeIndexError::OutOfRange {
                position,
                capacity: self.capacity,
            });
        }
        trace!(position, "updating leaf");
        self.update_node(0, 0, self.capacity - 1, position, value);
        Ok(())
    }

    fn update_node(
        &mut self,
        node: usize,
        left: usize,
        right: usize,
        position: usize,
        value: A::Value,
    ) {
        // The sibling of every node on the target path prunes here.
        if position < left || position > right {
            return;
        }
        if left == right {
            self.storage[node] = value;
            return;
        }
        let mid = left + (right - left) / 2;
        self.update_node(2 * node + 1, left, mid, position, value);
        self.update_node(2 * node + 2, mid + 1, right, position, value);
        self.storage[node] = A::combine(self.storage[2 * node + 1], self.storage[2 * node + 2]);
    }

    /// The aggregate over the inclusive position range `[start, end]`.
    ///
    /// # Errors
    /// [`RangeIndexError::NotBuilt`] before [`build`] has run,
    /// [`RangeIndexError::InvalidRange`] if `start > end`,
    /// [`RangeIndexError::OutOfRange`] if `end >= self.len()`.
    ///
    /// [`build`]: RangeIndex::build
    pub fn query(&self, start: usize, end: usize) -> Result<A::Value, RangeIndexError> {
        if !self.built {
            return Err(RangeIndexError::NotBuilt);
        }
        if start > end {
            return Err(RangeIndexError::InvalidRange { start, end });
        }
        if end >= self.capacity {
            return Err(RangeIndexError::OutOfRange {
                position: end,
                capacity: self.capacity,
            });
        }
        trace!(start, end, "querying range");
        Ok(self.query_node(0, 0, self.capacity - 1, start, end))
    }

    fn query_node(
        &self,
        node: usize,
        left: usize,
        right: usize,
        start: usize,
        end: usize,
    ) -> A::Value {
        if start > right || end < left {
            return A::identity();
        }
        if start <= left && right <= end {
            return self.storage[node];
        }
        let mid = left + (right - left) / 2;
        A::combine(
            self.query_node(2 * node + 1, left, mid, start, end),
            self.query_node(2 * node + 2, mid + 1, right, start, end),
        )
    }

    /// The element currently stored at `position`.
    ///
    /// Equivalent to `query(position, position)`.
    ///
    /// # Errors
    /// As for [`query`](RangeIndex::query).
    pub fn get(&self, position: usize) -> Result<A::Value, RangeIndexError> {
        self.query(position, position)
    }
}
